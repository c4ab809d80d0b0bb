//! Canvas-accurate preview of the backend title/subtitle burn-in.
//!
//! The backend video pipeline renders title and subtitle text onto a
//! canonical 1080x1920 vertical frame. This crate reproduces that result
//! at preview scale inside simulated phone chrome, so a style being edited
//! can be judged without a round trip through video generation. The public
//! API is session-oriented:
//!
//! - Create a [`PreviewSession`] rooted at an assets directory
//! - Feed it a [`StyleConfig`] (typically from JSON) and a poster URL
//! - Render [`FrameRgba`] frames whenever [`PreviewSession::needs_redraw`]
//!   says the inputs changed

#![forbid(unsafe_code)]

pub mod assets;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod session;
pub mod style;

pub use crate::foundation::core::{Canvas, FrameRgba, Rgba8Premul};
pub use crate::foundation::error::{PreviewError, PreviewResult};
pub use crate::session::preview_session::PreviewSession;
pub use crate::style::model::{
    Alignment, FontStyle, PlaceholderMode, Position, StyleConfig, TitleConfig, TitleContent,
};
