//! Asset ingestion: CSS-style color parsing, image decode, font loading
//! and poster resolution.

pub mod color;
pub mod decode;
pub mod fonts;
pub mod poster;
