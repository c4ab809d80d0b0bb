//! The session-oriented public API.

pub mod preview_session;
