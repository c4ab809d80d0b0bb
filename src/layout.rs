//! Scale and placement math for the preview surface.

pub mod metrics;
