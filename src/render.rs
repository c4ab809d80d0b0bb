//! Rasterization: raster effects, paint bridging, text, title area and
//! scene composition.

pub mod fx;
pub mod paint;
pub mod scene;
pub mod text;
pub mod title;
