//! The style configuration data model.

pub mod model;
