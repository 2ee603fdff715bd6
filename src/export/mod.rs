//! Export modules
//!
//! Handles snapshot export:
//! - Image: PNG export of rendered frames

pub mod image_export;

pub use image_export::{ExportError, export_frame, export_frame_buffer};
