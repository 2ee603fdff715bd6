//! Rendering modules
//!
//! Software rendering of bubble snapshots for headless runs and tests:
//! - Frame: RGBA8 frame buffer and disc rasteriser

pub mod frame;

pub use frame::{BACKGROUND, FrameBuffer, MAX_FRAME_SIDE, frame_size};
