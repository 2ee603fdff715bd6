//! PNG export of rendered frames

use crate::render::FrameBuffer;
use std::path::Path;

/// Errors that can occur during export
#[derive(Debug)]
pub enum ExportError {
    /// Width or height is zero
    InvalidDimensions { width: u32, height: u32 },
    /// Pixel data does not match width * height * 4
    BufferMismatch { expected: usize, actual: usize },
    /// Encoder or filesystem failure
    Save(image::ImageError),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::InvalidDimensions { width, height } => {
                write!(f, "Invalid dimensions: {}x{}", width, height)
            }
            ExportError::BufferMismatch { expected, actual } => write!(
                f,
                "Pixel data length {} doesn't match expected {}",
                actual, expected
            ),
            ExportError::Save(e) => write!(f, "Failed to save image: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Save(e) => Some(e),
            _ => None,
        }
    }
}

/// Export raw RGBA pixel data to a PNG file
///
/// # Arguments
/// * `path` - Output file path
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `data` - RGBA u8 pixel data (length must be width * height * 4)
pub fn export_frame<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    data: &[u8],
) -> Result<(), ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(ExportError::BufferMismatch {
            expected,
            actual: data.len(),
        });
    }

    image::save_buffer(path.as_ref(), data, width, height, image::ColorType::Rgba8)
        .map_err(ExportError::Save)?;

    log::info!("Saved {}x{} frame to {}", width, height, path.as_ref().display());
    Ok(())
}

/// Export a rendered frame buffer to a PNG file
pub fn export_frame_buffer<P: AsRef<Path>>(path: P, frame: &FrameBuffer) -> Result<(), ExportError> {
    let (width, height) = frame.size();
    export_frame(path, width, height, frame.pixels())
}
