//! Frame size lookup via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Only the header is read;
//! pixels are never decoded.

use crate::geometry::FrameSize;
use crate::util::{DetNmsError, DetNmsResult};
use std::path::Path;

/// Reads the dimensions of the image at `path`.
pub fn frame_size<P: AsRef<Path>>(path: P) -> DetNmsResult<FrameSize> {
    let (width, height) = image::image_dimensions(path).map_err(|err| DetNmsError::ImageIo {
        reason: err.to_string(),
    })?;
    FrameSize::new(width as f32, height as f32)
}
