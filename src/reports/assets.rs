//! Image loading for report assets

use std::path::Path;

use async_trait::async_trait;

use super::canvas::RasterImage;
use crate::error::{CashPilotError, CashPilotResult};

/// Resolves a path to a decoded bitmap
///
/// Failures are reported as [`CashPilotError::Asset`] so the caller can
/// omit the section instead of aborting.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, path: &Path) -> CashPilotResult<RasterImage>;
}

/// Loads PNG or JPEG files from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageLoader;

#[async_trait]
impl ImageLoader for FsImageLoader {
    async fn load(&self, path: &Path) -> CashPilotResult<RasterImage> {
        let name = path.display().to_string();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| CashPilotError::asset(name.as_str(), e))?;

        decode_image(&name, &bytes)
    }
}

/// Decode an encoded image into RGB8
pub fn decode_image(name: &str, bytes: &[u8]) -> CashPilotResult<RasterImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CashPilotError::asset(name, e))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();

    RasterImage::from_rgb(width, height, decoded.into_raw())
        .map_err(|e| CashPilotError::asset(name, e))
}
