//! Decoding of background and photo images.

use cardpress_core::asset::RasterAsset;
use thiserror::Error;

/// Asset decoding errors.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image is empty")]
    Empty,
}

/// Decode PNG, JPEG or WebP bytes into an RGBA raster.
pub fn decode_asset(bytes: &[u8]) -> Result<RasterAsset, AssetError> {
    if bytes.is_empty() {
        return Err(AssetError::Empty);
    }
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let asset = RasterAsset::from_rgba(width, height, rgba.into_raw()).ok_or(AssetError::Empty)?;
    log::debug!("Decoded {}x{} image ({} bytes)", width, height, bytes.len());
    Ok(asset)
}
