//! Decoded raster assets and their loading state.

use std::sync::Arc;
use uuid::Uuid;

/// A decoded RGBA8 (straight alpha) raster.
///
/// Cloning is cheap; pixel data is shared.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterAsset {
    id: Uuid,
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl RasterAsset {
    /// Wrap RGBA8 pixel data. Returns None if the buffer does not match the
    /// dimensions or the raster is empty.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Identity of this decoded raster, usable as a cache key.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 pixel data, row major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// An asset that may be absent, still loading, or decoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AssetSlot {
    /// Nothing supplied.
    #[default]
    Empty,
    /// Supplied but not decoded yet; drawn once it resolves.
    Pending,
    /// Decoded and drawable.
    Ready(RasterAsset),
}

impl AssetSlot {
    /// The decoded asset, if it has resolved.
    pub fn ready(&self) -> Option<&RasterAsset> {
        match self {
            AssetSlot::Ready(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, AssetSlot::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AssetSlot::Pending)
    }
}

impl From<RasterAsset> for AssetSlot {
    fn from(asset: RasterAsset) -> Self {
        AssetSlot::Ready(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_checks_length() {
        assert!(RasterAsset::from_rgba(2, 2, vec![0; 16]).is_some());
        assert!(RasterAsset::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(RasterAsset::from_rgba(0, 2, Vec::new()).is_none());
    }

    #[test]
    fn test_clone_shares_identity() {
        let asset = RasterAsset::from_rgba(1, 1, vec![1, 2, 3, 4]).unwrap();
        let copy = asset.clone();
        assert_eq!(asset.id(), copy.id());
        assert_eq!(copy.pixels(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_slot_states() {
        assert!(AssetSlot::Empty.ready().is_none());
        assert!(AssetSlot::Pending.is_pending());
        let slot: AssetSlot = RasterAsset::from_rgba(1, 1, vec![0; 4]).unwrap().into();
        assert!(slot.is_ready());
        assert_eq!(slot.ready().unwrap().width(), 1);
    }
}
