//! Operator-supplied values for fill mode.

use crate::asset::{AssetSlot, RasterAsset};
use std::collections::BTreeMap;

/// Text values keyed by field label, plus at most one photo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillSession {
    values: BTreeMap<String, String>,
    photo: AssetSlot,
}

impl FillSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from label/value pairs.
    pub fn with_values<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            photo: AssetSlot::Empty,
        }
    }

    /// Set the value for a label. An empty value removes the entry.
    pub fn set_value(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&label);
        } else {
            self.values.insert(label, value);
        }
    }

    /// Value for a label; empty if none was entered.
    pub fn value(&self, label: &str) -> &str {
        self.values.get(label).map(String::as_str).unwrap_or("")
    }

    /// All entered values, ordered by label.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn clear_values(&mut self) {
        self.values.clear();
    }

    pub fn photo(&self) -> &AssetSlot {
        &self.photo
    }

    /// Supply the decoded photo.
    pub fn set_photo(&mut self, photo: RasterAsset) {
        self.photo = AssetSlot::Ready(photo);
    }

    /// Mark the photo as loading.
    pub fn set_photo_pending(&mut self) {
        self.photo = AssetSlot::Pending;
    }

    pub fn clear_photo(&mut self) {
        self.photo = AssetSlot::Empty;
    }
}
