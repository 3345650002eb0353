use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maps series labels to fill colors.
///
/// Labels without an explicit entry get a color derived from a hash of the
/// label, so repeated runs over the same data look the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    colors: IndexMap<String, String>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::brands()
    }
}

impl ColorPalette {
    /// Palette with no explicit entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            colors: IndexMap::new(),
        }
    }

    /// Handset brand colors.
    #[must_use]
    pub fn brands() -> Self {
        [
            ("Samsung", "#1428A0"),
            ("iPhone", "#555555"),
            ("Huawei", "#C7000B"),
            ("Xiaomi", "#FF6900"),
            ("Nokia", "#183693"),
            ("Motorola", "#5C2D91"),
            ("BlackBerry", "#000000"),
            ("LG", "#A50034"),
            ("HTC", "#84BD00"),
            ("ZTE", "#0038A8"),
        ]
        .into_iter()
        .fold(Self::empty(), |palette, (label, color)| {
            palette.with_color(label, color)
        })
    }

    #[must_use]
    pub fn with_color(mut self, label: impl Into<String>, color: impl Into<String>) -> Self {
        self.colors.insert(label.into(), color.into());
        self
    }

    #[must_use]
    pub fn explicit_color(&self, label: &str) -> Option<&str> {
        self.colors.get(label).map(String::as_str)
    }

    /// Explicit color for `label`, or a stable hash-derived one.
    #[must_use]
    pub fn color_for(&self, label: &str) -> String {
        self.explicit_color(label)
            .map_or_else(|| hashed_color(label), str::to_owned)
    }
}

/// FNV-1a over the label bytes, folded into mid-range channels so the result
/// is never close to white or black.
fn hashed_color(label: &str) -> String {
    let hash = label.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    let channel = |shift: u32| 0x30 + ((hash >> shift) & 0xff) as u8 % 0xa0;
    format!("#{:02x}{:02x}{:02x}", channel(0), channel(8), channel(16))
}
