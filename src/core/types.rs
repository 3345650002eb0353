use serde::{Deserialize, Serialize};

use crate::error::{RaceError, RaceResult};

/// Drawable area reported by the host, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> RaceResult<Self> {
        if !self.is_valid() {
            return Err(RaceError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000, 600)
    }
}
