//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides the crop box) and the [`backend`](super::backend) (which
//! does the actual pixel work). Tests swap in a mock backend without touching
//! operation logic.
//!
//! ## Types
//!
//! - [`Proportions`] — Crop rectangle as fractions of the image size. Validated on construction.
//! - [`PixelBounds`] — The same rectangle in absolute pixels.
//! - [`CropParams`] — Everything the backend needs for a crop: source, output, pixel bounds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProportionsError {
    #[error("{edge} must be within 0..=1, got {value}")]
    OutOfRange { edge: &'static str, value: f64 },
    #[error("left ({left}) must be less than right ({right})")]
    InvertedHorizontal { left: f64, right: f64 },
    #[error("top ({top}) must be less than bottom ({bottom})")]
    InvertedVertical { top: f64, bottom: f64 },
}

/// Crop rectangle expressed as fractions of the image width and height.
///
/// Holds `0 <= left < right <= 1` and `0 <= top < bottom <= 1`. Use
/// [`Proportions::new`] to build one from untrusted values; values loaded from
/// config go through [`Proportions::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Proportions {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Proportions {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self, ProportionsError> {
        let p = Self {
            left,
            top,
            right,
            bottom,
        };
        p.validate()?;
        Ok(p)
    }

    /// The whole image.
    pub fn full() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            right: 1.0,
            bottom: 1.0,
        }
    }

    pub fn validate(&self) -> Result<(), ProportionsError> {
        for (edge, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&value) {
                return Err(ProportionsError::OutOfRange { edge, value });
            }
        }
        if self.left >= self.right {
            return Err(ProportionsError::InvertedHorizontal {
                left: self.left,
                right: self.right,
            });
        }
        if self.top >= self.bottom {
            return Err(ProportionsError::InvertedVertical {
                top: self.top,
                bottom: self.bottom,
            });
        }
        Ok(())
    }
}

/// The stock crop: keeps the central half horizontally and the central 70%
/// vertically.
impl Default for Proportions {
    fn default() -> Self {
        Self {
            left: 0.25,
            top: 0.15,
            right: 0.75,
            bottom: 0.85,
        }
    }
}

/// Absolute crop box in pixels, `right` and `bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelBounds {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl fmt::Display for PixelBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

/// Parameters for a crop operation.
#[derive(Debug, Clone, PartialEq)]
pub struct CropParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub bounds: PixelBounds,
}
