//! Pure calculation functions for crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{PixelBounds, Proportions};

/// Scale a fraction of `extent` to a pixel coordinate.
///
/// Rounds half to even, so `2.5` lands on `2` and `3.5` on `4`. The result is
/// clamped to `0..=extent`.
fn scale_edge(extent: u32, fraction: f64) -> u32 {
    let px = (extent as f64 * fraction).round_ties_even();
    px.clamp(0.0, extent as f64) as u32
}

/// Calculate the absolute crop box for an image of the given size.
///
/// Each edge is rounded independently, so the cropped size is the difference
/// of the rounded edges rather than the rounded difference.
///
/// # Examples
/// ```
/// # use cropbatch::imaging::{calculate_pixel_bounds, Proportions};
/// // The stock crop of a 1920x1080 screenshot keeps 960x756
/// let b = calculate_pixel_bounds((1920, 1080), &Proportions::default());
/// assert_eq!((b.width(), b.height()), (960, 756));
/// ```
pub fn calculate_pixel_bounds(dimensions: (u32, u32), proportions: &Proportions) -> PixelBounds {
    let (w, h) = dimensions;
    PixelBounds {
        left: scale_edge(w, proportions.left),
        top: scale_edge(h, proportions.top),
        right: scale_edge(w, proportions.right),
        bottom: scale_edge(h, proportions.bottom),
    }
}
