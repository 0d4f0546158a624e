//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take proportions, compute pixel parameters, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::calculate_pixel_bounds;
use super::params::{CropParams, PixelBounds, Proportions, ProportionsError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CropError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Invalid crop proportions: {0}")]
    Proportions(#[from] ProportionsError),
    #[error("Crop region {bounds} of {width}x{height} image is empty")]
    EmptyRegion {
        bounds: PixelBounds,
        width: u32,
        height: u32,
    },
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, CropError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let Dimensions { width, height } = backend.identify(path)?;
    Ok((width, height))
}

/// Plan a crop operation without executing it.
///
/// Fails when the proportions are invalid or round to an empty region for
/// an image this size.
pub fn plan_crop(
    source: &Path,
    output: &Path,
    dimensions: (u32, u32),
    proportions: &Proportions,
) -> Result<CropParams> {
    proportions.validate()?;
    let bounds = calculate_pixel_bounds(dimensions, proportions);
    if bounds.is_empty() {
        return Err(CropError::EmptyRegion {
            bounds,
            width: dimensions.0,
            height: dimensions.1,
        });
    }
    Ok(CropParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        bounds,
    })
}

/// Crop an image whose dimensions are already known.
///
/// Returns the pixel bounds that were written.
pub fn crop_with_dimensions(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    dimensions: (u32, u32),
    proportions: &Proportions,
) -> Result<PixelBounds> {
    let params = plan_crop(source, output, dimensions, proportions)?;
    debug!(
        source = %source.display(),
        bounds = %params.bounds,
        "computed crop box"
    );
    backend.crop(&params)?;
    Ok(params.bounds)
}

/// Identify, crop and save in one call.
pub fn crop(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    proportions: &Proportions,
) -> Result<PixelBounds> {
    let dimensions = get_dimensions(backend, source)?;
    crop_with_dimensions(backend, source, output, dimensions, proportions)
}
