//! Image processing built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Crop** | `DynamicImage::crop_imm` |
//! | **Encode** | format from output extension (PNG, JPEG, TIFF, WebP) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::calculate_pixel_bounds;
pub use operations::{CropError, crop, crop_with_dimensions, get_dimensions, plan_crop};
pub use params::{CropParams, PixelBounds, Proportions, ProportionsError};
pub use rust_backend::RustBackend;
