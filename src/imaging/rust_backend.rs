//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image::ImageReader` (content-sniffed) |
//! | Identify | `image::image_dimensions` (header only) |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Encode | `image::DynamicImage::write_to`, format from output extension |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::CropParams;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Write;
use std::path::Path;

/// Extensions the compiled-in encoders can write, with their format.
const OUTPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Resolve the encoding format implied by an output path's extension.
pub fn output_format(path: &Path) -> Result<ImageFormat, BackendError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    OUTPUT_CANDIDATES
        .iter()
        .find(|(candidate, fmt)| *candidate == ext && fmt.writing_enabled())
        .map(|(_, fmt)| *fmt)
        .ok_or_else(|| {
            BackendError::UnsupportedFormat(if ext.is_empty() {
                format!("{} has no extension", path.display())
            } else {
                ext
            })
        })
}

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Save a DynamicImage to the given path in the given format.
///
/// JPEG has no alpha channel and the WebP encoder only takes 8-bit input, so
/// those are converted first.
fn save_image(img: &DynamicImage, path: &Path, format: ImageFormat) -> Result<(), BackendError> {
    let converted;
    let img = match format {
        ImageFormat::Jpeg => {
            converted = DynamicImage::ImageRgb8(img.to_rgb8());
            &converted
        }
        ImageFormat::WebP => {
            converted = DynamicImage::ImageRgba8(img.to_rgba8());
            &converted
        }
        _ => img,
    };

    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let mut writer = std::io::BufWriter::new(file);
    img.write_to(&mut writer, format).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to encode {}: {}", path.display(), e))
    })?;
    writer.flush().map_err(BackendError::Io)
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| match e {
            image::ImageError::IoError(io) => BackendError::Io(io),
            other => {
                BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", other))
            }
        })?;
        Ok(Dimensions { width, height })
    }

    fn crop(&self, params: &CropParams) -> Result<(), BackendError> {
        // Reject the output format before decoding anything
        let format = output_format(&params.output)?;
        let img = load_image(&params.source)?;

        let b = params.bounds;
        if b.right > img.width() || b.bottom > img.height() || b.is_empty() {
            return Err(BackendError::ProcessingFailed(format!(
                "Crop box {} does not fit {}x{} image",
                b,
                img.width(),
                img.height()
            )));
        }

        let cropped = img.crop_imm(b.left, b.top, b.width(), b.height());
        save_image(&cropped, &params.output, format)
    }
}
