//! # cropbatch
//!
//! Crops a list of images to fixed relative proportions and writes each
//! result to its own output path. By default the list is the five service
//! screenshots under `public/images/services/`, each cropped to the central
//! region from 25% to 75% of its width and 15% to 85% of its height.
//!
//! # Flow
//!
//! ```text
//! crop.toml (or stock defaults) → [CropJob] → run_all → [JobResult]
//!                                               │
//!                                               └─ CropEvent → stdout lines
//! ```
//!
//! Jobs run sequentially on one thread. A job that fails is logged and
//! recorded; it never stops the batch and never changes the exit status.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `crop.toml` loading, merging over stock defaults, validation |
//! | [`batch`] | Job types, `run_all`, dry-run `check` |
//! | [`imaging`] | Crop geometry and the `image`-crate backend |
//! | [`output`] | Formatting of progress and check lines |
//!
//! # Design Decisions
//!
//! ## Fixed Proportions, Not Detection
//!
//! The crop box is four configured fractions. Nothing looks at pixel content
//! to find where the interesting part of an image is; the fractions are a
//! starting point to tune per batch or per job in `crop.toml`.
//!
//! ## Edge Rounding
//!
//! Each edge is scaled and rounded half-to-even on its own, so a crop's size
//! is the difference of two rounded edges. On a 1920×1080 image the stock
//! proportions give a 960×756 result.
//!
//! ## Failures as Data
//!
//! `run_all` returns one [`batch::JobResult`] per job. The CLI only prints a
//! summary and can write the list as JSON with `--report`; callers that want
//! to fail on any error can inspect the list themselves.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
