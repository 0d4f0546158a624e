//! Batch execution of crop jobs.
//!
//! Takes the job list built from config and runs each job once, in order,
//! on the calling thread. Every job is independent: a failure is caught at the
//! job boundary, reported as a [`CropEvent::Failed`], recorded in the returned
//! [`JobResult`] list, and the batch moves on. Nothing a job does can abort
//! the batch or change the process exit status.
//!
//! ## Progress Events
//!
//! Each job emits, in order:
//!
//! ```text
//! Processing  → after the source decodes its header (carries W×H)
//! Saved       → after the output is written
//! Failed      → instead of either, once anything goes wrong
//! ```
//!
//! Events go over an optional [`Sender`] so the caller decides how to render
//! them; see [`crate::output`].

use crate::imaging::rust_backend::output_format;
use crate::imaging::{
    CropError, ImageBackend, Proportions, RustBackend, crop_with_dimensions, get_dimensions,
    plan_crop,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use tracing::debug;

/// A single crop to perform. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CropJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub proportions: Proportions,
}

/// Progress reported while running a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum CropEvent {
    Processing {
        input: PathBuf,
        width: u32,
        height: u32,
    },
    Saved {
        output: PathBuf,
    },
    Failed {
        input: PathBuf,
        message: String,
    },
}

/// How a job ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobOutcome {
    Saved { width: u32, height: u32 },
    Failed { message: String },
}

/// Per-job record returned by [`run_all`], in job order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResult {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub outcome: JobOutcome,
}

impl JobResult {
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, JobOutcome::Saved { .. })
    }
}

/// Number of saved jobs.
pub fn saved_count(results: &[JobResult]) -> usize {
    results.iter().filter(|r| r.is_saved()).count()
}

fn emit(progress: &Option<Sender<CropEvent>>, event: CropEvent) {
    if let Some(tx) = progress {
        // A dropped receiver only loses display, never the result
        tx.send(event).ok();
    }
}

/// Run every job with the production backend.
pub fn run_all(jobs: &[CropJob], progress: Option<Sender<CropEvent>>) -> Vec<JobResult> {
    run_all_with_backend(&RustBackend::new(), jobs, progress)
}

/// Run every job using a specific backend (allows testing with mock).
pub fn run_all_with_backend(
    backend: &impl ImageBackend,
    jobs: &[CropJob],
    progress: Option<Sender<CropEvent>>,
) -> Vec<JobResult> {
    debug!(jobs = jobs.len(), "starting batch");
    jobs.iter()
        .map(|job| run_job(backend, job, &progress))
        .collect()
}

fn run_job(
    backend: &impl ImageBackend,
    job: &CropJob,
    progress: &Option<Sender<CropEvent>>,
) -> JobResult {
    let outcome = match try_job(backend, job, progress) {
        Ok((width, height)) => {
            emit(
                progress,
                CropEvent::Saved {
                    output: job.output_path.clone(),
                },
            );
            JobOutcome::Saved { width, height }
        }
        Err(e) => {
            let message = e.to_string();
            emit(
                progress,
                CropEvent::Failed {
                    input: job.input_path.clone(),
                    message: message.clone(),
                },
            );
            JobOutcome::Failed { message }
        }
    };
    JobResult {
        input: job.input_path.clone(),
        output: job.output_path.clone(),
        outcome,
    }
}

fn try_job(
    backend: &impl ImageBackend,
    job: &CropJob,
    progress: &Option<Sender<CropEvent>>,
) -> Result<(u32, u32), CropError> {
    let (width, height) = get_dimensions(backend, &job.input_path)?;
    emit(
        progress,
        CropEvent::Processing {
            input: job.input_path.clone(),
            width,
            height,
        },
    );
    let bounds = crop_with_dimensions(
        backend,
        &job.input_path,
        &job.output_path,
        (width, height),
        &job.proportions,
    )?;
    Ok((bounds.width(), bounds.height()))
}

/// What a dry run found for one job.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    /// The job would crop `width`×`height` down to `crop_width`×`crop_height`.
    Ready {
        width: u32,
        height: u32,
        crop_width: u32,
        crop_height: u32,
    },
    /// The job would fail.
    Invalid { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: CheckOutcome,
}

/// Inspect every job without writing anything.
///
/// Reads input headers, plans the crop and checks that the output format and
/// directory are usable.
pub fn check_with_backend(backend: &impl ImageBackend, jobs: &[CropJob]) -> Vec<CheckResult> {
    jobs.iter()
        .map(|job| {
            let outcome = match check_job(backend, job) {
                Ok(ready) => ready,
                Err(message) => CheckOutcome::Invalid { message },
            };
            CheckResult {
                input: job.input_path.clone(),
                output: job.output_path.clone(),
                outcome,
            }
        })
        .collect()
}

/// [`check_with_backend`] with the production backend.
pub fn check(jobs: &[CropJob]) -> Vec<CheckResult> {
    check_with_backend(&RustBackend::new(), jobs)
}

fn check_job(backend: &impl ImageBackend, job: &CropJob) -> Result<CheckOutcome, String> {
    let dims = get_dimensions(backend, &job.input_path).map_err(|e| e.to_string())?;
    let params = plan_crop(&job.input_path, &job.output_path, dims, &job.proportions)
        .map_err(|e| e.to_string())?;
    output_format(&job.output_path).map_err(|e| e.to_string())?;
    if let Some(dir) = job.output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.is_dir() {
            return Err(format!("Output directory does not exist: {}", dir.display()));
        }
    }
    Ok(CheckOutcome::Ready {
        width: dims.0,
        height: dims.1,
        crop_width: params.bounds.width(),
        crop_height: params.bounds.height(),
    })
}
