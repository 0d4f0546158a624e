//! CLI output formatting.
//!
//! Every progress line the tool prints is produced here. Format functions
//! are pure (they return `Vec<String>`) so tests can pin the exact text; the
//! `print_*` wrappers write to stdout.
//!
//! # Output Format
//!
//! ## Run
//!
//! ```text
//! Processing public/images/services/trigger-point_raw.png: 1920x1080
//! Saved public/images/services/trigger-point.png
//! Error processing public/images/services/sports_raw.png: IO error: No such file or directory (os error 2)
//!
//! Cropped 1 of 2 images
//! ```
//!
//! ## Check
//!
//! ```text
//! 001 public/images/services/trigger-point_raw.png
//!     1920x1080 → 960x756
//!     Output: public/images/services/trigger-point.png
//! 002 public/images/services/sports_raw.png
//!     Error: IO error: No such file or directory (os error 2)
//!
//! 1 of 2 jobs ready
//! ```

use crate::batch::{CheckOutcome, CheckResult, CropEvent, JobResult, saved_count};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

// ============================================================================
// Run
// ============================================================================

/// Format a single batch progress event as display lines.
pub fn format_crop_event(event: &CropEvent) -> Vec<String> {
    match event {
        CropEvent::Processing {
            input,
            width,
            height,
        } => vec![format!(
            "Processing {}: {}x{}",
            input.display(),
            width,
            height
        )],
        CropEvent::Saved { output } => vec![format!("Saved {}", output.display())],
        CropEvent::Failed { input, message } => {
            vec![format!("Error processing {}: {}", input.display(), message)]
        }
    }
}

/// Format the closing summary of a run.
pub fn format_run_summary(results: &[JobResult]) -> Vec<String> {
    vec![
        String::new(),
        format!("Cropped {} of {} images", saved_count(results), results.len()),
    ]
}

pub fn print_run_summary(results: &[JobResult]) {
    for line in format_run_summary(results) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the dry-run report, one entry per job.
pub fn format_check_output(results: &[CheckResult]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut ready = 0;

    for (i, result) in results.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), result.input.display()));
        match &result.outcome {
            CheckOutcome::Ready {
                width,
                height,
                crop_width,
                crop_height,
            } => {
                ready += 1;
                lines.push(format!(
                    "{}{}x{} \u{2192} {}x{}",
                    indent(1),
                    width,
                    height,
                    crop_width,
                    crop_height
                ));
                lines.push(format!("{}Output: {}", indent(1), result.output.display()));
            }
            CheckOutcome::Invalid { message } => {
                lines.push(format!("{}Error: {}", indent(1), message));
            }
        }
    }

    lines.push(String::new());
    lines.push(format!("{} of {} jobs ready", ready, results.len()));
    lines
}

pub fn print_check_output(results: &[CheckResult]) {
    for line in format_check_output(results) {
        println!("{}", line);
    }
}
