//! End-to-end runs against real PNG files in a temp directory.
//!
//! These go through the public library API with the production backend:
//! config → jobs → run_all → files on disk and formatted lines.

use cropbatch::batch::{self, CropEvent, JobOutcome};
use cropbatch::config::{self, CONFIG_FILENAME, CropConfig};
use cropbatch::imaging::Proportions;
use cropbatch::output;
use image::{Rgb, RgbImage};
use std::path::Path;
use std::sync::mpsc;
use tempfile::TempDir;

const SERVICES: &[&str] = &[
    "trigger-point",
    "deep-tissue",
    "sports",
    "benefits_es",
    "benefits_en",
];

fn write_png(path: &Path, width: u32, height: u32) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 64]))
        .save(path)
        .unwrap();
}

fn services_dir(root: &Path) -> std::path::PathBuf {
    root.join("public/images/services")
}

/// Run the batch and return the results plus the printed lines.
fn run(jobs: &[batch::CropJob]) -> (Vec<batch::JobResult>, Vec<String>) {
    let (tx, rx) = mpsc::channel();
    let results = batch::run_all(jobs, Some(tx));
    let lines = rx
        .iter()
        .flat_map(|event: CropEvent| output::format_crop_event(&event))
        .collect();
    (results, lines)
}

#[test]
fn full_hd_screenshot_crops_to_960x756() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("shot_raw.png");
    let output_path = tmp.path().join("shot.png");
    write_png(&input, 1920, 1080);

    let jobs = vec![batch::CropJob {
        input_path: input.clone(),
        output_path: output_path.clone(),
        proportions: Proportions::default(),
    }];
    let (results, lines) = run(&jobs);

    assert_eq!(
        results[0].outcome,
        JobOutcome::Saved {
            width: 960,
            height: 756
        }
    );
    assert_eq!(image::image_dimensions(&output_path).unwrap(), (960, 756));
    assert_eq!(
        lines,
        vec![
            format!("Processing {}: 1920x1080", input.display()),
            format!("Saved {}", output_path.display()),
        ]
    );
}

#[test]
fn five_stock_jobs_run_in_list_order() {
    let tmp = TempDir::new().unwrap();
    for name in SERVICES {
        write_png(&services_dir(tmp.path()).join(format!("{name}_raw.png")), 400, 200);
    }

    let crop_config = config::load_config(tmp.path(), None).unwrap();
    let (results, lines) = run(&crop_config.jobs(tmp.path()));

    assert_eq!(batch::saved_count(&results), 5);
    let saved: Vec<&String> = lines.iter().filter(|l| l.starts_with("Saved ")).collect();
    assert_eq!(saved.len(), 5);
    for (line, name) in saved.iter().zip(SERVICES) {
        assert!(line.ends_with(&format!("services/{name}.png")), "{line}");
    }
    for name in SERVICES {
        let out = services_dir(tmp.path()).join(format!("{name}.png"));
        // 400 * 0.5 = 200, 200 * (0.85 - 0.15) = 140
        assert_eq!(image::image_dimensions(&out).unwrap(), (200, 140));
    }
}

#[test]
fn missing_input_is_logged_and_later_jobs_still_run() {
    let tmp = TempDir::new().unwrap();
    // Only the last two exist
    for name in &SERVICES[3..] {
        write_png(&services_dir(tmp.path()).join(format!("{name}_raw.png")), 100, 100);
    }

    let jobs = CropConfig::default().jobs(tmp.path());
    let (results, lines) = run(&jobs);

    assert_eq!(batch::saved_count(&results), 2);
    assert!(results[..3].iter().all(|r| !r.is_saved()));

    let missing = &jobs[0].input_path;
    let errors: Vec<&String> = lines
        .iter()
        .filter(|l| l.contains(&missing.display().to_string()))
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error processing "));

    assert!(!jobs[0].output_path.exists());
    assert!(jobs[3].output_path.exists());
    assert!(jobs[4].output_path.exists());
}

#[test]
fn rerun_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("a_raw.png");
    write_png(&input, 321, 123);
    let jobs = vec![batch::CropJob {
        input_path: input,
        output_path: tmp.path().join("a.png"),
        proportions: Proportions::default(),
    }];

    run(&jobs);
    let first = std::fs::read(&jobs[0].output_path).unwrap();
    run(&jobs);
    let second = std::fs::read(&jobs[0].output_path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn full_proportions_keep_original_size() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("a_raw.png");
    write_png(&input, 77, 33);
    let jobs = vec![batch::CropJob {
        input_path: input,
        output_path: tmp.path().join("a.png"),
        proportions: Proportions::new(0.0, 0.0, 1.0, 1.0).unwrap(),
    }];

    let (results, _) = run(&jobs);

    assert!(results[0].is_saved());
    assert_eq!(image::image_dimensions(&jobs[0].output_path).unwrap(), (77, 33));
}

#[test]
fn config_file_overrides_jobs_and_crop() {
    let tmp = TempDir::new().unwrap();
    write_png(&tmp.path().join("in/banner_raw.png"), 1000, 500);
    std::fs::create_dir_all(tmp.path().join("out")).unwrap();
    std::fs::write(
        tmp.path().join(CONFIG_FILENAME),
        r#"
[crop]
left = 0.1
right = 0.9

[[jobs]]
input = "in/banner_raw.png"
output = "out/banner.jpg"
"#,
    )
    .unwrap();

    let crop_config = config::load_config(tmp.path(), None).unwrap();
    let jobs = crop_config.jobs(tmp.path());
    assert_eq!(jobs.len(), 1);

    let (results, _) = run(&jobs);

    // 1000 * 0.8 = 800, 500 * 0.7 = 350
    assert_eq!(
        results[0].outcome,
        JobOutcome::Saved {
            width: 800,
            height: 350
        }
    );
    assert_eq!(
        image::image_dimensions(tmp.path().join("out/banner.jpg")).unwrap(),
        (800, 350)
    );
}

#[test]
fn results_serialize_as_report() {
    let tmp = TempDir::new().unwrap();
    let jobs = vec![batch::CropJob {
        input_path: tmp.path().join("nope_raw.png"),
        output_path: tmp.path().join("nope.png"),
        proportions: Proportions::default(),
    }];

    let results = batch::run_all(&jobs, None);
    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string_pretty(&results).unwrap()).unwrap();

    assert_eq!(json[0]["status"], "failed");
    assert!(json[0]["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[test]
fn check_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    write_png(&services_dir(tmp.path()).join("sports_raw.png"), 1920, 1080);

    let jobs = CropConfig::default().jobs(tmp.path());
    let results = batch::check(&jobs);
    let lines = output::format_check_output(&results);

    assert_eq!(lines.last().map(String::as_str), Some("1 of 5 jobs ready"));
    assert!(lines.iter().any(|l| l.contains("1920x1080 \u{2192} 960x756")));
    assert!(!jobs[2].output_path.exists());
}
