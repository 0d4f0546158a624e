use clap::{Parser, Subcommand};
use cropbatch::{batch, config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cropbatch")]
#[command(about = "Crop a list of images to fixed relative proportions")]
#[command(long_about = "\
Crop a list of images to fixed relative proportions

Each job reads an input image, keeps the rectangle between the configured
fractions of its width and height, and writes the result to the job's output
path (format from the extension). Existing outputs are overwritten.

Defaults (without crop.toml):

  crop: left 0.25, top 0.15, right 0.75, bottom 0.85
  jobs: public/images/services/<name>_raw.png → <name>.png
        for trigger-point, deep-tissue, sports, benefits_es, benefits_en

A job that fails is reported and skipped; the exit status stays 0.
Run 'cropbatch gen-config' to print a documented crop.toml.")]
#[command(version)]
struct Cli {
    /// Directory job paths are relative to
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/crop.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Crop every image in the job list (default)
    Run {
        /// Write per-job results as JSON to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Inspect inputs and planned crops without writing anything
    Check,
    /// Print a stock crop.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Run { report: None }) {
        Command::Run { report } => {
            let crop_config = config::load_config(&cli.root, cli.config.as_deref())?;
            let jobs = crop_config.jobs(&cli.root);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_crop_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let results = batch::run_all(&jobs, Some(tx));
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;
            output::print_run_summary(&results);

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&results)?;
                std::fs::write(&path, json)?;
            }
        }
        Command::Check => {
            let crop_config = config::load_config(&cli.root, cli.config.as_deref())?;
            let jobs = crop_config.jobs(&cli.root);
            println!("==> Checking {} jobs under {}", jobs.len(), cli.root.display());
            output::print_check_output(&batch::check(&jobs));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
