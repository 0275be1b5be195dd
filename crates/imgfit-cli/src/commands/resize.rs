//! Resize command - shrink every embedded image of one document.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use imgfit_core::{BatchImageResizer, ImageOutcome, PatchStrategy, ResizeReport, ResizeRequest};

use super::config::load_config;

/// Arguments for resizing a document.
#[derive(Args)]
pub struct ResizeArgs {
    /// The path to the .drawio file
    #[arg(short, long, required = true)]
    file: Option<PathBuf>,

    /// The percentage to resize the images to
    #[arg(short, long)]
    percentage: Option<f64>,

    /// The width to resize the images to (minimum width with --percentage)
    #[arg(short, long)]
    width: Option<u32>,

    /// Replace each image at its original position instead of its first textual occurrence
    #[arg(long)]
    by_position: bool,
}

pub async fn run(args: ResizeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();

    let request = ResizeRequest {
        percentage: args.percentage,
        min_width: args.width,
    };

    // Reject the run before touching any file
    request.validate()?;

    let Some(file) = args.file else {
        anyhow::bail!("Missing required --file argument");
    };

    if !file.exists() {
        anyhow::bail!("Input file not found: {}", file.display());
    }

    let config = load_config(config_path)?;

    let strategy = if args.by_position {
        PatchStrategy::Positional
    } else {
        config.document.strategy
    };
    debug!("Patch strategy: {:?}", strategy);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images")
            .unwrap()
            .progress_chars("=>-"),
    );

    let progress = pb.clone();
    let resizer = BatchImageResizer::from_config(&config, request)
        .with_strategy(strategy)
        .with_progress(move |done, total| {
            progress.set_length(total as u64);
            progress.set_position(done as u64);
        });

    let path = file.clone();
    let report = tokio::task::spawn_blocking(move || resizer.process_file(&path)).await?;

    pb.finish_and_clear();

    let report = report?;
    print_summary(&file, &report, start);

    Ok(())
}

fn print_summary(file: &Path, report: &ResizeReport, start: Instant) {
    println!(
        "{} Processed {} images in {:?}",
        style("✓").green(),
        report.found(),
        start.elapsed()
    );
    println!(
        "   {} resized, {} skipped, {} failed",
        style(report.resized()).green(),
        style(report.skipped()).yellow(),
        style(report.failed()).red()
    );

    let failures: Vec<_> = report
        .outcomes
        .iter()
        .enumerate()
        .filter_map(|(i, outcome)| match outcome {
            ImageOutcome::Failed(error) => Some((i + 1, error)),
            _ => None,
        })
        .collect();

    if !failures.is_empty() {
        println!();
        println!("{}", style("Images left unchanged:").red());
        for (index, error) in failures {
            println!("  - image {}: {}", index, error);
        }
    }

    println!(
        "{} Updated file saved to {}",
        style("✓").green(),
        file.display()
    );
}
