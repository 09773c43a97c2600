//! hough-lines CLI: edge maps, vote histograms and line overlays for images.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hough_lines::app::{load_config, run_detection, DetectionMode, LineConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hough-lines")]
#[command(about = "Detect straight lines in images with a Hough transform")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one edge-magnitude map per kernel.
    Edges {
        /// Path to the input image.
        image: PathBuf,

        /// Kernel to export; repeat for several. All four when omitted.
        #[arg(long = "kernel")]
        kernels: Vec<String>,

        #[command(flatten)]
        out: OutputArgs,
    },
    /// Detect lines and write the histogram plot, overlay and JSON dump.
    Lines {
        /// Path to the input image.
        image: PathBuf,

        /// Kernel feeding the vote (laplace, sobel_horizontal, sobel_vertical, sobel_combined).
        #[arg(long)]
        kernel: Option<String>,

        /// Minimum edge magnitude for a pixel to vote.
        #[arg(long)]
        edge_threshold: Option<u8>,

        /// Vote count at which a (theta, r) cell becomes a line.
        #[arg(long)]
        vote_threshold: Option<u32>,

        /// Number of angle buckets over [0, π).
        #[arg(long)]
        theta_buckets: Option<usize>,

        /// Path for the JSON dump; defaults to `<stem>.lines.json`.
        #[arg(long)]
        json: Option<PathBuf>,

        #[command(flatten)]
        out: OutputArgs,
    },
    /// Run from a JSON config file.
    Config {
        /// Path to the config file.
        #[arg(long)]
        path: PathBuf,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Directory for outputs; defaults to the input's directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: Option<&str>) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.unwrap_or("info"))),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = match cli.command {
        Commands::Edges {
            image,
            kernels,
            out,
        } => LineConfig {
            image,
            mode: Some(DetectionMode::Edges),
            kernels: (!kernels.is_empty()).then_some(kernels),
            output_dir: out.out_dir,
            log_level: out.log_level,
            ..Default::default()
        },
        Commands::Lines {
            image,
            kernel,
            edge_threshold,
            vote_threshold,
            theta_buckets,
            json,
            out,
        } => LineConfig {
            image,
            mode: Some(DetectionMode::Lines),
            kernel,
            edge_threshold,
            vote_threshold,
            theta_buckets,
            output_json: json,
            output_dir: out.out_dir,
            log_level: out.log_level,
            ..Default::default()
        },
        Commands::Config { path } => load_config(&path)?,
    };

    init_tracing(cfg.log_level.as_deref());

    let written = run_detection(cfg)?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
