//! Shared application-level helpers for the CLI and examples.
//!
//! These functions wire up I/O (load image, luminance extraction, PNG and
//! JSON output) around the `hough-lines` detection APIs so both the CLI and
//! examples share the same behavior.

use crate::draw::draw_lines;
use crate::image::{grid_to_gray, histogram_image};
use crate::luma::luminance_image;
use anyhow::{Context, Result};
use hough_lines_core::{detect_edges, find_lines_with_trace, Kernel, LineParams, LineResult};
use image::ImageReader;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Write, path::Path, path::PathBuf, str::FromStr};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Write one edge map per requested kernel.
    Edges,
    /// Run the full line detector.
    Lines,
}

impl FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "edges" | "edge" => Ok(DetectionMode::Edges),
            "lines" | "line" | "hough" => Ok(DetectionMode::Lines),
            other => Err(format!("invalid mode '{other}', expected edges|lines")),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LineConfig {
    pub image: PathBuf,
    pub mode: Option<DetectionMode>,
    /// Kernel feeding the line detector (`lines` mode).
    pub kernel: Option<String>,
    /// Kernels to export (`edges` mode); all four when unset.
    pub kernels: Option<Vec<String>>,
    pub edge_threshold: Option<u8>,
    pub vote_threshold: Option<u32>,
    pub theta_buckets: Option<usize>,
    /// Directory for image outputs; defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    pub output_json: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineOut {
    pub r: f64,
    pub theta: f64,
    pub theta_deg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinesDump {
    pub image: String,
    pub width: u32,
    pub height: u32,
    pub kernel: String,
    pub edge_threshold: u8,
    pub vote_threshold: u32,
    pub theta_buckets: usize,
    pub r_range: usize,
    pub max_votes: u32,
    pub total_votes: u64,
    pub edges_ms: f64,
    pub hough_ms: f64,
    pub lines: Vec<LineOut>,
}

impl LinesDump {
    /// Summary of one detection run on `image` (original size `width × height`).
    pub fn from_result(
        image: &Path,
        width: u32,
        height: u32,
        params: &LineParams,
        res: &LineResult,
    ) -> Self {
        Self {
            image: image.to_string_lossy().into_owned(),
            width,
            height,
            kernel: params.kernel.name().to_string(),
            edge_threshold: params.edge_threshold,
            vote_threshold: params.vote_threshold,
            theta_buckets: params.theta_buckets,
            r_range: res.accumulator.r_range(),
            max_votes: res.accumulator.max_votes(),
            total_votes: res.accumulator.total_votes(),
            edges_ms: res.edges_ms,
            hough_ms: res.hough_ms,
            lines: res
                .lines
                .iter()
                .map(|l| LineOut {
                    r: l.r,
                    theta: l.theta,
                    theta_deg: l.theta_degrees(),
                })
                .collect(),
        }
    }
}

/// Run the configured detection and return every file written.
pub fn run_detection(cfg: LineConfig) -> Result<Vec<PathBuf>> {
    let mode = cfg.mode.unwrap_or(DetectionMode::Lines);
    match mode {
        DetectionMode::Edges => run_edges(cfg),
        DetectionMode::Lines => run_lines(cfg),
    }
}

fn run_edges(cfg: LineConfig) -> Result<Vec<PathBuf>> {
    let kernels = match &cfg.kernels {
        Some(names) if !names.is_empty() => names
            .iter()
            .map(|n| parse_kernel(n))
            .collect::<Result<Vec<_>>>()?,
        _ => Kernel::ALL.to_vec(),
    };

    let img = ImageReader::open(&cfg.image)
        .with_context(|| format!("opening image {}", cfg.image.display()))?
        .decode()
        .with_context(|| format!("decoding image {}", cfg.image.display()))?;
    let luma = luminance_image(&img)?;
    info!(width = luma.w, height = luma.h, "loaded {}", cfg.image.display());

    let mut written = Vec::with_capacity(kernels.len());
    for kernel in kernels {
        let edges = detect_edges(&luma, kernel)?;
        let out = output_path(&cfg, &format!("edges_{}.png", kernel.name()))?;
        grid_to_gray(&edges)
            .save(&out)
            .with_context(|| format!("writing {}", out.display()))?;
        info!(%kernel, "saved edge map to {}", out.display());
        written.push(out);
    }

    Ok(written)
}

fn run_lines(cfg: LineConfig) -> Result<Vec<PathBuf>> {
    let mut params = LineParams::default();
    apply_params_overrides(&mut params, &cfg)?;
    params.validate()?;

    let img = ImageReader::open(&cfg.image)
        .with_context(|| format!("opening image {}", cfg.image.display()))?
        .decode()
        .with_context(|| format!("decoding image {}", cfg.image.display()))?;
    let luma = luminance_image(&img)?;
    info!(width = luma.w, height = luma.h, "loaded {}", cfg.image.display());

    let res = find_lines_with_trace(&luma, &params)?;
    info!(
        lines = res.lines.len(),
        max_votes = res.accumulator.max_votes(),
        "edges: {:5.2} ms, hough: {:5.2} ms",
        res.edges_ms,
        res.hough_ms
    );
    for line in &res.lines {
        debug!(r = line.r, theta_deg = line.theta_degrees(), "line");
    }

    let mut written = Vec::with_capacity(3);

    let plot_out = output_path(&cfg, "lines_plot.png")?;
    histogram_image(&res.accumulator)
        .save(&plot_out)
        .with_context(|| format!("writing {}", plot_out.display()))?;
    info!("saved vote histogram to {}", plot_out.display());
    written.push(plot_out);

    let overlay_out = output_path(&cfg, "lines.png")?;
    draw_lines(&img.to_rgb8(), &res.lines)
        .save(&overlay_out)
        .with_context(|| format!("writing {}", overlay_out.display()))?;
    info!("saved line overlay to {}", overlay_out.display());
    written.push(overlay_out);

    let json_out = match cfg.output_json.clone() {
        Some(p) => p,
        None => output_path(&cfg, "lines.json")?,
    };
    let dump = LinesDump::from_result(&cfg.image, img.width(), img.height(), &params, &res);
    write_json(&json_out, &dump)?;
    info!("saved JSON dump to {}", json_out.display());
    written.push(json_out);

    Ok(written)
}

fn apply_params_overrides(params: &mut LineParams, cfg: &LineConfig) -> Result<()> {
    if let Some(k) = &cfg.kernel {
        params.kernel = parse_kernel(k)?;
    }
    if let Some(t) = cfg.edge_threshold {
        params.edge_threshold = t;
    }
    if let Some(t) = cfg.vote_threshold {
        if t == 0 {
            anyhow::bail!("vote threshold must be >= 1");
        }
        params.vote_threshold = t;
    }
    if let Some(n) = cfg.theta_buckets {
        if n == 0 {
            anyhow::bail!("theta buckets must be >= 1");
        }
        params.theta_buckets = n;
    }
    Ok(())
}

fn parse_kernel(name: &str) -> Result<Kernel> {
    Kernel::from_str(name).map_err(anyhow::Error::msg)
}

/// `<output_dir>/<input stem>.<suffix>`, creating `output_dir` if needed.
fn output_path(cfg: &LineConfig, suffix: &str) -> Result<PathBuf> {
    let dir = match &cfg.output_dir {
        Some(d) => {
            std::fs::create_dir_all(d)
                .with_context(|| format!("creating output dir {}", d.display()))?;
            d.clone()
        }
        None => cfg
            .image
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let stem = cfg
        .image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(dir.join(format!("{stem}.{suffix}")))
}

/// Pretty-print `value` as JSON to `path`, with a trailing newline.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let mut json_file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(&mut json_file, value)?;
    json_file.write_all(b"\n")?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<LineConfig> {
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    let cfg: LineConfig = serde_json::from_reader(file)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
