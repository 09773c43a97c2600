use anyhow::Context;
use hough_lines::app::{write_json, LinesDump};
use hough_lines::{draw_lines, find_lines_image_trace, luminance_image, Kernel, LineParams};
use image::ImageReader;
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input: PathBuf = args
        .next()
        .expect("usage: dump_lines <image> [--kernel NAME] [--votes N]")
        .into();

    let mut params = LineParams::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--kernel" => {
                let v = args.next().context("expected a kernel name after --kernel")?;
                params.kernel = v.parse::<Kernel>().map_err(anyhow::Error::msg)?;
            }
            "--votes" => {
                let v = args.next().context("expected an integer after --votes")?;
                params.vote_threshold = v
                    .parse()
                    .context("could not parse vote threshold (use integer >= 1)")?;
                if params.vote_threshold == 0 {
                    anyhow::bail!("vote threshold must be >= 1");
                }
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    let img = ImageReader::open(&input)?.decode()?;
    let luma = luminance_image(&img)?;
    let gray = hough_lines::grid_to_gray(&luma);

    let started = Instant::now();
    let res = find_lines_image_trace(&gray, &params)?;
    let total_ms = started.elapsed().as_secs_f64() * 1000.0;

    println!("image {}x{} pixels", img.width(), img.height());
    println!("lines: {:5.2} ms", total_ms);
    println!(" - edges: {:5.2} ms", res.edges_ms);
    println!(" - hough: {:5.2} ms", res.hough_ms);
    println!(
        "Detected {} lines (kernel={}, votes={})",
        res.lines.len(),
        params.kernel,
        params.vote_threshold
    );

    let json_out = input.with_extension("lines.json");
    let dump = LinesDump::from_result(&input, img.width(), img.height(), &params, &res);
    write_json(&json_out, &dump)?;
    println!("Saved JSON dump to {}", json_out.display());

    let out = input.with_extension("lines.png");
    draw_lines(&img.to_rgb8(), &res.lines).save(&out)?;
    println!("Saved visualization to {}", out.display());

    Ok(())
}
