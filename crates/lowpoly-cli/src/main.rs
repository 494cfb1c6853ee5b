use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::imageops::FilterType;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::fmt::SubscriberBuilder;

use lowpoly::delaunay::{extract_triangles, triangulate};
use lowpoly::mesh::Mesh;

mod extract;
mod render;

#[derive(Parser)]
#[command(name = "lowpoly")]
#[command(about = "Low-polygon image stylizer")]
struct Cli {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Stylize an image into a low-polygon rendering.
    Render {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Target number of gradient-salient points to extract.
        #[arg(long, default_value_t = 400)]
        points: usize,
        /// Additional uniformly random interior points.
        #[arg(long, default_value_t = 50)]
        salt: usize,
        /// Rescale factor applied to the source image before extraction.
        #[arg(long, default_value_t = 1.0)]
        scale: f32,
        /// Seed for the salt-noise RNG; fixed by default for reproducibility.
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cli = Cli::parse();
    match cli.action {
        Action::Render {
            input,
            output,
            points,
            salt,
            scale,
            seed,
        } => render_command(input, output, points, salt, scale, seed),
    }
}

fn render_command(
    input: PathBuf,
    output: PathBuf,
    points: usize,
    salt: usize,
    scale: f32,
    seed: u64,
) -> Result<()> {
    tracing::info!(input = %input.display(), points, salt, scale, "render");

    let mut img = image::open(&input)
        .with_context(|| format!("decoding {}", input.display()))?
        .to_rgb8();

    if (scale - 1.0).abs() > f32::EPSILON {
        let (w, h) = img.dimensions();
        let new_w = ((w as f32) * scale).round().max(1.0) as u32;
        let new_h = ((h as f32) * scale).round().max(1.0) as u32;
        img = image::imageops::resize(&img, new_w, new_h, FilterType::Triangle);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let candidates = extract::extract_points(&img, points, salt, &mut rng);
    tracing::info!(candidate_count = candidates.len(), "extracted points");

    let mut mesh = Mesh::new();
    let start = triangulate(&mut mesh, &candidates)
        .map_err(|e| anyhow::anyhow!("triangulation failed: {e}"))?;
    let triangles = extract_triangles(&mesh, start)
        .map_err(|e| anyhow::anyhow!("triangle extraction failed: {e}"))?;
    tracing::info!(triangle_count = triangles.len(), "triangulated");
    mesh.free_graph(start);

    let rendered = render::render(&img, &triangles);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    rendered
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(output = %output.display(), "wrote render");
    Ok(())
}
