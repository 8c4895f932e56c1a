use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mesh_bvh::{MeshBvh, MeshData, shapes};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::config::InspectConfig;

mod config;
mod obj;

/// Builds a BVH and reports how it came out.
#[derive(Parser)]
struct Args {
    /// Build configuration; written with defaults if it does not exist.
    #[clap(short, long, default_value = "bvh-inspect.toml")]
    config: PathBuf,

    #[clap(subcommand)]
    source: Source,
}

#[derive(Subcommand)]
enum Source {
    /// An N x N x N grid of unit cubes.
    Grid {
        #[clap(short, long)]
        size: usize,
        /// Distance between the minimum corners of neighbouring cubes.
        #[clap(long, default_value_t = 2.0)]
        spacing: f32,
    },
    /// A Wavefront OBJ file.
    Obj { path: PathBuf },
}

fn setup_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing::subscriber::set_global_default(
        Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        ),
    )
    .context("setup tracing subscribers")
}

fn main() -> anyhow::Result<()> {
    setup_logging()?;

    let Args { config, source } = Args::parse();
    let config = InspectConfig::load(&config)?;

    let mesh: MeshData = match source {
        Source::Grid { size, spacing } => shapes::cube_grid(size, spacing),
        Source::Obj { path } => obj::load(&path)?,
    };

    let bvh = MeshBvh::build_with(mesh.as_mesh()?, &config.build);
    let bounds = bvh.root_bounds();

    info!(
        min = ?bounds.min,
        max = ?bounds.max,
        node_bytes = bvh.node_bytes().len(),
        triangle_bytes = bvh.triangle_bytes().len(),
        "built bvh"
    );

    for line in bvh.stats().to_string().lines() {
        info!("{line}");
    }

    Ok(())
}
