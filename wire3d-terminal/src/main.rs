/// Wire3D Terminal Viewer - Hidden-line wireframes of the mesh catalog
///
/// Controls:
///   - WASD / Arrow Keys: Rotate the mesh
///   - E/R: Roll rotation
///   - Tab / 1-5: Switch mesh
///   - L: Toggle lines-only mode
///   - P: Toggle perspective
///   - Space: Pause spinning
///   - Q/ESC: Quit
use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wire3d_core::{Catalog, CullMode, MeshId, ProjectionMode};
use wire3d_terminal::{TerminalApp, ViewerConfig};

#[derive(Debug, Parser)]
#[command(name = "wire3d-terminal")]
#[command(version)]
#[command(about = "Hidden-line wireframe viewer for the built-in meshes.", long_about = None)]
struct Args {
    /// Mesh to show first.
    #[arg(long, short, default_value_t = MeshId::Default)]
    mesh: MeshId,
    /// Draw every edge instead of hiding back faces.
    #[arg(long)]
    lines_only: bool,
    /// Use perspective instead of orthographic projection.
    #[arg(long, short)]
    perspective: bool,
    /// Print the catalog with validation reports and exit.
    #[arg(long)]
    list: bool,
    /// Frames per second to aim for.
    #[arg(long, default_value_t = 30)]
    fps: u64,
    /// Where to put the log output.
    #[arg(long, short)]
    log: Option<PathBuf>,
}

impl From<&Args> for ViewerConfig {
    fn from(args: &Args) -> Self {
        Self {
            mesh: args.mesh,
            cull_mode: if args.lines_only {
                CullMode::LinesOnly
            } else {
                CullMode::Backface
            },
            projection: if args.perspective {
                ProjectionMode::Perspective
            } else {
                ProjectionMode::Orthographic
            },
            target_fps: args.fps,
            ..ViewerConfig::default()
        }
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let catalog = Catalog::builtin();
    let reports = catalog.validate_all()?;

    if args.list {
        for (id, report) in reports {
            println!("{id:<10} {report}");
        }
        return Ok(());
    }

    let mut app = TerminalApp::new(catalog, ViewerConfig::from(&args))?;
    app.run()?;

    Ok(())
}
