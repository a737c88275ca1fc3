// main.rs
//
// Builds a {p, q} tiling from the command line, logs a summary of the
// projection from the disk centre and, with `svg-io`, writes it to svg/.
//
//     hyptile [p] [q] [level]        (defaults: 5 5 3)
//
// Log verbosity follows RUST_LOG, e.g. `RUST_LOG=hyptile=debug`.

use hyptile::{Tiling, ViewOptions, Viewpoint, project};
#[cfg(feature = "svg-io")]
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn arg_or(args: &[String], index: usize, default: usize) -> Result<usize, String> {
    match args.get(index) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("argument {index} must be a non-negative integer, got {raw:?}")),
    }
}

/// Path of the SVG for {p, q} inside `dir`, creating `dir` if needed.
#[cfg(feature = "svg-io")]
fn svg_path(dir: &Path, p: usize, q: usize) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    Ok(dir.join(format!("tiling_{p}_{q}.svg")))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let parsed = arg_or(&args, 1, 5).and_then(|p| {
        let q = arg_or(&args, 2, 5)?;
        Ok((p, q, arg_or(&args, 3, 3)?))
    });
    let (p, q, level) = match parsed {
        Ok(values) => values,
        Err(message) => {
            error!("{message}");
            eprintln!("usage: hyptile [p] [q] [level]");
            return ExitCode::FAILURE;
        },
    };

    let mut tiling = match Tiling::new(p, q) {
        Ok(tiling) => tiling,
        Err(e) => {
            error!(p, q, "cannot seed tiling: {e}");
            return ExitCode::FAILURE;
        },
    };
    if let Err(e) = tiling.set_level(level) {
        error!(level, "growing failed: {e}");
        return ExitCode::FAILURE;
    }
    info!(
        p,
        q,
        level = tiling.level(),
        tiles = tiling.tiles().len(),
        vertices = tiling.vertices().len(),
        crossings = tiling.crossings().len(),
        "tiling built"
    );
    for issue in tiling.validate() {
        error!("{issue}");
    }

    let views = match project(&tiling, &Viewpoint::default(), &ViewOptions::default()) {
        Ok(views) => views,
        Err(e) => {
            error!("projection failed: {e}");
            return ExitCode::FAILURE;
        },
    };
    let visible = views.iter().filter(|view| view.opacity > 0.0).count();
    info!(visible, hidden = views.len() - visible, "projected from the centre");

    #[cfg(feature = "svg-io")]
    {
        use hyptile::view::svg::{DEFAULT_SCALE, to_document};

        let file = match svg_path(Path::new("svg"), p, q) {
            Ok(file) => file,
            Err(e) => {
                error!("cannot create svg/: {e}");
                return ExitCode::FAILURE;
            },
        };
        match svg::save(&file, &to_document(&views, DEFAULT_SCALE)) {
            Ok(()) => info!(file = %file.display(), "wrote svg"),
            Err(e) => {
                error!(file = %file.display(), "cannot write svg: {e}");
                return ExitCode::FAILURE;
            },
        }
    }

    ExitCode::SUCCESS
}
