//! yellowtail — interactive entry point.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;
use yellowtail::{run, AppConfig, AppError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Yellowtail — kinetic gesture sketchpad              ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Drag to draw.  +/- thickness   Space clear   P pause   Esc quit");
    println!();

    if let Err(e) = configure().and_then(run) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `--config <file.json>` loads settings; `--paused` starts with animation off.
fn configure() -> Result<AppConfig, AppError> {
    let mut cfg_path: Option<PathBuf> = None;
    let mut paused = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or_else(|| {
                    AppError::InvalidConfig("--config needs a file path".into())
                })?;
                cfg_path = Some(PathBuf::from(path));
            }
            "--paused" => paused = true,
            other => {
                return Err(AppError::InvalidConfig(format!("unknown argument {:?}", other)));
            }
        }
    }

    let mut cfg = match cfg_path {
        Some(p) => AppConfig::load(&p)?,
        None    => AppConfig::default(),
    };
    cfg.start_paused |= paused;

    info!(width = cfg.width, height = cfg.height, pool = cfg.pool_size, "starting");
    Ok(cfg)
}
