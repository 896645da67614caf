mod command;
mod config;
mod error;
mod events;
mod map_file;
mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;
use crate::events::{MapEvent, Stamped};
use crate::map_file::MapFile;
use crate::state::AppState;

fn emit(out: &mut impl Write, events: &[MapEvent]) -> Result<(), AppError> {
    for event in events {
        serde_json::to_writer(&mut *out, &Stamped::now(event))?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let map_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(config::map_path);
    let width = config::canvas_width();
    let height = config::canvas_height();
    tracing::info!(path = %map_path.display(), width, height, "loading map");

    let loaded = match MapFile::load(&map_path).and_then(MapFile::into_parts) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "failed to load map");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        regions = loaded.registry.len(),
        seeds = loaded.seeds.len(),
        "map loaded"
    );

    let (mut state, startup) = match AppState::new(loaded, width, height) {
        Ok(built) => built,
        Err(e) => {
            tracing::error!(error = %e, "failed to build region mask");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = emit(&mut out, &startup) {
        tracing::error!(error = %e, "failed to write events");
        return ExitCode::FAILURE;
    }

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "failed to read command");
                return ExitCode::FAILURE;
            }
        };

        let events = match command::parse_line(&line) {
            Ok(Some(cmd)) => state.dispatch(cmd),
            Ok(None) => continue,
            Err(message) => {
                tracing::warn!(%line, %message, "rejected command");
                vec![MapEvent::Error { message }]
            }
        };

        if let Err(e) = emit(&mut out, &events) {
            tracing::error!(error = %e, "failed to write events");
            return ExitCode::FAILURE;
        }
    }

    tracing::info!("input closed, shutting down");
    ExitCode::SUCCESS
}
