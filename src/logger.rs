//! Logging setup.
//!
//! The interactive player owns the terminal, so records go to a file when
//! one is given. Without a file an interactive run only reports warnings on
//! stderr, all of which are raised before the terminal is taken over. The
//! headless commands log to stderr at the requested level.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// Map a `-v` count to a level filter.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Level for a run. An interactive run without a log file is capped at
/// warnings, whatever `-v` or `RUST_LOG` ask for.
fn max_level(verbose: u8, to_file: bool, interactive: bool) -> LevelFilter {
    if interactive && !to_file {
        LevelFilter::Warn
    } else {
        level_for(verbose)
    }
}

/// Install the global logger. `RUST_LOG` overrides the `-v` level, except
/// for an interactive run without a file.
pub fn init(verbose: u8, file: Option<&Path>, interactive: bool) -> Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(max_level(verbose, file.is_some(), interactive));

    match file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.parse_default_env();
            builder.target(Target::Pipe(Box::new(file)));
            builder.write_style(WriteStyle::Never);
        }
        None => {
            if !interactive {
                builder.parse_default_env();
            }
            builder.target(Target::Stderr);
        }
    }

    builder.try_init().context("Logger already initialized")?;

    if interactive && file.is_none() && verbose > 0 {
        log::warn!("-v needs --log-file while the terminal is in use; showing warnings only");
    }
    Ok(())
}
