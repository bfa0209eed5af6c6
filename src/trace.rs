//! Headless runs: step the engine without a terminal and record each frame
//! as a JSON line.

use std::io::Write;

use anyhow::{Context, Result, bail};
use glam::DVec2;
use serde::Serialize;

use crate::engine::{Engine, EngineConfig, Mode};
use crate::input::{Pointer, Snapshot};
use crate::kinematics::Diagnostics;
use crate::types::Surface;

pub struct TraceOptions {
    pub frames: usize,
    pub surface: Surface,
    /// Pointer positions fed one per frame; the last one is held. Empty
    /// means no pointer at all.
    pub pointer: Vec<DVec2>,
}

#[derive(Debug, Serialize)]
pub struct TraceRecord<'a> {
    pub frame: usize,
    pub time: f64,
    pub mode: Mode,
    pub target: DVec2,
    pub joints: &'a [DVec2],
    pub diagnostics: &'a Diagnostics,
}

/// Surface of `width × height` one-pixel cells. Both sides must round to a
/// cell count the terminal types can hold.
pub fn pixel_surface(width: f64, height: f64) -> Result<Surface> {
    let cells = |value: f64, side: &str| -> Result<u16> {
        let n = value.round();
        if !(1.0..=u16::MAX as f64).contains(&n) {
            bail!(
                "Surface {side} must be between 1 and {} pixels, got {value}",
                u16::MAX
            );
        }
        Ok(n as u16)
    };
    Ok(Surface {
        columns: cells(width, "width")?,
        rows: cells(height, "height")?,
        cell_width: 1.0,
        cell_height: 1.0,
    })
}

/// Pointer for frame `i` of a scripted run.
fn scripted(pointer: &[DVec2], i: usize) -> Pointer {
    match pointer.get(i).or(pointer.last()) {
        Some(&p) => Pointer::Present(p),
        None => Pointer::Absent,
    }
}

pub fn run<W: Write>(
    out: &mut W,
    config: EngineConfig,
    reduced_motion: bool,
    options: &TraceOptions,
) -> Result<()> {
    let mut engine = Engine::new(config, options.surface, reduced_motion);
    log::info!(
        "Tracing {} frames on a {:.0}x{:.0} px surface",
        options.frames,
        options.surface.width(),
        options.surface.height(),
    );

    for frame in 0..options.frames {
        engine.update(Snapshot {
            pointer: scripted(&options.pointer, frame),
            resize: None,
        });
        let record = TraceRecord {
            frame,
            time: engine.time(),
            mode: engine.mode(),
            target: engine.target(),
            joints: engine.chain().joints(),
            diagnostics: engine.diagnostics(),
        };
        serde_json::to_writer(&mut *out, &record)
            .with_context(|| format!("Failed to write frame {frame}"))?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Parse `X,Y` into a point.
pub fn parse_point(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate {v:?}: {e}"))
    };
    let point = DVec2::new(parse(x)?, parse(y)?);
    if !point.is_finite() {
        return Err(format!("coordinates must be finite, got {s:?}"));
    }
    Ok(point)
}
