//! Engine: the per-frame simulation.
//!
//! Owns the chain, the smoothed cursor and the elapsed-time counter. Each
//! `step` folds one mailbox snapshot into that state, solves the arm and
//! resolves the scene into `DrawCommand`s.
//!
//! The engine never deals with terminals, cells or ANSI codes.

pub mod layers;
mod motion;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::input::{Pointer, Snapshot};
use crate::kinematics::{Chain, Diagnostics};
use crate::types::{DrawCommand, Surface};
use layers::{Layer, Resolve, Scene};

pub use motion::{FRAME_DT, OFF_SURFACE, idle_target, on_surface, smooth};

/// Arm geometry and solver tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub segments: usize,
    pub segment_length: f64,
    pub iterations: usize,
    pub pointer_lerp: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            segments: 3,
            segment_length: 210.0,
            iterations: 8,
            pointer_lerp: 0.08,
        }
    }
}

/// What is driving the end-effector this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Tracking,
    Idle,
    Reduced,
}

pub struct Engine {
    config: EngineConfig,
    reduced_motion: bool,
    surface: Surface,
    anchor: DVec2,
    chain: Chain,
    pointer: Pointer,
    smoothed: DVec2,
    target: DVec2,
    time: f64,
    diagnostics: Diagnostics,
}

impl Engine {
    pub fn new(config: EngineConfig, surface: Surface, reduced_motion: bool) -> Self {
        let anchor = surface.center();
        let chain = Chain::initialize(anchor, config.segments, config.segment_length);
        let diagnostics = Diagnostics::derive(&chain, anchor);
        let target = chain.end_effector().unwrap_or(anchor);
        Engine {
            config,
            reduced_motion,
            surface,
            anchor,
            chain,
            pointer: Pointer::Absent,
            smoothed: OFF_SURFACE,
            target,
            time: 0.0,
            diagnostics,
        }
    }

    /// Replace the surface and regenerate the chain in its resting pose
    /// around the new center. Whatever pose the arm had is discarded.
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        self.anchor = surface.center();
        self.chain = Chain::initialize(
            self.anchor,
            self.config.segments,
            self.config.segment_length,
        );
        self.target = self.chain.end_effector().unwrap_or(self.anchor);
        self.diagnostics = Diagnostics::derive(&self.chain, self.anchor);
        log::info!(
            "Surface {}x{} cells ({:.0}x{:.0} px), anchor at ({:.0}, {:.0})",
            surface.columns,
            surface.rows,
            surface.width(),
            surface.height(),
            self.anchor.x,
            self.anchor.y,
        );
    }

    /// Advance one frame and return the draw commands for it.
    pub fn step(&mut self, input: Snapshot) -> Vec<DrawCommand> {
        self.update(input);
        self.resolve()
    }

    /// Advance one frame without producing draw commands.
    pub fn update(&mut self, input: Snapshot) {
        if let Some(surface) = input.resize {
            self.resize(surface);
        }

        self.time += FRAME_DT;

        if self.pointer.position().is_some() != input.pointer.position().is_some() {
            match input.pointer {
                Pointer::Present(p) => log::debug!("Pointer entered at ({:.0}, {:.0})", p.x, p.y),
                Pointer::Absent => log::debug!("Pointer left"),
            }
        }
        self.pointer = input.pointer;

        if let Some(raw) = self.pointer.position().filter(|p| on_surface(*p)) {
            self.smoothed = smooth(self.smoothed, raw, self.config.pointer_lerp);
        }

        // A frozen arm keeps the target it has; nothing is chasing it.
        if !self.reduced_motion {
            self.target = if on_surface(self.smoothed) {
                self.smoothed
            } else {
                idle_target(self.anchor, self.time)
            };
            self.chain
                .solve(self.target, self.anchor, self.config.iterations);
        }

        self.diagnostics = Diagnostics::derive(&self.chain, self.anchor);
    }

    /// Draw commands for the current state, back to front.
    pub fn resolve(&self) -> Vec<DrawCommand> {
        let scene = Scene {
            surface: self.surface,
            joints: self.chain.joints(),
            anchor: self.anchor,
            cursor: Some(self.smoothed).filter(|p| on_surface(*p)),
            readout_at: self.readout_position(),
            time: self.time,
            diagnostics: &self.diagnostics,
        };

        let mut ops = Vec::new();
        for layer in Layer::ALL {
            layer.resolve(&scene, &mut ops);
        }
        ops
    }

    /// Raw pointer position when text readouts should be drawn.
    fn readout_position(&self) -> Option<DVec2> {
        if self.reduced_motion {
            return None;
        }
        self.pointer.position().filter(|p| on_surface(*p))
    }

    pub fn mode(&self) -> Mode {
        if self.reduced_motion {
            Mode::Reduced
        } else if on_surface(self.smoothed) {
            Mode::Tracking
        } else {
            Mode::Idle
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn anchor(&self) -> DVec2 {
        self.anchor
    }

    pub fn target(&self) -> DVec2 {
        self.target
    }

    pub fn smoothed(&self) -> DVec2 {
        self.smoothed
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
