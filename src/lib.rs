//! Cursor-driven robot-arm backdrop for the terminal.
//!
//! A FABRIK-solved arm follows the mouse (or sways on its own when there is
//! none), rendered with glow passes and engineering readouts.
//!
//! - `kinematics`: chain, solver, diagnostics
//! - `engine`: per-frame state and scene layers
//! - `renderer`: draw commands to terminal cells
//! - `player`: the terminal host loop

pub mod config;
pub mod engine;
pub mod input;
pub mod kinematics;
pub mod logger;
pub mod menubar;
pub mod player;
pub mod renderer;
pub mod scheduler;
pub mod trace;
pub mod types;
