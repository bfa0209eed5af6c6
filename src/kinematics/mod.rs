//! Kinematics: the arm model and its solver.
//!
//! A `Chain` is positioned by forward/backward reaching passes, and
//! `Diagnostics` reads joint angles and singularities off the result.
//! Nothing here knows about frames, pointers or terminals.

mod chain;
pub mod diagnostics;

pub use chain::Chain;
pub use diagnostics::{Diagnostics, interior_angle};
