//! Scene layers and their resolve implementations.
//!
//! Each layer lives in its own module with its `Resolve` implementation.
//! `Layer::ALL` lists them back to front.

mod ambient;
mod arm;
mod effector;
mod joints;
mod readout;

pub use ambient::Ambient;
pub use arm::Arm;
pub use effector::Effector;
pub use joints::Joints;
pub use readout::Readout;

use glam::DVec2;

use crate::kinematics::Diagnostics;
use crate::types::{DrawCommand, Rgba, Surface, rgba};

/// Blueprint blue.
pub const BLUE: (u8, u8, u8) = (44, 77, 228);
/// Pale blue used for bright cores.
pub const PALE: (u8, u8, u8) = (160, 185, 255);
pub const WHITE: (u8, u8, u8) = (255, 255, 255);
pub const WARNING: (u8, u8, u8) = (180, 40, 40);

pub fn tint(color: (u8, u8, u8), alpha: f64) -> Rgba {
    rgba(color.0, color.1, color.2, alpha)
}

/// Everything a layer may look at for one frame.
pub struct Scene<'a> {
    pub surface: Surface,
    pub joints: &'a [DVec2],
    pub anchor: DVec2,
    /// Smoothed cursor, once it has reached the surface.
    pub cursor: Option<DVec2>,
    /// Raw pointer, when text readouts are enabled this frame.
    pub readout_at: Option<DVec2>,
    pub time: f64,
    pub diagnostics: &'a Diagnostics,
}

/// Resolve a layer for a given scene into concrete `DrawCommand`s.
pub trait Resolve {
    fn resolve(&self, scene: &Scene, ops: &mut Vec<DrawCommand>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ambient(Ambient),
    Arm(Arm),
    Joints(Joints),
    Effector(Effector),
    Readout(Readout),
}

impl Layer {
    pub const ALL: [Layer; 5] = [
        Layer::Ambient(Ambient),
        Layer::Arm(Arm),
        Layer::Joints(Joints),
        Layer::Effector(Effector),
        Layer::Readout(Readout),
    ];
}

impl Resolve for Layer {
    fn resolve(&self, scene: &Scene, ops: &mut Vec<DrawCommand>) {
        match self {
            Layer::Ambient(l) => l.resolve(scene, ops),
            Layer::Arm(l) => l.resolve(scene, ops),
            Layer::Joints(l) => l.resolve(scene, ops),
            Layer::Effector(l) => l.resolve(scene, ops),
            Layer::Readout(l) => l.resolve(scene, ops),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::kinematics::Chain;

    pub fn surface() -> Surface {
        Surface {
            columns: 125,
            rows: 62,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }

    pub fn chain() -> Chain {
        Chain::from_joints(
            vec![
                DVec2::new(500.0, 500.0),
                DVec2::new(500.0, 290.0),
                DVec2::new(710.0, 290.0),
                DVec2::new(710.0, 500.0),
            ],
            210.0,
        )
    }

    pub fn scene<'a>(chain: &'a Chain, diagnostics: &'a Diagnostics) -> Scene<'a> {
        Scene {
            surface: surface(),
            joints: chain.joints(),
            anchor: DVec2::new(500.0, 500.0),
            cursor: None,
            readout_at: None,
            time: 0.0,
            diagnostics,
        }
    }
}
