use crate::types::{DrawCommand, RadialGlow};

use super::{BLUE, Resolve, Scene, tint};

/// Breathing highlight on the end-effector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effector;

impl Resolve for Effector {
    fn resolve(&self, scene: &Scene, ops: &mut Vec<DrawCommand>) {
        let Some(&end) = scene.joints.last() else {
            return;
        };
        let pulse = (scene.time * 2.0).sin();
        ops.push(DrawCommand::RadialGlow(RadialGlow {
            center: end,
            radius: 12.0 + 4.0 * pulse,
            stops: vec![
                (0.0, tint(BLUE, 0.15 + 0.1 * pulse)),
                (1.0, tint(BLUE, 0.0)),
            ],
        }));
    }
}
