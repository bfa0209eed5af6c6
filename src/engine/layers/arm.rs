use crate::types::{DrawCommand, Glow, Stroke};

use super::{BLUE, PALE, Resolve, Scene, tint};

/// The links, drawn three times (wide and dim, medium, thin and bright) so
/// the passes stack into a bloom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arm;

impl Resolve for Arm {
    fn resolve(&self, scene: &Scene, ops: &mut Vec<DrawCommand>) {
        if scene.joints.len() < 2 {
            return;
        }
        let points = scene.joints.to_vec();

        ops.push(DrawCommand::Stroke(Stroke {
            points: points.clone(),
            width: 6.0,
            color: tint(BLUE, 0.08),
            glow: Some(Glow {
                color: tint(BLUE, 0.3),
                blur: 20.0,
            }),
        }));
        ops.push(DrawCommand::Stroke(Stroke {
            points: points.clone(),
            width: 2.5,
            color: tint(BLUE, 0.45),
            glow: Some(Glow {
                color: tint(BLUE, 0.5),
                blur: 12.0,
            }),
        }));
        ops.push(DrawCommand::Stroke(Stroke {
            points,
            width: 1.0,
            color: tint(PALE, 0.35),
            glow: None,
        }));
    }
}
