use crate::types::{Circle, DrawCommand, RadialGlow};

use super::{BLUE, PALE, Resolve, Scene, tint};

/// A glow, a ring and a dot on every joint. The base is the largest, the
/// end-effector next and brighter, interior joints the smallest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Joints;

fn radius(index: usize, count: usize) -> f64 {
    if index == 0 {
        5.0
    } else if index + 1 == count {
        4.0
    } else {
        3.0
    }
}

impl Resolve for Joints {
    fn resolve(&self, scene: &Scene, ops: &mut Vec<DrawCommand>) {
        let count = scene.joints.len();
        for (index, &center) in scene.joints.iter().enumerate() {
            let r = radius(index, count);
            let is_end = index + 1 == count;

            ops.push(DrawCommand::RadialGlow(RadialGlow {
                center,
                radius: r * 4.0,
                stops: vec![
                    (0.0, tint(BLUE, if is_end { 0.25 } else { 0.15 })),
                    (1.0, tint(BLUE, 0.0)),
                ],
            }));
            ops.push(DrawCommand::Circle(Circle {
                center,
                radius: r,
                fill: None,
                outline: Some(tint(BLUE, if is_end { 0.7 } else { 0.4 })),
            }));
            ops.push(DrawCommand::Circle(Circle {
                center,
                radius: r * 0.5,
                fill: Some(tint(PALE, if is_end { 0.6 } else { 0.3 })),
                outline: None,
            }));
        }
    }
}
