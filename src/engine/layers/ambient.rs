use crate::types::{DrawCommand, RadialGlow};

use super::{BLUE, Resolve, Scene, tint};

/// Faint wash of light around the smoothed cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ambient;

impl Resolve for Ambient {
    fn resolve(&self, scene: &Scene, ops: &mut Vec<DrawCommand>) {
        let Some(cursor) = scene.cursor else {
            return;
        };
        let radius = scene.surface.width().max(scene.surface.height()) * 0.35;
        ops.push(DrawCommand::RadialGlow(RadialGlow {
            center: cursor,
            radius,
            stops: vec![
                (0.0, tint(BLUE, 0.04)),
                (0.4, tint(BLUE, 0.012)),
                (1.0, tint((0, 0, 0), 0.0)),
            ],
        }));
    }
}
