use glam::DVec2;

use crate::types::{DrawCommand, Rgba, Stroke, Text};

use super::{BLUE, Resolve, Scene, WARNING, WHITE, tint};

/// Engineering annotations: joint angles next to each interior joint and a
/// small block of figures beside the pointer.
///
/// Only drawn while `Scene::readout_at` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readout;

impl Resolve for Readout {
    fn resolve(&self, scene: &Scene, ops: &mut Vec<DrawCommand>) {
        let Some(pointer) = scene.readout_at else {
            return;
        };
        let Some(&end) = scene.joints.last() else {
            return;
        };
        let diagnostics = scene.diagnostics;

        for (i, angle) in diagnostics.joint_angles.iter().enumerate() {
            let joint = scene.joints[i + 1];
            ops.push(text(
                joint + DVec2::new(14.0, -8.0),
                format!("θ{} {:.1}°", i + 1, angle),
                tint(BLUE, 0.7),
            ));
        }

        ops.push(text(
            pointer + DVec2::new(20.0, -14.0),
            format!("{}, {}", end.x.floor(), end.y.floor()),
            tint(WHITE, 0.55),
        ));
        ops.push(text(
            pointer + DVec2::new(20.0, 2.0),
            format!("r {:.0}", diagnostics.end_effector_distance),
            tint(WHITE, 0.45),
        ));

        if diagnostics.singularity() {
            ops.push(text(
                pointer + DVec2::new(20.0, 16.0),
                "SINGULARITY".to_string(),
                tint(WARNING, 0.7),
            ));
        }

        ops.push(DrawCommand::Stroke(Stroke {
            points: vec![pointer + DVec2::new(6.0, 0.0), pointer + DVec2::new(17.0, -6.0)],
            width: 0.5,
            color: tint(WHITE, 0.08),
            glow: None,
        }));
    }
}

fn text(position: DVec2, text: String, color: Rgba) -> DrawCommand {
    DrawCommand::Text(Text {
        position,
        text,
        color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::layers::fixtures;
    use crate::kinematics::{Chain, Diagnostics};

    fn labels(ops: &[DrawCommand]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                DrawCommand::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn hidden_without_pointer() {
        let chain = fixtures::chain();
        let diagnostics = Diagnostics::derive(&chain, DVec2::new(500.0, 500.0));
        let mut ops = Vec::new();
        Readout.resolve(&fixtures::scene(&chain, &diagnostics), &mut ops);
        assert!(ops.is_empty());
    }

    #[test]
    fn bent_arm_shows_angles_and_figures() {
        let chain = fixtures::chain();
        let diagnostics = Diagnostics::derive(&chain, DVec2::new(500.0, 500.0));
        let mut scene = fixtures::scene(&chain, &diagnostics);
        scene.readout_at = Some(DVec2::new(700.0, 480.0));
        let mut ops = Vec::new();
        Readout.resolve(&scene, &mut ops);

        assert_eq!(
            labels(&ops),
            vec!["θ1 270.0°", "θ2 270.0°", "710, 500", "r 210"]
        );
        match ops.last() {
            Some(DrawCommand::Stroke(s)) => {
                assert_eq!(s.points, vec![DVec2::new(706.0, 480.0), DVec2::new(717.0, 474.0)]);
            }
            other => panic!("expected leader line, got {other:?}"),
        }
    }

    #[test]
    fn resting_pose_warns() {
        let chain = Chain::initialize(DVec2::new(500.0, 500.0), 3, 210.0);
        let diagnostics = Diagnostics::derive(&chain, DVec2::new(500.0, 500.0));
        let mut scene = fixtures::scene(&chain, &diagnostics);
        scene.readout_at = Some(DVec2::new(100.0, 100.0));
        let mut ops = Vec::new();
        Readout.resolve(&scene, &mut ops);
        let labels = labels(&ops);
        assert_eq!(labels.last().map(String::as_str), Some("SINGULARITY"));
        assert!(labels.contains(&"θ1 180.0°".to_string()));
    }
}
