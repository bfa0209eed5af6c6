use glam::DVec2;
use serde::Serialize;

use super::Chain;

/// Reach ratio above which the arm counts as fully extended.
pub const POSITION_SINGULARITY_RATIO: f64 = 0.95;

/// Tolerance, in degrees, around a straight (180°) interior joint.
pub const COLLINEAR_TOLERANCE_DEG: f64 = 8.0;

/// Readouts derived from a solved pose. Purely informational; nothing here
/// feeds back into the solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Interior joint angles in degrees, `[0, 360)`; entry `i` belongs to
    /// joint `i + 1`.
    pub joint_angles: Vec<f64>,
    pub end_effector_distance: f64,
    pub reach_ratio: f64,
    pub position_singularity: bool,
    pub velocity_singularity: bool,
}

impl Diagnostics {
    pub fn derive(chain: &Chain, anchor: DVec2) -> Self {
        let joints = chain.joints();
        let joint_angles: Vec<f64> = joints
            .windows(3)
            .map(|w| interior_angle(w[0], w[1], w[2]))
            .collect();

        let end_effector_distance = chain
            .end_effector()
            .map_or(0.0, |end| end.distance(anchor));

        let reach = chain.reach();
        let reach_ratio = if reach > 0.0 {
            end_effector_distance / reach
        } else {
            0.0
        };

        let velocity_singularity = joint_angles
            .iter()
            .any(|a| (a - 180.0).abs() < COLLINEAR_TOLERANCE_DEG);

        Diagnostics {
            joint_angles,
            end_effector_distance,
            reach_ratio,
            position_singularity: reach_ratio > POSITION_SINGULARITY_RATIO,
            velocity_singularity,
        }
    }

    pub fn singularity(&self) -> bool {
        self.position_singularity || self.velocity_singularity
    }
}

/// Angle at `curr` swept from the direction of `prev` to the direction of
/// `next`, in degrees normalized to `[0, 360)`.
pub fn interior_angle(prev: DVec2, curr: DVec2, next: DVec2) -> f64 {
    let a1 = (prev - curr).to_angle();
    let a2 = (next - curr).to_angle();
    let angle = (a2 - a1).to_degrees();
    let angle = if angle < 0.0 { angle + 360.0 } else { angle };
    // -0.0 and rounding right below 360 both land back on the closed end.
    if angle >= 360.0 { angle - 360.0 } else { angle }
}
