use glam::DVec2;

/// A chain of joints joined by rigid segments of equal length.
///
/// `joints[0]` is the anchored base, the last joint is the end-effector.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    joints: Vec<DVec2>,
    segment_length: f64,
}

impl Chain {
    /// Build the resting pose: `segments + 1` joints stretched straight up
    /// from `base`, each `segment_length` above the previous.
    pub fn initialize(base: DVec2, segments: usize, segment_length: f64) -> Self {
        let joints = (0..=segments)
            .map(|i| DVec2::new(base.x, base.y - i as f64 * segment_length))
            .collect();
        Chain {
            joints,
            segment_length,
        }
    }

    /// Build a chain from explicit joint positions.
    pub fn from_joints(joints: Vec<DVec2>, segment_length: f64) -> Self {
        Chain {
            joints,
            segment_length,
        }
    }

    pub fn joints(&self) -> &[DVec2] {
        &self.joints
    }

    pub fn segment_length(&self) -> f64 {
        self.segment_length
    }

    pub fn segments(&self) -> usize {
        self.joints.len().saturating_sub(1)
    }

    /// Maximum distance the end-effector can reach from the base.
    pub fn reach(&self) -> f64 {
        self.segments() as f64 * self.segment_length
    }

    pub fn base(&self) -> Option<DVec2> {
        self.joints.first().copied()
    }

    pub fn end_effector(&self) -> Option<DVec2> {
        self.joints.last().copied()
    }

    /// Run `iterations` forward/backward reaching passes in place.
    ///
    /// The iteration count is fixed; the result is approximate for tight
    /// budgets but every pass ends with the base on `anchor` and every
    /// segment at its rest length.
    pub fn solve(&mut self, target: DVec2, anchor: DVec2, iterations: usize) {
        let Some(last) = self.joints.len().checked_sub(1) else {
            return;
        };
        let length = self.segment_length;

        for _ in 0..iterations {
            // Forward: drag the end-effector onto the target.
            self.joints[last] = target;
            for i in (0..last).rev() {
                self.joints[i] = place(self.joints[i + 1], self.joints[i], length);
            }

            // Backward: pin the base back on its anchor.
            self.joints[0] = anchor;
            for i in 1..=last {
                self.joints[i] = place(self.joints[i - 1], self.joints[i], length);
            }
        }
    }
}

/// Position `length` away from `from` on the ray towards `toward`.
///
/// Coincident points divide by 1 instead of 0, which leaves the point on
/// `from` rather than producing NaN.
fn place(from: DVec2, toward: DVec2, length: f64) -> DVec2 {
    let delta = toward - from;
    let mut dist = delta.length();
    if dist == 0.0 {
        dist = 1.0;
    }
    from + delta / dist * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn resting_pose_is_vertical_above_base() {
        let chain = Chain::initialize(DVec2::new(100.0, 400.0), 3, 50.0);
        assert_eq!(
            chain.joints(),
            &[
                DVec2::new(100.0, 400.0),
                DVec2::new(100.0, 350.0),
                DVec2::new(100.0, 300.0),
                DVec2::new(100.0, 250.0),
            ]
        );
        assert_eq!(chain.segments(), 3);
        assert_eq!(chain.reach(), 150.0);
    }

    #[test]
    fn place_keeps_requested_length() {
        let p = place(DVec2::ZERO, DVec2::new(3.0, 4.0), 10.0);
        assert_abs_diff_eq!(p.x, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 8.0, epsilon = 1e-12);
    }

    #[test]
    fn place_on_coincident_points_is_finite() {
        let p = place(DVec2::new(5.0, 5.0), DVec2::new(5.0, 5.0), 10.0);
        assert_eq!(p, DVec2::new(5.0, 5.0));
    }

    #[test]
    fn zero_iterations_leave_chain_untouched() {
        let mut chain = Chain::initialize(DVec2::new(0.0, 0.0), 2, 10.0);
        let before = chain.clone();
        chain.solve(DVec2::new(15.0, 0.0), DVec2::ZERO, 0);
        assert_eq!(chain, before);
    }

    #[test]
    fn empty_chain_solves_to_nothing() {
        let mut chain = Chain::from_joints(Vec::new(), 10.0);
        chain.solve(DVec2::new(1.0, 1.0), DVec2::ZERO, 8);
        assert!(chain.joints().is_empty());
        assert_eq!(chain.reach(), 0.0);
    }
}
