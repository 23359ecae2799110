//! Oriented bounding boxes and the separating-axis test.

use ds_agent::{KinematicState, VehicleParams};
use ds_core::Vec2;

/// A rectangle of half extents `half_length` x `half_width`, centred on
/// `center` and rotated by `yaw`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrientedBox {
    pub center: Vec2,
    /// Unit vector along the length.
    pub forward: Vec2,
    /// Unit vector along the width (`forward` rotated +90°).
    pub left: Vec2,
    pub half_length: f64,
    pub half_width: f64,
}

impl OrientedBox {
    pub fn new(center: Vec2, yaw: f64, length: f64, width: f64) -> Self {
        let forward = Vec2::from_angle(yaw);
        Self {
            center,
            forward,
            left: forward.perp(),
            half_length: length * 0.5,
            half_width: width * 0.5,
        }
    }

    /// Footprint of an agent.  The kinematic position is the box centre.
    pub fn of_agent(state: &KinematicState, params: &VehicleParams) -> Self {
        Self::new(state.position, state.yaw, params.length, params.width)
    }

    pub fn corners(&self) -> [Vec2; 4] {
        let f = self.forward * self.half_length;
        let l = self.left * self.half_width;
        [
            self.center + f + l,
            self.center + f - l,
            self.center - f - l,
            self.center - f + l,
        ]
    }

    /// Axis-aligned bounds as `([min_x, min_y], [max_x, max_y])`.
    pub fn aabb(&self) -> ([f64; 2], [f64; 2]) {
        let ex = (self.forward.x * self.half_length).abs() + (self.left.x * self.half_width).abs();
        let ey = (self.forward.y * self.half_length).abs() + (self.left.y * self.half_width).abs();
        (
            [self.center.x - ex, self.center.y - ey],
            [self.center.x + ex, self.center.y + ey],
        )
    }

    /// Interval covered by the box when projected on unit `axis`.
    #[inline]
    fn project(&self, axis: Vec2) -> (f64, f64) {
        let c = self.center.dot(axis);
        let r = self.half_length * self.forward.dot(axis).abs()
            + self.half_width * self.left.dot(axis).abs();
        (c - r, c + r)
    }

    /// Penetration depth if the boxes overlap.
    ///
    /// The depth is the smallest interval overlap over the four candidate
    /// separating axes, i.e. the shortest translation along one of those
    /// axes that separates the boxes.  Touching boxes (zero overlap) do not
    /// collide.
    pub fn penetration(&self, other: &OrientedBox) -> Option<f64> {
        let axes = [self.forward, self.left, other.forward, other.left];
        let mut depth = f64::INFINITY;
        for axis in axes {
            let (a_min, a_max) = self.project(axis);
            let (b_min, b_max) = other.project(axis);
            let overlap = a_max.min(b_max) - a_min.max(b_min);
            if overlap <= 0.0 {
                return None;
            }
            depth = depth.min(overlap);
        }
        depth.is_finite().then_some(depth)
    }

    #[inline]
    pub fn overlaps(&self, other: &OrientedBox) -> bool {
        self.penetration(other).is_some()
    }
}
