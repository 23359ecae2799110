//! Per-agent physical parameters and kinematic state.

use ds_core::{AgentKind, Vec2};

/// Static physical description of an agent.  Immutable for the agent's
/// lifetime.
///
/// `position` in [`KinematicState`] refers to the geometric centre of the
/// `length` x `width` footprint; the centre-of-gravity offsets are relative
/// to that point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VehicleParams {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// kg
    pub mass: f64,
    /// Moments of inertia about the roll, pitch and yaw axes (kg·m²).
    pub inertia: [f64; 3],
    pub friction_coefficient: f64,
    pub wheelbase: f64,
    pub track_width: f64,
    pub cog_offset_longitudinal: f64,
    pub cog_offset_lateral: f64,
    /// m/s
    pub max_velocity: f64,
    /// m/s², positive
    pub max_acceleration: f64,
    /// m/s², positive
    pub max_deceleration: f64,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self::passenger_car()
    }
}

impl VehicleParams {
    /// A mid-size passenger car.
    pub fn passenger_car() -> Self {
        Self {
            length:                  4.5,
            width:                   1.8,
            height:                  1.5,
            mass:                    1_500.0,
            inertia:                 [500.0, 2_200.0, 2_400.0],
            friction_coefficient:    1.0,
            wheelbase:               2.7,
            track_width:             1.55,
            cog_offset_longitudinal: 0.0,
            cog_offset_lateral:      0.0,
            max_velocity:            50.0,
            max_acceleration:        3.0,
            max_deceleration:        9.0,
        }
    }

    /// A rigid truck.
    pub fn truck() -> Self {
        Self {
            length:           12.0,
            width:            2.5,
            height:           3.8,
            mass:             18_000.0,
            inertia:          [20_000.0, 150_000.0, 160_000.0],
            wheelbase:        6.5,
            track_width:      2.0,
            max_velocity:     25.0,
            max_acceleration: 1.2,
            max_deceleration: 6.0,
            ..Self::passenger_car()
        }
    }

    /// A walking pedestrian, modelled as a small box.
    pub fn pedestrian() -> Self {
        Self {
            length:           0.5,
            width:            0.6,
            height:           1.75,
            mass:             75.0,
            inertia:          [10.0, 10.0, 2.0],
            wheelbase:        0.0,
            track_width:      0.0,
            max_velocity:     3.0,
            max_acceleration: 1.5,
            max_deceleration: 3.0,
            ..Self::passenger_car()
        }
    }

    /// Sensible defaults for a given classification.
    pub fn for_kind(kind: AgentKind) -> Self {
        match kind {
            AgentKind::Truck      => Self::truck(),
            AgentKind::Pedestrian => Self::pedestrian(),
            _                     => Self::passenger_car(),
        }
    }

    #[inline]
    pub fn half_length(&self) -> f64 {
        self.length * 0.5
    }

    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    /// Reason the parameters are physically meaningless, if any.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("length", self.length),
            ("width", self.width),
            ("mass", self.mass),
            ("max_deceleration", self.max_deceleration),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be positive and finite, got {value}"));
            }
        }
        if !(self.max_velocity.is_finite() && self.max_velocity >= 0.0) {
            return Err(format!("max_velocity must be non-negative, got {}", self.max_velocity));
        }
        Ok(())
    }
}

/// Dynamic state of an agent, written only by its Dynamics component.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct KinematicState {
    pub position: Vec2,
    /// Heading in radians, counter-clockwise from `+x`.
    pub yaw: f64,
    /// Path curvature in 1/m (positive turns left).
    pub curvature: f64,
    /// Signed longitudinal speed in m/s.
    pub velocity: f64,
    /// Longitudinal acceleration in m/s².
    pub acceleration: f64,
}

impl KinematicState {
    pub fn at(position: Vec2, yaw: f64, velocity: f64) -> Self {
        Self { position, yaw, velocity, ..Self::default() }
    }

    /// Velocity as a vector in the scenario frame.
    #[inline]
    pub fn velocity_vector(&self) -> Vec2 {
        Vec2::from_angle(self.yaw) * self.velocity
    }

    /// Unit vector along the heading.
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.yaw)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.yaw.is_finite()
            && self.curvature.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
    }
}
