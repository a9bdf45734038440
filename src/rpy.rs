use crate::error::{Result, SpatialError};
use crate::rotation::Rotation;

/// Roll-pitch-yaw angles in radians, ZYX-intrinsic convention
/// (equivalently XYZ-extrinsic): `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RPY {
    roll: f64,
    pitch: f64,
    yaw: f64,
}

impl RPY {
    /// Builds an `RPY` triple, rejecting non-finite angles.
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Result<Self> {
        if !roll.is_finite() || !pitch.is_finite() || !yaw.is_finite() {
            return Err(SpatialError::invalid_input("RPY angles must be finite"));
        }
        Ok(Self { roll, pitch, yaw })
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Returns the angles as a `[roll, pitch, yaw]` list.
    pub fn to_list(self) -> [f64; 3] {
        [self.roll, self.pitch, self.yaw]
    }

    /// Alias of [`RPY::to_list`].
    pub fn as_list(self) -> [f64; 3] {
        self.to_list()
    }

    /// Returns the angles as a `(roll, pitch, yaw)` tuple.
    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.roll, self.pitch, self.yaw)
    }

    /// Alias of [`RPY::to_tuple`].
    pub fn as_tuple(self) -> (f64, f64, f64) {
        self.to_tuple()
    }

    /// Converts the angles to a unified [`Rotation`].
    pub fn to_rotation(self) -> Rotation {
        Rotation::from_rpy(self.roll, self.pitch, self.yaw)
    }

    /// Alias of [`RPY::to_rotation`].
    pub fn as_rotation(self) -> Rotation {
        self.to_rotation()
    }
}
