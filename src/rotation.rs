use crate::error::{Result, SpatialError};
use crate::quaternion::Quaternion;
use crate::rpy::RPY;

/// A rigid orientation in 3D space, canonically stored as a unit quaternion.
///
/// Convertible to/from [`RPY`] and raw quaternion components; no rotation
/// matrix is ever exposed as public state (§9 of the design notes).
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    quaternion: Quaternion<f64>,
}

impl Rotation {
    /// The no-op rotation.
    pub fn identity() -> Self {
        Self {
            quaternion: Quaternion::from_xyzw(0.0, 0.0, 0.0, 1.0),
        }
    }

    /// Builds a rotation from quaternion components, normalizing internally.
    ///
    /// Fails with [`SpatialError::InvalidInput`] if the components are
    /// non-finite or the quaternion has (numerically) zero norm.
    pub fn from_quaternion(x: f64, y: f64, z: f64, w: f64) -> Result<Self> {
        let raw = Quaternion::from_xyzw(x, y, z, w);
        if !raw.is_finite() {
            return Err(SpatialError::invalid_input(
                "quaternion components must be finite",
            ));
        }
        let quaternion = raw
            .normalize()
            .ok_or_else(|| SpatialError::invalid_input("quaternion must have non-zero norm"))?;
        Ok(Self { quaternion })
    }

    /// Builds a rotation from roll-pitch-yaw angles (ZYX-intrinsic, §4.1).
    ///
    /// Total: any finite triple produces a valid rotation.
    pub fn from_rpy(roll: f64, pitch: f64, yaw: f64) -> Self {
        let (sr, cr) = (roll / 2.0).sin_cos();
        let (sp, cp) = (pitch / 2.0).sin_cos();
        let (sy, cy) = (yaw / 2.0).sin_cos();

        let w = cr * cp * cy + sr * sp * sy;
        let x = sr * cp * cy - cr * sp * sy;
        let y = cr * sp * cy + sr * cp * sy;
        let z = cr * cp * sy - sr * sp * cy;

        // The construction above always yields a unit quaternion up to
        // floating-point drift; normalize defensively and fall back to
        // identity only in the unreachable all-zero case.
        let quaternion = Quaternion::from_xyzw(x, y, z, w)
            .normalize()
            .unwrap_or_else(|| Quaternion::from_xyzw(0.0, 0.0, 0.0, 1.0));
        Self { quaternion }
    }

    /// Returns the canonical unit-quaternion form, with `w >= 0`.
    pub fn to_quaternion(self) -> Quaternion<f64> {
        let q = self.quaternion;
        if q.w() < 0.0 {
            Quaternion::from_xyzw(-q.x(), -q.y(), -q.z(), -q.w())
        } else {
            q
        }
    }

    /// Alias of [`Rotation::to_quaternion`].
    pub fn as_quaternion(self) -> Quaternion<f64> {
        self.to_quaternion()
    }

    /// Returns the roll-pitch-yaw representation, with pitch in
    /// `[-pi/2, pi/2]` and roll/yaw in `(-pi, pi]`, handling gimbal lock at
    /// `|pitch| == pi/2`.
    pub fn to_rpy(self) -> RPY {
        let q = self.quaternion;
        let (x, y, z, w) = (q.x(), q.y(), q.z(), q.w());

        let sinr_cosp = 2.0 * (w * x + y * z);
        let cosr_cosp = 1.0 - 2.0 * (x * x + y * y);
        let roll = sinr_cosp.atan2(cosr_cosp);

        let sinp = 2.0 * (w * y - z * x);
        let pitch = if sinp.abs() >= 1.0 {
            std::f64::consts::FRAC_PI_2.copysign(sinp)
        } else {
            sinp.asin()
        };

        let siny_cosp = 2.0 * (w * z + x * y);
        let cosy_cosp = 1.0 - 2.0 * (y * y + z * z);
        let yaw = siny_cosp.atan2(cosy_cosp);

        RPY::new(roll, pitch, yaw).expect("derived from finite quaternion components")
    }

    /// Alias of [`Rotation::to_rpy`].
    pub fn as_rpy(self) -> RPY {
        self.to_rpy()
    }

    /// Rotates a vector by this rotation.
    pub fn rotate(self, vector: crate::vector::Vector3) -> crate::vector::Vector3 {
        self.quaternion.rotate(vector)
    }

    /// The inverse (conjugate) rotation.
    pub fn inverse(self) -> Self {
        Self {
            quaternion: self.quaternion.inverse(),
        }
    }

    /// Composes two rotations: `(self ∘ other)` applies `other` first.
    pub fn compose(self, other: Self) -> Self {
        let composed = self.quaternion * other.quaternion;
        let quaternion = composed.normalize().unwrap_or(composed);
        Self { quaternion }
    }
}

impl std::ops::Mul for Rotation {
    type Output = Self;
    fn mul(self, other: Self) -> Self::Output {
        self.compose(other)
    }
}
