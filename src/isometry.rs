use crate::error::{Result, SpatialError};
use crate::rotation::Rotation;
use crate::vector::Vector3;

/// A rigid transformation `T = (t, R)` acting on a point `p` as
/// `T * p = R * p + t` (§3).
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Isometry {
    translation: Vector3,
    rotation: Rotation,
}

impl Isometry {
    /// The identity transformation.
    pub fn identity() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation: Rotation::identity(),
        }
    }

    /// Builds an isometry from translation and rotation parts, rejecting
    /// non-finite translation components.
    pub fn from_parts(translation: Vector3, rotation: Rotation) -> Result<Self> {
        if !translation.is_finite() {
            return Err(SpatialError::invalid_input(
                "translation components must be finite",
            ));
        }
        Ok(Self {
            translation,
            rotation,
        })
    }

    /// A pure translation (identity rotation).
    pub fn from_translation(translation: Vector3) -> Result<Self> {
        Self::from_parts(translation, Rotation::identity())
    }

    /// A pure rotation (zero translation).
    pub fn from_rotation(rotation: Rotation) -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            rotation,
        }
    }

    /// Returns the (translation, rotation) decomposition.
    pub fn decompose(self) -> (Vector3, Rotation) {
        (self.translation, self.rotation)
    }

    pub fn translation(self) -> Vector3 {
        self.translation
    }

    pub fn rotation(self) -> Rotation {
        self.rotation
    }

    /// Applies this transformation to a point.
    pub fn apply_to(self, point: Vector3) -> Vector3 {
        self.translation + self.rotation.rotate(point)
    }

    /// Composes two isometries: `(self ∘ other)` applies `other` first,
    /// matching `(t1, R1) ∘ (t2, R2) = (t1 + R1 * t2, R1 * R2)` (§3).
    pub fn compose(self, other: Self) -> Self {
        let translation = self.translation + self.rotation.rotate(other.translation);
        let rotation = self.rotation.compose(other.rotation);
        Self {
            translation,
            rotation,
        }
    }

    /// The inverse transformation: `(t, R)^-1 = (-R^-1 * t, R^-1)`.
    pub fn inverse(self) -> Self {
        let inverse_rotation = self.rotation.inverse();
        Self {
            translation: inverse_rotation.rotate(-self.translation),
            rotation: inverse_rotation,
        }
    }
}

impl std::ops::Mul for Isometry {
    type Output = Self;
    fn mul(self, other: Self) -> Self::Output {
        self.compose(other)
    }
}

impl std::ops::Mul<Vector3> for Isometry {
    type Output = Vector3;
    fn mul(self, point: Vector3) -> Self::Output {
        self.apply_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_is_neutral() {
        let t = Isometry::from_parts(Vector3::new(1.0, 2.0, 3.0), Rotation::from_rpy(0.1, 0.2, 0.3))
            .unwrap();
        let lhs = Isometry::identity().compose(t);
        let rhs = t.compose(Isometry::identity());
        assert_abs_diff_eq!(lhs.translation().x(), t.translation().x(), epsilon = 1e-9);
        assert_abs_diff_eq!(rhs.translation().x(), t.translation().x(), epsilon = 1e-9);
    }

    #[test]
    fn inverse_cancels() {
        let t = Isometry::from_parts(
            Vector3::new(1.0, -2.0, 0.5),
            Rotation::from_rpy(0.3, -0.2, 1.0),
        )
        .unwrap();
        let should_be_identity = t.compose(t.inverse());
        let (translation, rotation) = should_be_identity.decompose();
        assert_abs_diff_eq!(translation.x(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(translation.y(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(translation.z(), 0.0, epsilon = 1e-9);
        let q = rotation.to_quaternion();
        assert_abs_diff_eq!(q.w(), 1.0, epsilon = 1e-9);

        let other_way = t.inverse().compose(t);
        let q2 = other_way.rotation().to_quaternion();
        assert_abs_diff_eq!(q2.w(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn rotate_quarter_turn_about_z() {
        let t = Isometry::from_rotation(Rotation::from_rpy(0.0, 0.0, FRAC_PI_2));
        let rotated = t.apply_to(Vector3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(rotated.x(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rotated.y(), 1.0, epsilon = 1e-9);
    }
}
