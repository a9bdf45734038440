//! Hierarchical Cartesian coordinate frames and rigid-transformation poses.
//!
//! A [`Frame`] tree models a scene graph of coordinate systems, each located
//! relative to its parent by a rigid transformation ([`Isometry`]). A
//! [`Pose`] anchors a rigid transformation to one frame and can be
//! re-expressed in any other frame of the same tree via [`Pose::in_frame`].

mod basis;
mod error;
mod frame;
mod isometry;
/// Helper math operations.
pub mod ops;
mod pose;
/// Spatial rotation, generic over the scalar field.
pub mod quaternion;
mod rotation;
mod rpy;
#[cfg(feature = "serde")]
mod serializer;
/// Spatial translation, generic over the scalar field.
pub mod vector;

pub use error::{Result, SpatialError};
pub use frame::Frame;
pub use isometry::Isometry;
pub use pose::Pose;
pub use quaternion::Quaternion;
pub use rotation::Rotation;
pub use rpy::RPY;
pub use vector::{Vector, Vector3};
