//! Change-of-basis engine (§4.4): computes the isometry that takes a point
//! expressed in one frame's coordinates to another frame's coordinates, by
//! walking the tree between the two frames via their lowest common
//! ancestor.

use crate::error::{Result, SpatialError};
use crate::frame::Frame;
use crate::isometry::Isometry;

/// Returns `B <- A`: the isometry converting a point in `from`'s
/// coordinates to the same point in `to`'s coordinates.
///
/// `from` and `to` must share a root; otherwise returns
/// [`SpatialError::LogicError`] (§4.4, §9).
pub fn change_of_basis(from: &Frame, to: &Frame) -> Result<Isometry> {
    if !from.root().ptr_eq(&to.root()) {
        return Err(SpatialError::logic_error(
            "change of basis requested between frames of different trees",
        ));
    }

    let lca = lowest_common_ancestor(from, to);
    let to_root_from_a = compose_up_to(from, &lca);
    let to_root_from_b = compose_up_to(to, &lca);
    Ok(to_root_from_b.inverse().compose(to_root_from_a))
}

/// Composes `transformation_to_parent` isometries from `frame` upward,
/// stopping just before (not including) `stop_at`'s own transform.
fn compose_up_to(frame: &Frame, stop_at: &Frame) -> Isometry {
    let mut accumulated = Isometry::identity();
    let mut current = frame.clone();
    while !current.ptr_eq(stop_at) {
        let step = current.transformation_to_parent_iso();
        accumulated = step.compose(accumulated);
        current = current
            .parent()
            .expect("stop_at is not an ancestor of frame");
    }
    accumulated
}

/// The chain `[frame, parent(frame), ..., root]`, root last.
fn ancestor_chain(frame: &Frame) -> Vec<Frame> {
    let mut chain = vec![frame.clone()];
    let mut current = frame.clone();
    while let Some(parent) = current.parent() {
        chain.push(parent.clone());
        current = parent;
    }
    chain
}

fn lowest_common_ancestor(a: &Frame, b: &Frame) -> Frame {
    let chain_a: Vec<Frame> = ancestor_chain(a).into_iter().rev().collect();
    let chain_b: Vec<Frame> = ancestor_chain(b).into_iter().rev().collect();

    let mut lca = chain_a[0].clone();
    for (fa, fb) in chain_a.iter().zip(chain_b.iter()) {
        if fa.ptr_eq(fb) {
            lca = fa.clone();
        } else {
            break;
        }
    }
    lca
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::Rotation;
    use crate::vector::Vector3;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn change_of_basis_between_siblings() {
        let base = Frame::new("base");
        let frame_1 = base
            .add_child("frame1", Vector3::new(1.0, 1.0, 1.0), Rotation::identity())
            .unwrap();
        let frame_2 = base
            .add_child(
                "frame2",
                Vector3::new(-2.0, 0.0, 0.0),
                Rotation::from_rpy(0.0, 0.0, FRAC_PI_2),
            )
            .unwrap();

        let iso = change_of_basis(&frame_1, &frame_2).unwrap();
        let point = iso.apply_to(Vector3::new(0.0, 0.0, 0.0));
        assert_abs_diff_eq!(point.x(), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(point.y(), -3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(point.z(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn change_of_basis_rejects_different_trees() {
        let tree_a = Frame::new("a");
        let tree_b = Frame::new("b");
        assert!(change_of_basis(&tree_a, &tree_b).is_err());
    }

    #[test]
    fn change_of_basis_to_self_is_identity() {
        let root = Frame::new("root");
        let child = root
            .add_child("child", Vector3::new(1.0, 2.0, 3.0), Rotation::identity())
            .unwrap();
        let iso = change_of_basis(&child, &child).unwrap();
        let (t, _) = iso.decompose();
        assert_abs_diff_eq!(t.x(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.y(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(t.z(), 0.0, epsilon = 1e-9);
    }
}
