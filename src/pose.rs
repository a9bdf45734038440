use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::basis;
use crate::error::Result;
use crate::frame::{Frame, FrameInner, NodeRc};
use crate::isometry::Isometry;
use crate::rotation::Rotation;
use crate::vector::Vector3;

/// Strong pointer to a pose's shared state. Stored inside a `Frame`'s
/// `poses` (the tree's ownership graph) or briefly on the stack — never
/// alongside a root keep-alive, for the same reason [`NodeRc`] isn't (see
/// `frame.rs`).
pub(crate) type PoseRc = Rc<RefCell<PoseInner>>;

pub(crate) struct PoseInner {
    frame: Weak<RefCell<FrameInner>>,
    transformation: Isometry,
}

/// A rigid transformation anchored in a specific [`Frame`] (§3, §4.3).
///
/// Like `Frame`, `Pose` is a cheap, `Clone`-able handle onto shared state:
/// `node` strongly owns this pose's own data, `root` strongly keeps the
/// anchoring frame's whole tree reachable for as long as this handle is
/// alive (mirroring `Frame::root`), and the anchoring reference itself
/// (inside [`PoseInner`]) stays a non-owning `Weak`. `root` lives only in
/// this escaping handle, never inside `PoseInner` or `FrameInner`, so no
/// reference cycle forms.
#[derive(Clone)]
pub struct Pose {
    pub(crate) node: PoseRc,
    root: NodeRc,
}

impl Pose {
    /// Creates a pose anchored in `frame`, without attaching it anywhere.
    pub(crate) fn anchor(frame: &Frame, transformation: Isometry) -> Self {
        let node = Rc::new(RefCell::new(PoseInner {
            frame: Rc::downgrade(&frame.node),
            transformation,
        }));
        Self {
            node,
            root: frame.root.clone(),
        }
    }

    pub(crate) fn from_node(node: PoseRc, root: NodeRc) -> Self {
        Self { node, root }
    }

    fn borrow(&self) -> Ref<'_, PoseInner> {
        self.node.borrow()
    }

    /// The frame this pose is anchored in.
    pub fn frame(&self) -> Frame {
        let frame_node = self
            .borrow()
            .frame
            .upgrade()
            .expect("anchoring frame dropped while pose is alive");
        Frame::from_node(frame_node, self.root.clone())
    }

    /// The pose's current transformation, decomposed.
    pub fn transformation(&self) -> (Vector3, Rotation) {
        self.borrow().transformation.decompose()
    }

    pub(crate) fn transformation_iso(&self) -> Isometry {
        self.borrow().transformation
    }

    /// Replaces the pose's transformation.
    pub fn set(&self, translation: Vector3, rotation: Rotation) -> Result<()> {
        let iso = Isometry::from_parts(translation, rotation)?;
        debug!("setting pose transformation");
        self.node.borrow_mut().transformation = iso;
        Ok(())
    }

    /// `transformation <- delta ∘ transformation`: the delta is expressed
    /// in the anchoring frame ("parent frame" in the Frame API's naming)
    /// and pre-multiplies.
    pub fn apply_in_parent_frame(&self, delta: Isometry) -> Result<()> {
        debug!("pose apply_in_parent_frame");
        let current = self.transformation_iso();
        self.node.borrow_mut().transformation = delta.compose(current);
        Ok(())
    }

    /// `transformation <- transformation ∘ delta`: the delta is expressed
    /// in the pose's own local coordinates and post-multiplies.
    pub fn apply_in_local_frame(&self, delta: Isometry) -> Result<()> {
        debug!("pose apply_in_local_frame");
        let current = self.transformation_iso();
        self.node.borrow_mut().transformation = current.compose(delta);
        Ok(())
    }

    /// Returns a new pose anchored in `target_frame`, whose transformation
    /// equals this pose's transformation re-expressed in `target_frame`'s
    /// coordinates (§4.4).
    pub fn in_frame(&self, target_frame: &Frame) -> Result<Pose> {
        let change_of_basis = basis::change_of_basis(&self.frame(), target_frame)?;
        let transformation = change_of_basis.compose(self.transformation_iso());
        debug!(target = %target_frame.name(), "re-expressing pose in frame");
        Ok(Pose::anchor(target_frame, transformation))
    }
}

impl PartialEq for Pose {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl fmt::Debug for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pose")
            .field("frame", &self.frame().name())
            .finish()
    }
}
