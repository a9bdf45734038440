use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::basis;
use crate::error::Result;
use crate::isometry::Isometry;
use crate::pose::{Pose, PoseRc};
use crate::rotation::Rotation;
#[cfg(feature = "serde")]
use crate::serializer;
use crate::vector::Vector3;

/// Strong pointer to a node's shared state. Only ever stored inside another
/// node's `children` (the tree's actual ownership graph) or briefly on the
/// stack — never inside the public [`Frame`]/[`Pose`] handles alongside a
/// root keep-alive, or the two would own each other and neither would ever
/// free (see [`Frame`]'s docs).
pub(crate) type NodeRc = Rc<RefCell<FrameInner>>;

/// Inner, shared state of a [`Frame`] node. See `k`-crate's `NodeImpl` for
/// the ownership shape this mirrors (parent weak, children owned).
pub(crate) struct FrameInner {
    pub(crate) name: String,
    pub(crate) transformation_to_parent: Isometry,
    pub(crate) parent: Option<Weak<RefCell<FrameInner>>>,
    pub(crate) children: Vec<NodeRc>,
    pub(crate) poses: Vec<PoseRc>,
    pub(crate) depth: usize,
}

/// A named coordinate frame located relative to its parent by a rigid
/// transformation (§3, §4.2).
///
/// `Frame` is a cheap, `Clone`-able handle onto shared, interior-mutable
/// node state: `node` strongly owns this frame's own data, and `root`
/// strongly keeps the *whole tree* reachable for as long as this handle (or
/// any pose anchored in the tree) is alive — satisfying "a descendant keeps
/// its ancestors alive" (§3, I4) without creating a reference cycle. The
/// tree's actual parent/child edges stay one-directional (`children: Vec`
/// strong-down from each node, `parent` weak-up inside [`FrameInner`]); the
/// keep-alive lives only in handles that escape the tree into caller code,
/// never inside `FrameInner`/`PoseInner` itself, so nothing ever strongly
/// owns itself through a cycle.
#[derive(Clone)]
pub struct Frame {
    pub(crate) node: NodeRc,
    pub(crate) root: NodeRc,
}

impl Frame {
    /// Creates a root frame. `parent()` is `None`, `depth()` is 0.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug!(frame = %name, "creating root frame");
        let node = Rc::new(RefCell::new(FrameInner {
            name,
            transformation_to_parent: Isometry::identity(),
            parent: None,
            children: Vec::new(),
            poses: Vec::new(),
            depth: 0,
        }));
        Self {
            root: node.clone(),
            node,
        }
    }

    fn from_node(node: NodeRc, root: NodeRc) -> Self {
        Self { node, root }
    }

    pub(crate) fn ptr_eq(&self, other: &Frame) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    fn borrow(&self) -> Ref<'_, FrameInner> {
        self.node.borrow()
    }

    /// The frame's name.
    pub fn name(&self) -> String {
        self.borrow().name.clone()
    }

    /// The frame's depth: 0 for the root, `parent().depth() + 1` otherwise.
    pub fn depth(&self) -> usize {
        self.borrow().depth
    }

    /// The parent frame, or `None` for a root.
    pub fn parent(&self) -> Option<Frame> {
        let parent_weak = self.borrow().parent.clone()?;
        let parent_node = parent_weak
            .upgrade()
            .expect("parent frame dropped while child alive");
        Some(Frame::from_node(parent_node, self.root.clone()))
    }

    /// An ordered snapshot of this frame's children.
    pub fn children(&self) -> Vec<Frame> {
        self.borrow()
            .children
            .iter()
            .map(|node| Frame::from_node(node.clone(), self.root.clone()))
            .collect()
    }

    /// An ordered snapshot of this frame's attached poses.
    pub fn poses(&self) -> Vec<Pose> {
        self.borrow()
            .poses
            .iter()
            .map(|node| Pose::from_node(node.clone(), self.root.clone()))
            .collect()
    }

    /// The tree's root. Defined for every frame (a root is its own root).
    pub fn root(&self) -> Frame {
        Frame::from_node(self.root.clone(), self.root.clone())
    }

    /// The current `transformation_to_parent`, decomposed.
    pub fn transformation_to_parent(&self) -> (Vector3, Rotation) {
        self.borrow().transformation_to_parent.decompose()
    }

    pub(crate) fn transformation_to_parent_iso(&self) -> Isometry {
        self.borrow().transformation_to_parent
    }

    /// Creates a child frame whose `transformation_to_parent` is
    /// `(translation, rotation)`. Returns a shared handle to the new child.
    pub fn add_child(
        &self,
        name: impl Into<String>,
        translation: Vector3,
        rotation: Rotation,
    ) -> Result<Frame> {
        let iso = Isometry::from_parts(translation, rotation)?;
        self.create_child(name, iso)
    }

    fn create_child(&self, name: impl Into<String>, iso: Isometry) -> Result<Frame> {
        let name = name.into();
        let depth = self.depth() + 1;
        let child_node = Rc::new(RefCell::new(FrameInner {
            name: name.clone(),
            transformation_to_parent: iso,
            parent: Some(Rc::downgrade(&self.node)),
            children: Vec::new(),
            poses: Vec::new(),
            depth,
        }));
        debug!(parent = %self.name(), child = %name, "adding child frame");
        self.node.borrow_mut().children.push(child_node.clone());
        Ok(Frame::from_node(child_node, self.root.clone()))
    }

    /// Attaches a new [`Pose`] to this frame with the given transformation.
    pub fn add_pose(&self, translation: Vector3, rotation: Rotation) -> Result<Pose> {
        let iso = Isometry::from_parts(translation, rotation)?;
        debug!(frame = %self.name(), "adding pose");
        let pose = Pose::anchor(self, iso);
        self.node.borrow_mut().poses.push(pose.node.clone());
        Ok(pose)
    }

    /// Replaces `transformation_to_parent` with `(translation, rotation)`.
    pub fn set(&self, translation: Vector3, rotation: Rotation) -> Result<()> {
        let iso = Isometry::from_parts(translation, rotation)?;
        debug!(frame = %self.name(), "setting transformation_to_parent");
        self.node.borrow_mut().transformation_to_parent = iso;
        Ok(())
    }

    /// Replaces `transformation_to_parent` with `delta ∘ transformation_to_parent`:
    /// the delta is expressed in the parent's coordinates and pre-multiplies.
    pub fn apply_in_parent_frame(&self, delta: Isometry) -> Result<()> {
        debug!(frame = %self.name(), "apply_in_parent_frame");
        let current = self.transformation_to_parent_iso();
        self.node.borrow_mut().transformation_to_parent = delta.compose(current);
        Ok(())
    }

    /// Replaces `transformation_to_parent` with `transformation_to_parent ∘ delta`:
    /// the delta is expressed in this frame's own coordinates and post-multiplies.
    pub fn apply_in_local_frame(&self, delta: Isometry) -> Result<()> {
        debug!(frame = %self.name(), "apply_in_local_frame");
        let current = self.transformation_to_parent_iso();
        self.node.borrow_mut().transformation_to_parent = current.compose(delta);
        Ok(())
    }

    /// Creates a new child whose `transformation_to_parent` places the
    /// child's origin at the world position of `reference_pose`, offset by
    /// `(translation, rotation)` expressed in the reference pose's frame
    /// (§4.2).
    pub fn calibrate_child(
        &self,
        name: impl Into<String>,
        translation: Vector3,
        rotation: Rotation,
        reference_pose: &Pose,
    ) -> Result<Frame> {
        let offset = Isometry::from_parts(translation, rotation)?;
        let change_of_basis = basis::change_of_basis(&reference_pose.frame(), self)?;
        let reference_transform = reference_pose.transformation_iso();
        let iso = change_of_basis.compose(reference_transform).compose(offset);
        debug!(frame = %self.name(), "calibrating child from reference pose");
        self.create_child(name, iso)
    }

    /// Emits a JSON document (§4.5) rooted at this frame.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> String {
        serializer::to_json(self)
    }

    /// Ingests a JSON document (§4.5), updating transformations in place.
    #[cfg(feature = "serde")]
    pub fn apply_config(&self, json_text: &str) -> Result<()> {
        serializer::apply_config(self, json_text)
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("name", &self.name())
            .field("depth", &self.depth())
            .finish()
    }
}
