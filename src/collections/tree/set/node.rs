use std::fmt::{self, Debug, Formatter};
use std::ptr::NonNull;

use derive_more::IsVariant;

pub(crate) type Link<T> = Option<NodePtr<T>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub(crate) enum Color {
    Red,
    Black,
}

pub(crate) struct Node<T> {
    pub value: T,
    pub color: Color,
    pub parent: Link<T>,
    pub left: Link<T>,
    pub right: Link<T>,
}

// NOTE: A NodePtr is created by leaking a Box and is only turned back into a Box when the node is
// unlinked from its tree. Every NodePtr reachable from a tree therefore points to a live Node, and
// the accessors below rely on that. Ownership is strictly root -> children, the parent link is just
// a copy of a pointer that is owned elsewhere.
pub(crate) struct NodePtr<T>(pub NonNull<Node<T>>);

impl<T> NodePtr<T> {
    pub fn from_node(node: Node<T>) -> NodePtr<T> {
        NodePtr(NonNull::from(Box::leak(Box::new(node))))
    }

    /// Reclaims ownership of the node, freeing its allocation.
    ///
    /// # Safety
    /// The node must have been unlinked from its tree, and no copy of this pointer may be used
    /// afterwards.
    pub unsafe fn take_node(self) -> Node<T> {
        // SAFETY: The pointer came from Box::leak and the caller guarantees it is not aliased.
        unsafe { *Box::from_raw(self.0.as_ptr()) }
    }

    pub fn value<'a>(self) -> &'a T {
        // SAFETY: The node is live while reachable from its tree, and values are never mutated in
        // place.
        unsafe { &(*self.0.as_ptr()).value }
    }

    pub fn color(self) -> Color {
        // SAFETY: The node is live while reachable from its tree.
        unsafe { (*self.0.as_ptr()).color }
    }

    pub fn set_color(self, color: Color) {
        // SAFETY: The node is live and no reference to its color is held elsewhere.
        unsafe { (*self.0.as_ptr()).color = color }
    }

    pub fn parent(self) -> Link<T> {
        // SAFETY: The node is live while reachable from its tree.
        unsafe { (*self.0.as_ptr()).parent }
    }

    pub fn set_parent(self, parent: Link<T>) {
        // SAFETY: The node is live and no reference to its links is held elsewhere.
        unsafe { (*self.0.as_ptr()).parent = parent }
    }

    pub fn left(self) -> Link<T> {
        // SAFETY: The node is live while reachable from its tree.
        unsafe { (*self.0.as_ptr()).left }
    }

    pub fn set_left(self, left: Link<T>) {
        // SAFETY: The node is live and no reference to its links is held elsewhere.
        unsafe { (*self.0.as_ptr()).left = left }
    }

    pub fn right(self) -> Link<T> {
        // SAFETY: The node is live while reachable from its tree.
        unsafe { (*self.0.as_ptr()).right }
    }

    pub fn set_right(self, right: Link<T>) {
        // SAFETY: The node is live and no reference to its links is held elsewhere.
        unsafe { (*self.0.as_ptr()).right = right }
    }

    /// Returns true if this node is the left child of its parent.
    pub fn is_left_child(self) -> bool {
        self.parent().is_some_and(|p| p.left() == Some(self))
    }

    /// Returns the leftmost node of the subtree rooted at self.
    pub fn leftmost(self) -> NodePtr<T> {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }

    /// Returns the rightmost node of the subtree rooted at self.
    pub fn rightmost(self) -> NodePtr<T> {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// Returns the in-order successor of self.
    pub fn next(self) -> Link<T> {
        if let Some(right) = self.right() {
            return Some(right.leftmost());
        }

        let mut node = self;
        while let Some(parent) = node.parent() {
            if parent.left() == Some(node) {
                return Some(parent);
            }
            node = parent;
        }
        None
    }

    /// Returns the in-order predecessor of self.
    pub fn prev(self) -> Link<T> {
        if let Some(left) = self.left() {
            return Some(left.rightmost());
        }

        let mut node = self;
        while let Some(parent) = node.parent() {
            if parent.right() == Some(node) {
                return Some(parent);
            }
            node = parent;
        }
        None
    }
}

/// Returns the color of a link, treating empty links as black leaves.
pub(crate) fn color_of<T>(link: Link<T>) -> Color {
    link.map_or(Color::Black, NodePtr::color)
}

/// Frees every node in the subtree rooted at `link`.
///
/// # Safety
/// The subtree must be unreachable from anywhere else once this is called.
pub(crate) unsafe fn free_subtree<T>(link: Link<T>) {
    if let Some(node) = link {
        // SAFETY: The subtree is unreachable, so each node is freed exactly once.
        unsafe {
            free_subtree(node.left());
            free_subtree(node.right());
            drop(node.take_node());
        }
    }
}

/// Deep copies the subtree rooted at `link`, keeping its shape and colors.
pub(crate) fn clone_subtree<T: Clone>(link: Link<T>, parent: Link<T>) -> Link<T> {
    let source = link?;
    let node = NodePtr::from_node(Node {
        value: source.value().clone(),
        color: source.color(),
        parent,
        left: None,
        right: None,
    });
    node.set_left(clone_subtree(source.left(), Some(node)));
    node.set_right(clone_subtree(source.right(), Some(node)));
    Some(node)
}

impl<T> Clone for NodePtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodePtr<T> {}

impl<T> PartialEq for NodePtr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for NodePtr<T> {}

impl<T> Debug for NodePtr<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodePtr").field(&self.0).finish()
    }
}

/// Draws the subtree rooted at a link sideways, with left children above and right children below.
pub(crate) struct DebugSubtree<T>(pub Link<T>);

impl<T: Debug> Debug for DebugSubtree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(node) => {
                let left = format!("{:?}", DebugSubtree(node.left()));
                let right = format!("{:?}", DebugSubtree(node.right()));
                for line in left.lines() {
                    writeln!(f, "┌    {line}")?;
                }
                writeln!(f, "({:?}, {:?})", node.value(), node.color())?;
                let mut lines = right.lines().peekable();
                while let Some(line) = lines.next() {
                    write!(f, "└    {line}")?;
                    if lines.peek().is_some() {
                        writeln!(f)?;
                    }
                }
                Ok(())
            },
            None => write!(f, "-"),
        }
    }
}
