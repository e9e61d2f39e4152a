use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;

use super::{Color, DebugSubtree, Iter, Link, Node, NodePtr, clone_subtree, color_of, free_subtree};
use crate::collections::traits::order::{Comparator, NaturalOrder};
use crate::collections::traits::set::Set;
use crate::util::error::EmptyCollection;
use crate::util::option::OptionExtension;

/// A set of unique elements, kept in ascending order by a red-black tree.
///
/// The order is defined by a [`Comparator`], which defaults to [`NaturalOrder`] for types that
/// implement [`Ord`]. Two elements that compare as [`Equal`](Ordering::Equal) occupy the same slot,
/// so inserting an element equal to one already in the set is rejected and the original element is
/// kept.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the OrderedSet.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `insert` | `O(log n)` |
/// | `remove` | `O(log n)` |
/// | `contains` | `O(log n)` |
/// | `first/last` | `O(log n)` |
/// | `iter` | `O(n)` (amortized `O(1)` per step) |
pub struct OrderedSet<T, C: Comparator<T> = NaturalOrder> {
    pub(crate) root: Link<T>,
    pub(crate) len: usize,
    pub(crate) cmp: C,
    pub(crate) _phantom: PhantomData<Box<Node<T>>>,
}

impl<T: Ord> OrderedSet<T> {
    /// Creates a new, empty OrderedSet using the natural ordering of `T`.
    pub const fn new() -> OrderedSet<T> {
        OrderedSet::with_comparator(NaturalOrder)
    }
}

impl<T, C: Comparator<T>> OrderedSet<T, C> {
    /// Creates a new, empty OrderedSet which orders its elements with `cmp`.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::tree::OrderedSet;
    /// let mut set = OrderedSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// set.extend([1, 3, 2]);
    /// assert!(set.iter().eq(&[3, 2, 1]));
    /// ```
    pub const fn with_comparator(cmp: C) -> OrderedSet<T, C> {
        OrderedSet {
            root: None,
            len: 0,
            cmp,
            _phantom: PhantomData,
        }
    }

    /// Returns the number of elements in the set.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set contains no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the set's comparator.
    pub const fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Inserts `value` into the set. Returns false, dropping `value` and leaving the set
    /// unchanged, if an equal element is already present.
    ///
    /// # Examples
    /// ```
    /// # use standard_collections::collections::tree::OrderedSet;
    /// let mut set = OrderedSet::new();
    /// assert!(set.insert(5));
    /// assert!(!set.insert(5));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut go_left = false;
        let mut cursor = self.root;

        while let Some(node) = cursor {
            parent = Some(node);
            match self.cmp.compare(&value, node.value()) {
                Ordering::Less => {
                    go_left = true;
                    cursor = node.left();
                },
                Ordering::Greater => {
                    go_left = false;
                    cursor = node.right();
                },
                Ordering::Equal => return false,
            }
        }

        let node = NodePtr::from_node(Node {
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(node),
            Some(p) if go_left => p.set_left(Some(node)),
            Some(p) => p.set_right(Some(node)),
        }

        self.len += 1;
        self.fix_insert(node);
        true
    }

    /// Removes the element equal to `value` from the set. Returns false if there was no such
    /// element.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`, if there is one.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let node = self.find(value)?;
        Some(self.unlink(node))
    }

    /// Returns true if the set contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Returns a reference to the stored element equal to `value`, if there is one.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.find(value).map(NodePtr::value)
    }

    /// Returns a reference to the smallest element in the set.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the set is empty.
    pub fn first(&self) -> Result<&T, EmptyCollection> {
        self.root
            .map(|root| root.leftmost().value())
            .or_empty()
    }

    /// Returns a reference to the largest element in the set.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the set is empty.
    pub fn last(&self) -> Result<&T, EmptyCollection> {
        self.root
            .map(|root| root.rightmost().value())
            .or_empty()
    }

    /// Removes and returns the smallest element in the set.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the set is empty.
    pub fn pop_first(&mut self) -> Result<T, EmptyCollection> {
        let node = self.root.or_empty()?.leftmost();
        Ok(self.unlink(node))
    }

    /// Removes and returns the largest element in the set.
    ///
    /// # Errors
    /// Returns [`EmptyCollection`] if the set is empty.
    pub fn pop_last(&mut self) -> Result<T, EmptyCollection> {
        let node = self.root.or_empty()?.rightmost();
        Ok(self.unlink(node))
    }

    /// Drops every element in the set.
    pub fn clear(&mut self) {
        let root = self.root.take();
        self.len = 0;
        // SAFETY: The root has been detached, so nothing else can reach the subtree.
        unsafe { free_subtree(root) }
    }

    /// Returns an iterator over the elements of the set in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.into_iter()
    }

    pub(crate) fn find(&self, value: &T) -> Link<T> {
        let mut cursor = self.root;
        while let Some(node) = cursor {
            cursor = match self.cmp.compare(value, node.value()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Restores the red-black invariants after `node` has been inserted as a red leaf.
    fn fix_insert(&mut self, mut node: NodePtr<T>) {
        while let Some(parent) = node.parent()
            .filter(|p| p.color().is_red())
        {
            // UNREACHABLE: A red parent is never the root, so it has a parent of its own.
            let grandparent = unsafe { parent.parent().unreachable() };
            let parent_is_left = grandparent.left() == Some(parent);
            let uncle = if parent_is_left { grandparent.right() } else { grandparent.left() };

            match uncle.filter(|u| u.color().is_red()) {
                Some(uncle) => {
                    // Push the blackness of the grandparent down a level and continue from there.
                    parent.set_color(Color::Black);
                    uncle.set_color(Color::Black);
                    grandparent.set_color(Color::Red);
                    node = grandparent;
                },
                None => {
                    let mut parent = parent;
                    if parent_is_left {
                        if parent.right() == Some(node) {
                            node = parent;
                            self.rotate_left(node);
                            // UNREACHABLE: The rotation moved node under its old right child.
                            parent = unsafe { node.parent().unreachable() };
                        }
                        parent.set_color(Color::Black);
                        grandparent.set_color(Color::Red);
                        self.rotate_right(grandparent);
                    } else {
                        if parent.left() == Some(node) {
                            node = parent;
                            self.rotate_right(node);
                            // UNREACHABLE: The rotation moved node under its old left child.
                            parent = unsafe { node.parent().unreachable() };
                        }
                        parent.set_color(Color::Black);
                        grandparent.set_color(Color::Red);
                        self.rotate_left(grandparent);
                    }
                },
            }
        }

        if let Some(root) = self.root {
            root.set_color(Color::Black);
        }
    }

    /// Unlinks `node` from the tree, rebalances, and returns the node's value.
    fn unlink(&mut self, node: NodePtr<T>) -> T {
        let mut removed_color = node.color();
        let replacement;
        let replacement_parent;

        match (node.left(), node.right()) {
            (None, right) => {
                replacement = right;
                replacement_parent = node.parent();
                self.transplant(node, right);
            },
            (left, None) => {
                replacement = left;
                replacement_parent = node.parent();
                self.transplant(node, left);
            },
            (Some(left), Some(right)) => {
                // Two children: the in-order successor takes the node's place.
                let successor = right.leftmost();
                removed_color = successor.color();
                replacement = successor.right();

                if successor.parent() == Some(node) {
                    replacement_parent = Some(successor);
                } else {
                    replacement_parent = successor.parent();
                    self.transplant(successor, successor.right());
                    successor.set_right(Some(right));
                    right.set_parent(Some(successor));
                }

                self.transplant(node, Some(successor));
                successor.set_left(Some(left));
                left.set_parent(Some(successor));
                successor.set_color(node.color());
            },
        }

        self.len -= 1;

        if removed_color.is_black() {
            self.fix_remove(replacement, replacement_parent);
        }

        // SAFETY: node has been fully unlinked, no remaining node points to it.
        unsafe { node.take_node() }.value
    }

    /// Restores the red-black invariants after a black node was removed above `node`, which may
    /// be an empty link. `parent` is tracked separately because an empty link has no parent
    /// pointer.
    fn fix_remove(&mut self, mut node: Link<T>, mut parent: Link<T>) {
        while node != self.root && color_of(node).is_black() {
            // UNREACHABLE: node isn't the root, so it has a parent.
            let p = unsafe { parent.unreachable() };

            if p.left() == node {
                // UNREACHABLE: node's side is a black short of its sibling's side, so the sibling
                // has a black height of at least one and can't be empty.
                let mut sibling = unsafe { p.right().unreachable() };

                if sibling.color().is_red() {
                    sibling.set_color(Color::Black);
                    p.set_color(Color::Red);
                    self.rotate_left(p);
                    // UNREACHABLE: The red sibling's black children are now p's right child.
                    sibling = unsafe { p.right().unreachable() };
                }

                if color_of(sibling.left()).is_black() && color_of(sibling.right()).is_black() {
                    sibling.set_color(Color::Red);
                    node = Some(p);
                    parent = p.parent();
                } else {
                    if color_of(sibling.right()).is_black() {
                        if let Some(nephew) = sibling.left() {
                            nephew.set_color(Color::Black);
                        }
                        sibling.set_color(Color::Red);
                        self.rotate_right(sibling);
                        // UNREACHABLE: The red nephew was rotated into the sibling's place.
                        sibling = unsafe { p.right().unreachable() };
                    }

                    sibling.set_color(p.color());
                    p.set_color(Color::Black);
                    if let Some(nephew) = sibling.right() {
                        nephew.set_color(Color::Black);
                    }
                    self.rotate_left(p);
                    node = self.root;
                    parent = None;
                }
            } else {
                // UNREACHABLE: As above, mirrored.
                let mut sibling = unsafe { p.left().unreachable() };

                if sibling.color().is_red() {
                    sibling.set_color(Color::Black);
                    p.set_color(Color::Red);
                    self.rotate_right(p);
                    // UNREACHABLE: As above, mirrored.
                    sibling = unsafe { p.left().unreachable() };
                }

                if color_of(sibling.left()).is_black() && color_of(sibling.right()).is_black() {
                    sibling.set_color(Color::Red);
                    node = Some(p);
                    parent = p.parent();
                } else {
                    if color_of(sibling.left()).is_black() {
                        if let Some(nephew) = sibling.right() {
                            nephew.set_color(Color::Black);
                        }
                        sibling.set_color(Color::Red);
                        self.rotate_left(sibling);
                        // UNREACHABLE: As above, mirrored.
                        sibling = unsafe { p.left().unreachable() };
                    }

                    sibling.set_color(p.color());
                    p.set_color(Color::Black);
                    if let Some(nephew) = sibling.left() {
                        nephew.set_color(Color::Black);
                    }
                    self.rotate_right(p);
                    node = self.root;
                    parent = None;
                }
            }
        }

        if let Some(node) = node {
            node.set_color(Color::Black);
        }
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new`, as seen from `old`'s
    /// parent. `old`'s own links are left untouched.
    fn transplant(&mut self, old: NodePtr<T>, new: Link<T>) {
        match old.parent() {
            None => self.root = new,
            Some(parent) if old.is_left_child() => parent.set_left(new),
            Some(parent) => parent.set_right(new),
        }

        if let Some(new) = new {
            new.set_parent(old.parent());
        }
    }

    fn rotate_left(&mut self, node: NodePtr<T>) {
        // UNREACHABLE: Left rotations are only performed on nodes with a right child.
        let pivot = unsafe { node.right().unreachable() };

        node.set_right(pivot.left());
        if let Some(inner) = pivot.left() {
            inner.set_parent(Some(node));
        }

        self.transplant(node, Some(pivot));
        pivot.set_left(Some(node));
        node.set_parent(Some(pivot));
    }

    fn rotate_right(&mut self, node: NodePtr<T>) {
        // UNREACHABLE: Right rotations are only performed on nodes with a left child.
        let pivot = unsafe { node.left().unreachable() };

        node.set_left(pivot.right());
        if let Some(inner) = pivot.right() {
            inner.set_parent(Some(node));
        }

        self.transplant(node, Some(pivot));
        pivot.set_right(Some(node));
        node.set_parent(Some(pivot));
    }
}

impl<T, C: Comparator<T>> Set<T> for OrderedSet<T, C> {
    type Iter<'a> = Iter<'a, T> where Self: 'a, T: 'a;

    fn len(&self) -> usize {
        self.len
    }

    fn contains(&self, item: &T) -> bool {
        OrderedSet::contains(self, item)
    }

    fn iter<'a>(&'a self) -> Self::Iter<'a> {
        OrderedSet::iter(self)
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.cmp.compare(a, b)
    }
}

impl<T, C: Comparator<T>> Extend<T> for OrderedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OrderedSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OrderedSet<T> {
    fn from(value: [T; N]) -> Self {
        value.into_iter().collect()
    }
}

impl<T, C: Comparator<T> + Default> Default for OrderedSet<T, C> {
    fn default() -> Self {
        OrderedSet::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T>> Drop for OrderedSet<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone, C: Comparator<T> + Clone> Clone for OrderedSet<T, C> {
    fn clone(&self) -> Self {
        OrderedSet {
            root: clone_subtree(self.root, None),
            len: self.len,
            cmp: self.cmp.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: PartialEq, C: Comparator<T>> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C: Comparator<T>> Eq for OrderedSet<T, C> {}

impl<T: Debug, C: Comparator<T>> Debug for OrderedSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedSet")
            .field("nodes", &DebugSubtree(self.root))
            .field("len", &self.len)
            .finish()
    }
}

impl<T: Debug, C: Comparator<T>> Display for OrderedSet<T, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// SAFETY: The set uniquely owns all of its nodes, the raw pointers are never shared between sets.
unsafe impl<T: Send, C: Comparator<T> + Send> Send for OrderedSet<T, C> {}
// SAFETY: The set's safe API obeys the borrow checker, so no interior mutability occurs.
unsafe impl<T: Sync, C: Comparator<T> + Sync> Sync for OrderedSet<T, C> {}

