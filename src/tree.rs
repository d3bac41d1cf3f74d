//! A mutable, self-balancing ordered set (specifically, an AVL tree). Values are stored at most
//! once and the tree rebalances itself after every insertion and removal so that searching,
//! inserting and removing all take `O(lg N)` time.
//!
//! # Examples
//!
//! ```
//! use avl::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//!
//! assert!(tree.insert(1));
//! assert!(tree.search(&1));
//!
//! // Inserting a value that is already stored does nothing.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing reports whether the value was there.
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::error::TreeError;

/// An owning link to a child subtree. `None` is the empty subtree which has a height of 0.
type Link<T> = Option<Box<Node<T>>>;

/// A self-balancing Binary Search Tree storing distinct values. This can be used for inserting,
/// searching, and removing values, and for reading them back out in several orders.
#[derive(Clone)]
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.inorder_refs()).finish()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns `true` if the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a tree with a single
    /// value has a height of 1.
    ///
    /// This follows the taller child at every level so it takes `O(lg N)` time.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = (0..7).collect();
    /// assert_eq!(tree.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root();
        while let Some(node) = current {
            height += 1;
            current = if node.balance < 0 {
                node.left()
            } else {
                node.right()
            };
        }
        height
    }

    /// Drops every value in the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns whether `value` is stored in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.search(&1));
    /// assert!(!tree.search(&42));
    /// ```
    pub fn search(&self, value: &T) -> bool
    where
        T: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right(),
            };
        }
        false
    }

    /// Inserts `value` into the tree, returning `true` if it was not already present. Inserting a
    /// value that is already stored leaves the tree untouched and returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.inorder(), vec![1]);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let mut path = Path::with_capacity(self.height());
        if let Some(existing) = self.descend(&value, &mut path) {
            log::trace!("rejected duplicate value at depth {}", path.len());
            self.root = path.close(Some(existing));
            return false;
        }

        // Walk back up the path. Each ancestor's subtree on `side` grew by one level.
        let mut subtree = Node::new_boxed(value);
        while let Some((mut parent, side)) = path.pop() {
            parent.set_child(side, Some(subtree));
            parent.balance += side.weight();
            match parent.balance {
                // The shorter side caught up so the parent's height is unchanged.
                0 => {
                    subtree = parent;
                    break;
                }
                -1 | 1 => subtree = parent,
                // A rotation after an insertion restores the subtree's height from before the
                // insertion.
                _ => {
                    subtree = parent.rebalance();
                    break;
                }
            }
        }
        self.root = path.close(Some(subtree));
        self.len += 1;

        true
    }

    /// Removes `value` from the tree, returning `true` if it was present. Removing a value that
    /// isn't stored leaves the tree untouched and returns `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert!(tree.remove(&2));
    /// assert!(!tree.remove(&2));
    /// assert_eq!(tree.inorder(), vec![1, 3]);
    /// ```
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        let mut path = Path::with_capacity(self.height());
        let Some(mut target) = self.descend(value, &mut path) else {
            log::trace!("value to remove not found after {} levels", path.len());
            self.root = path.close(None);
            return false;
        };

        let replacement = match (target.left.take(), target.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            // Move the inorder successor's value up into `target` and remove the successor's node
            // instead. The successor has no left child so it's spliced out like the cases above.
            (Some(left), Some(right)) => {
                target.left = Some(left);
                let target_depth = path.len();
                path.push(target, Side::Right);

                let mut successor = right;
                while let Some(next) = successor.take_child(Side::Left) {
                    path.push(successor, Side::Left);
                    successor = next;
                }

                let Node {
                    value: successor_value,
                    right: successor_right,
                    ..
                } = *successor;
                path.node_mut(target_depth).value = successor_value;

                successor_right
            }
        };

        // Walk back up the path. Each ancestor's subtree on `side` shrank by one level.
        let mut subtree = replacement;
        while let Some((mut parent, side)) = path.pop() {
            parent.set_child(side, subtree);
            parent.balance -= side.weight();
            if !(-1..=1).contains(&parent.balance) {
                parent = parent.rebalance();
            }

            // A subtree root leaning to one side still has the height it had before the removal
            // so nothing above it changes.
            let shrank = parent.balance == 0;
            subtree = Some(parent);
            if !shrank {
                break;
            }
        }
        self.root = path.close(subtree);
        self.len -= 1;

        true
    }

    /// Returns the smallest value in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Empty`] if the tree holds no values.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.min(), Err(TreeError::Empty));
    ///
    /// tree.extend([3, 1, 2]);
    /// assert_eq!(tree.min(), Ok(1));
    /// ```
    pub fn min(&self) -> Result<T, TreeError>
    where
        T: Clone,
    {
        let mut node = self.root().ok_or(TreeError::Empty)?;
        while let Some(left) = node.left() {
            node = left;
        }
        Ok(node.value.clone())
    }

    /// Returns the largest value in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Empty`] if the tree holds no values.
    pub fn max(&self) -> Result<T, TreeError>
    where
        T: Clone,
    {
        let mut node = self.root().ok_or(TreeError::Empty)?;
        while let Some(right) = node.right() {
            node = right;
        }
        Ok(node.value.clone())
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Detaches nodes from the root down towards `value`, recording each one in `path` along with
    /// the side the search continued into.
    ///
    /// If a node holds `value` it is returned, detached, and `path` holds its ancestors. Otherwise
    /// `None` is returned and the last node in `path` is the one `value` would hang from.
    fn descend(&mut self, value: &T, path: &mut Path<T>) -> Option<Box<Node<T>>>
    where
        T: Ord,
    {
        let mut current = self.root.take();
        while let Some(mut node) = current {
            let side = match value.cmp(&node.value) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Some(node),
                Ordering::Greater => Side::Right,
            };
            current = node.take_child(side);
            path.push(node, side);
        }
        None
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Which child of a node a descent continued into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// The change in a node's balance factor when its subtree on this side grows by one level.
    fn weight(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// The ancestors visited on the way down to a node. Each ancestor is detached from its parent
/// while it's in the path (and its child on the recorded side is detached from it) so the nodes
/// can be mutated on the way back up without parent pointers.
struct Path<T> {
    frames: Vec<(Box<Node<T>>, Side)>,
}

impl<T> Path<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn push(&mut self, node: Box<Node<T>>, side: Side) {
        self.frames.push((node, side));
    }

    fn pop(&mut self) -> Option<(Box<Node<T>>, Side)> {
        self.frames.pop()
    }

    /// The ancestor at `depth` levels below the root.
    fn node_mut(&mut self, depth: usize) -> &mut Node<T> {
        &mut self.frames[depth].0
    }

    /// Reattaches every remaining ancestor, unchanged, above `subtree` and returns the root.
    fn close(mut self, mut subtree: Link<T>) -> Link<T> {
        while let Some((mut parent, side)) = self.pop() {
            parent.set_child(side, subtree);
            subtree = Some(parent);
        }
        subtree
    }
}

#[derive(Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    /// The height of the right subtree minus the height of the left subtree. Always in `-1..=1`
    /// outside of the rebalancing of a single insertion or removal.
    balance: i8,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            balance: 0,
            left: None,
            right: None,
        })
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn child_mut(&mut self, side: Side) -> &mut Link<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    fn take_child(&mut self, side: Side) -> Link<T> {
        self.child_mut(side).take()
    }

    fn set_child(&mut self, side: Side, child: Link<T>) {
        *self.child_mut(side) = child;
    }

    /// Restores the AVL invariant of a node whose balance factor reached ±2 and returns the new
    /// root of its subtree.
    ///
    /// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
    fn rebalance(self: Box<Self>) -> Box<Self> {
        let heavy_child_balance = match self.balance {
            -2 => self.left().map(|n| n.balance),
            2 => self.right().map(|n| n.balance),
            _ => None,
        };
        let root = match (self.balance, heavy_child_balance) {
            (-2, Some(1)) => {
                log::trace!("rotating left-right");
                self.rotate_left_right()
            }
            (-2, Some(_)) => {
                log::trace!("rotating right");
                self.rotate_right()
            }
            (2, Some(-1)) => {
                log::trace!("rotating right-left");
                self.rotate_right_left()
            }
            (2, Some(_)) => {
                log::trace!("rotating left");
                self.rotate_left()
            }
            _ => self,
        };

        if cfg!(debug_assertions) {
            assert!((-1..=1).contains(&root.balance));
            assert!(root.left().map_or(true, |n| (-1..=1).contains(&n.balance)));
            assert!(root.right().map_or(true, |n| (-1..=1).contains(&n.balance)));
        }
        root
    }

    /// Rotate self to the left. This moves the right child up vertically and self down vertically.
    /// Used to rebalance the tree when the right child is too tall.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   old_root (i.e. "self")          new_root
    ///    /     \                        /     \
    ///   x    new_root     rotate ->  old_root  z
    ///         /  \                    /  \
    ///        y    z                  x    y
    /// ```
    ///
    /// With `a`/`b` the balance factors of `old_root`/`new_root` before the rotation, the heights
    /// of `x`, `y` and `z` relative to each other give the new factors:
    /// `a' = a - 1 - max(b, 0)` and `b' = b - 1 + min(a', 0)`.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.right.take().expect("Rotate left => right child");
        self.right = new_root.left.take();

        let old_balance = self.balance - 1 - new_root.balance.max(0);
        new_root.balance = new_root.balance - 1 + old_balance.min(0);
        self.balance = old_balance;

        new_root.left = Some(self);
        new_root
    }

    /// Rotate self to the right. The mirror image of [`Node::rotate_left`].
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      old_root (i.e. "self")     new_root
    ///       /     \                   /     \
    ///   new_root   z     rotate ->   x    old_root
    ///    /  \                               /  \
    ///   x    y                             y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.left.take().expect("Rotate right => left child");
        self.left = new_root.right.take();

        let old_balance = self.balance + 1 - new_root.balance.min(0);
        new_root.balance = new_root.balance + 1 + old_balance.max(0);
        self.balance = old_balance;

        new_root.right = Some(self);
        new_root
    }

    fn rotate_right_left(mut self: Box<Self>) -> Box<Self> {
        let right = self.right.take().expect("Rotate right-left => right child");
        self.right = Some(right.rotate_right());
        self.rotate_left()
    }

    fn rotate_left_right(mut self: Box<Self>) -> Box<Self> {
        let left = self.left.take().expect("Rotate left-right => left child");
        self.left = Some(left.rotate_left());
        self.rotate_right()
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::tests::check_invariants;
    use super::*;
    use crate::test::init_logging;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and removes we have the same set of values in both.
    fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone,
    {
        init_logging();
        for op in ops {
            match op {
                Op::Insert(value) => {
                    assert_eq!(tree.insert(value.clone()), set.insert(value.clone()));
                }
                Op::Remove(value) => {
                    assert_eq!(tree.remove(value), set.remove(value));
                }
                Op::Iter => {
                    assert!(tree.inorder().iter().eq(set.iter()));
                }
            }
            check_invariants(tree);
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            (i8::MIN..=i8::MAX).all(|value| tree.search(&value) == set.contains(&value))
                && tree.len() == set.len()
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();

            xs.iter().all(|x| tree.search(x))
        }
    }

    quickcheck::quickcheck! {
        fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();
            let added: BTreeSet<_> = xs.into_iter().collect();
            let nots: BTreeSet<_> = nots.into_iter().collect();
            let mut nots = nots.difference(&added);

            nots.all(|x| !tree.search(x))
        }
    }

    quickcheck::quickcheck! {
        fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
            let mut tree: Tree<_> = xs.iter().copied().collect();
            for remove in &removes {
                tree.remove(remove);
                check_invariants(&tree);
            }

            let mut still_present: BTreeSet<_> = xs.into_iter().collect();
            for remove in &removes {
                still_present.remove(remove);
            }

            removes.iter().all(|x| !tree.search(x))
                && still_present.iter().all(|x| tree.search(x))
                && tree.inorder().iter().eq(still_present.iter())
        }
    }
}
