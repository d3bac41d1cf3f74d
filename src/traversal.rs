//! The orders a [`Tree`] can be read back out in. Every traversal walks the tree with an explicit
//! stack (or queue for [`Tree::levelorder`]) instead of recursing and copies the values out into
//! a new `Vec`.

use std::collections::VecDeque;
use std::ptr;

use crate::tree::{Node, Tree};

impl<T> Tree<T> {
    /// References to the values in ascending order.
    pub(crate) fn inorder_refs(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.len());
        self.walk_inorder(|value| values.push(value));
        values
    }

    /// Visits the values in ascending order (left subtree, node, right subtree).
    fn walk_inorder<'a>(&'a self, mut visit: impl FnMut(&'a T)) {
        let mut stack = Vec::with_capacity(self.height());
        let mut current = self.root();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            visit(&node.value);
            current = node.right();
        }
    }

    /// Visits every node before its subtrees (node, left, right).
    fn walk_preorder<'a>(&'a self, mut visit: impl FnMut(&'a T)) {
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = stack.pop() {
            visit(&node.value);
            // Right first so the left subtree is popped first.
            stack.extend(node.right());
            stack.extend(node.left());
        }
    }

    /// Visits every node after its subtrees (left, right, node).
    fn walk_postorder<'a>(&'a self, mut visit: impl FnMut(&'a T)) {
        let mut stack: Vec<&Node<T>> = Vec::with_capacity(self.height());
        let mut previous: Option<&Node<T>> = None;
        let mut current = self.root();

        loop {
            if let Some(node) = current {
                stack.push(node);
                current = node.left();
                continue;
            }
            let Some(&top) = stack.last() else {
                break;
            };
            match top.right() {
                // Coming up from the left subtree, so the right one is still to do.
                Some(right) if !previous.is_some_and(|p| ptr::eq(p, right)) => {
                    current = Some(right);
                }
                _ => {
                    visit(&top.value);
                    previous = stack.pop();
                }
            }
        }
    }

    /// Visits the values one level at a time, each level from left to right.
    fn walk_levelorder<'a>(&'a self, mut visit: impl FnMut(&'a T)) {
        let mut queue: VecDeque<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = queue.pop_front() {
            visit(&node.value);
            queue.extend(node.left());
            queue.extend(node.right());
        }
    }
}

impl<T> Tree<T>
where
    T: Clone,
{
    /// The values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.inorder(), vec![1, 2, 3]);
    /// ```
    pub fn inorder(&self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len());
        self.walk_inorder(|value| values.push(value.clone()));
        values
    }

    /// The values with every node listed before its left and then right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// // Inserting 1, 2, 3 in order rotates 2 up to the root.
    /// let tree: Tree<_> = [1, 2, 3].into_iter().collect();
    /// assert_eq!(tree.preorder(), vec![2, 1, 3]);
    /// ```
    pub fn preorder(&self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len());
        self.walk_preorder(|value| values.push(value.clone()));
        values
    }

    /// The values with every node listed after its left and then right subtree.
    pub fn postorder(&self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len());
        self.walk_postorder(|value| values.push(value.clone()));
        values
    }

    /// The values breadth first: the root, then its children, then their children and so on.
    ///
    /// Each AVL tree has exactly one level order so this is a handy way to pin down a tree's
    /// shape.
    pub fn levelorder(&self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.len());
        self.walk_levelorder(|value| values.push(value.clone()));
        values
    }

    /// The values in ascending order, or descending order when `ascending` is `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::Tree;
    ///
    /// let tree: Tree<_> = [2, 3, 1].into_iter().collect();
    /// assert_eq!(tree.sorted(true), vec![1, 2, 3]);
    /// assert_eq!(tree.sorted(false), vec![3, 2, 1]);
    /// ```
    pub fn sorted(&self, ascending: bool) -> Vec<T> {
        let mut values = self.inorder();
        if !ascending {
            values.reverse();
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A perfect tree of height 3 with 4 at the root.
    fn full_tree() -> Tree<i32> {
        [4, 2, 6, 1, 3, 5, 7].into_iter().collect()
    }

    #[test]
    fn empty_tree_traversals() {
        let tree: Tree<i32> = Tree::new();

        assert!(tree.inorder().is_empty());
        assert!(tree.preorder().is_empty());
        assert!(tree.postorder().is_empty());
        assert!(tree.levelorder().is_empty());
        assert!(tree.sorted(true).is_empty());
        assert!(tree.sorted(false).is_empty());
    }

    #[test]
    fn single_value_traversals() {
        let tree: Tree<_> = [1].into_iter().collect();

        assert_eq!(tree.inorder(), vec![1]);
        assert_eq!(tree.preorder(), vec![1]);
        assert_eq!(tree.postorder(), vec![1]);
        assert_eq!(tree.levelorder(), vec![1]);
    }

    #[test]
    fn full_tree_traversals() {
        let tree = full_tree();

        assert_eq!(tree.inorder(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.preorder(), vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(tree.postorder(), vec![1, 3, 2, 5, 7, 6, 4]);
        assert_eq!(tree.levelorder(), vec![4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(tree.sorted(false), vec![7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn postorder_with_missing_children() {
        // 4 has only a right child and 2 only a left one.
        let mut tree = full_tree();
        tree.remove(&3);
        tree.remove(&5);

        assert_eq!(tree.postorder(), vec![1, 2, 7, 6, 4]);
        assert_eq!(tree.preorder(), vec![4, 2, 1, 6, 7]);
    }

    #[test]
    fn traversals_do_not_mutate() {
        let tree = full_tree();
        let before = tree.levelorder();

        let _ = tree.inorder();
        let _ = tree.preorder();
        let _ = tree.postorder();
        let _ = tree.sorted(false);

        assert_eq!(tree.levelorder(), before);
        assert_eq!(tree.len(), 7);
    }

    /// Counts how many times it has been cloned on this thread.
    #[derive(PartialEq, Eq, PartialOrd, Ord)]
    struct Counted(i32);

    thread_local! {
        static CLONES: std::cell::Cell<usize> = std::cell::Cell::new(0);
    }

    impl Clone for Counted {
        fn clone(&self) -> Self {
            CLONES.with(|clones| clones.set(clones.get() + 1));
            Counted(self.0)
        }
    }

    #[test]
    fn traversals_clone_each_value_once() {
        let tree: Tree<_> = (0..50).map(Counted).collect();
        let traversals: [fn(&Tree<Counted>) -> Vec<Counted>; 4] = [
            Tree::inorder,
            Tree::preorder,
            Tree::postorder,
            Tree::levelorder,
        ];

        for traversal in traversals {
            CLONES.with(|clones| clones.set(0));
            let values = traversal(&tree);
            assert_eq!(values.len(), 50);
            assert_eq!(CLONES.with(|clones| clones.get()), 50);
        }
    }

    #[test]
    fn traversals_of_owned_values() {
        let tree: Tree<_> = ["pear", "apple", "fig"].map(String::from).into_iter().collect();

        assert_eq!(tree.inorder(), ["apple", "fig", "pear"]);
        assert_eq!(tree.levelorder(), ["fig", "apple", "pear"]);
    }
}
