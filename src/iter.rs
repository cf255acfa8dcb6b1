//! Traversals over a [`Tree`][crate::linked::Tree].
//!
//! Every iterator here keeps its own explicit stack (or queue) instead of recursing, so walking a
//! degenerate tree built from sorted input costs heap memory proportional to its depth rather than
//! call-stack frames.

use std::collections::VecDeque;
use std::fmt;

use crate::linked::{Link, Node};

/// Visits items in ascending order: left subtree, then the node, then the right subtree.
///
/// Created by [`Tree::inorder`][crate::linked::Tree::inorder].
pub struct InOrder<'a, T> {
    /// Nodes whose left subtree is being (or has been) visited but which haven't been yielded.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for InOrder<'_, T> {}

/// Manual implementation of `Clone` so `T` doesn't need to be `Clone` to restart a traversal.
impl<T> Clone for InOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T> fmt::Debug for InOrder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InOrder")
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// Visits each node before either of its subtrees, left subtree first.
///
/// This is the order a `&Tree` iterates in. Created by
/// [`Tree::preorder`][crate::linked::Tree::preorder] or [`Tree::iter`][crate::linked::Tree::iter].
pub struct PreOrder<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> PreOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree comes off the stack first.
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        Some(&node.item)
    }
}

/// Visits both subtrees of a node, left first, before the node itself.
///
/// Created by [`Tree::postorder`][crate::linked::Tree::postorder].
pub struct PostOrder<'a, T> {
    /// Each entry is a node and whether its children have already been pushed.
    stack: Vec<(&'a Node<T>, bool)>,
}

impl<'a, T> PostOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            stack: root.map(|node| (node, false)).into_iter().collect(),
        }
    }

    /// Yields the next node rather than its item. A node always comes after all of its
    /// descendants, which lets callers fold subtrees bottom-up with a stack of partial results.
    pub(crate) fn next_node(&mut self) -> Option<&'a Node<T>> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(node);
            }

            self.stack.push((node, true));
            self.stack
                .extend(node.right.as_deref().map(|right| (right, false)));
            self.stack
                .extend(node.left.as_deref().map(|left| (left, false)));
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|node| &node.item)
    }
}

/// Visits the tree one level at a time, top down and left to right.
///
/// Created by [`Tree::levelorder`][crate::linked::Tree::levelorder].
pub struct LevelOrder<'a, T> {
    queue: VecDeque<&'a Node<T>>,
}

impl<'a, T> LevelOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>) -> Self {
        Self {
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left.as_deref());
        self.queue.extend(node.right.as_deref());
        Some(&node.item)
    }
}

/// Moves items out of a tree in ascending order, freeing nodes as it goes.
///
/// Created by calling `into_iter` on a [`Tree`][crate::linked::Tree].
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(root: Link<T>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    /// Every node on the stack has already had its left child detached.
    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let Node { item, right, .. } = *node;
        self.push_left_spine(right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    // Draining one node at a time keeps dropping a deep tree off the call stack.
    fn drop(&mut self) {
        for _ in self.by_ref() {}
    }
}
