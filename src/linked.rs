//! A linked BST where every node exclusively owns its children. Nothing rebalances on its own;
//! the shape is whatever the insertion order makes it until [`Tree::rebalance`] is called.
//!
//! Items are their own keys. Equal items are all kept: a duplicate always goes to the right of
//! the item it ties with.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.add(1);
//! tree.add(2);
//! assert_eq!(tree.find(&1), Some(&1));
//! assert_eq!(tree.len(), 2);
//!
//! // Removing an item hands it back.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert!(!tree.contains(&1));
//!
//! // Removing it again is an error rather than a silent no-op.
//! assert_eq!(tree.remove(&1), Err(Error::NotFound));
//! assert_eq!(tree.len(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::iter::{InOrder, IntoIter, LevelOrder, PostOrder, PreOrder};

/// An owning edge to an optional subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A single item and the subtrees hanging off of it. A node whose links are both `None` is a
/// leaf.
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(item: T) -> Box<Self> {
        Box::new(Self {
            item,
            left: None,
            right: None,
        })
    }

    /// Detaches the largest item from the subtree rooted at `root` and returns it alongside
    /// whatever is left of that subtree.
    fn split_max(mut root: Box<Self>) -> (T, Link<T>) {
        match Self::take_max(&mut root.right) {
            Some(max) => (max, Some(root)),
            // `root` is the maximum itself so its left child moves up into its place.
            None => {
                let Node { item, left, .. } = *root;
                (item, left)
            }
        }
    }

    /// Walks right from `link` as far as possible and unlinks the node it ends on, splicing that
    /// node's left child into the vacated slot. Returns `None` for an empty link.
    fn take_max(mut link: &mut Link<T>) -> Option<T> {
        while link.as_ref().map_or(false, |node| node.right.is_some()) {
            if let Some(node) = link {
                link = &mut node.right;
            }
        }

        let max = link.take()?;
        let Node { item, left, .. } = *max;
        *link = left;
        Some(item)
    }

    /// Builds a minimum height subtree out of `items`, which must be in ascending order. Every
    /// slot is `Some` going in and taken by the time this returns.
    ///
    /// The middle slot (`len / 2`) picks the subtree root, except that the root is moved back to
    /// the first of any run of items equal to it. Everything left of the root is then strictly
    /// smaller, the same as if the items had been added one by one.
    fn build_balanced(items: &mut [Option<T>]) -> Link<T>
    where
        T: Ord,
    {
        let mid = items.len() / 2;
        let pivot = items.get(mid)?;
        let root = items[..mid].partition_point(|item| item < pivot);

        let (left, rest) = items.split_at_mut(root);
        let (item, right) = rest.split_first_mut()?;
        let item = item.take()?;

        Some(Box::new(Self {
            item,
            left: Self::build_balanced(left),
            right: Self::build_balanced(right),
        }))
    }
}

/// Descends from `link` to the slot holding a node equal to `item`, or to the empty slot where the
/// search fell off the tree.
fn seek<'a, T>(mut link: &'a mut Link<T>, item: &T) -> &'a mut Link<T>
where
    T: Ord,
{
    loop {
        let ordering = link.as_deref().map(|node| item.cmp(&node.item));
        match ordering {
            None | Some(Ordering::Equal) => return link,
            Some(Ordering::Less) | Some(Ordering::Greater) => {}
        }

        if let Some(node) = link {
            link = if ordering == Some(Ordering::Less) {
                &mut node.left
            } else {
                &mut node.right
            };
        }
    }
}

/// An unbalanced Binary Search Tree of items that are both key and value. This can be used for
/// adding, finding, and removing items, and for walking them in several orders.
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        drop(IntoIter::new(self.root.take(), self.size));
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    /// Copies the tree node for node, keeping its exact shape.
    fn clone(&self) -> Self {
        // Post-order hands us every node after its children, so the copies of its subtrees are
        // always on top of `built`, right above left.
        let mut built: Vec<Box<Node<T>>> = Vec::new();
        let mut nodes = PostOrder::new(self.root.as_deref());
        while let Some(node) = nodes.next_node() {
            let right = node.right.as_ref().and_then(|_| built.pop());
            let left = node.left.as_ref().and_then(|_| built.pop());
            built.push(Box::new(Node {
                item: node.item.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            size: self.size,
        }
    }
}

/// Lists the size and the items in pre-order. Use [`Display`][fmt::Display] to see the shape.
impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("preorder", &PreOrderItems(self))
            .finish()
    }
}

/// Formats a tree's items as a flat list so `Debug` walks it with `PreOrder`'s explicit stack
/// instead of recursing once per level.
struct PreOrderItems<'a, T>(&'a Tree<T>);

impl<T> fmt::Debug for PreOrderItems<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.preorder()).finish()
    }
}

/// Draws the tree rotated 90 degrees counter-clockwise: one item per line, right subtree above
/// its parent, and one `"| "` of indentation per level.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A reverse in-order walk, tracking how deep each node sits.
        let mut stack = Vec::new();
        let mut current = self.root.as_deref().map(|root| (root, 0));
        loop {
            while let Some((node, level)) = current {
                stack.push((node, level));
                current = node.right.as_deref().map(|right| (right, level + 1));
            }
            let Some((node, level)) = stack.pop() else {
                return Ok(());
            };
            writeln!(f, "{}{}", "| ".repeat(level), node.item)?;
            current = node.left.as_deref().map(|left| (left, level + 1));
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut tree = Self::new();
        tree.extend(items);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.add(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = PreOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.preorder()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let size = mem::take(&mut self.size);
        IntoIter::new(self.root.take(), size)
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// How many items are stored, duplicates included.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        trace!(size = self.size, "clearing tree");
        drop(IntoIter::new(self.root.take(), self.size));
        self.size = 0;
    }

    /// Potentially finds the stored item equal to `item`. If no node holds an equal item, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&3), Some(&3));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match item.cmp(&node.item) {
                Ordering::Equal => return Some(&node.item),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        None
    }

    /// Whether an item equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Adds `item` as a new leaf. Duplicates are stored rather than rejected, so this always grows
    /// the tree by one.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(1);
    /// tree.add(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&1, &1]);
    /// ```
    pub fn add(&mut self, item: T)
    where
        T: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            // Ties go right.
            link = if item < node.item {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        *link = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Removes one item equal to `item` from the tree and returns it. If the tree doesn't contain
    /// such an item, [`Error::NotFound`] is returned and the tree is left untouched.
    ///
    /// **Note** removing a node with two children moves the largest item of its left subtree up
    /// into it. If that item is stored more than once, the other copies stay in the left subtree,
    /// so after a removal a left subtree may hold items *equal* to its parent (never greater).
    /// Lookups are unaffected since they stop at the first equal item.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.remove(&5), Err(Error::NotFound));
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), vec![&3, &8]);
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: Ord,
    {
        let link = seek(&mut self.root, item);
        let Some(mut node) = link.take() else {
            trace!(size = self.size, "item to remove not in tree");
            return Err(Error::NotFound);
        };

        let removed = match (node.left.take(), node.right.take()) {
            // Keep the node where it is but swap in its predecessor: the largest item of its left
            // subtree. When the left child is that predecessor, the left child's own left subtree
            // becomes `node.left`.
            (Some(left), Some(right)) => {
                let (predecessor, rest) = Node::split_max(left);
                node.left = rest;
                node.right = Some(right);
                let removed = mem::replace(&mut node.item, predecessor);
                *link = Some(node);
                removed
            }
            (None, right) => {
                *link = right;
                node.item
            }
            (left, None) => {
                *link = left;
                node.item
            }
        };

        self.size -= 1;
        if self.size == 0 {
            self.root = None;
        }
        Ok(removed)
    }

    /// Overwrites the stored item equal to `item` with `new_item` and returns the old one, or
    /// `None` if there is no such item.
    ///
    /// The tree keeps its shape. Nothing checks that `new_item` belongs where `item` was, so a
    /// careless replacement can leave the tree out of order.
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        seek(&mut self.root, item)
            .as_mut()
            .map(|node| mem::replace(&mut node.item, new_item))
    }

    /// Items in ascending order.
    pub fn inorder(&self) -> InOrder<'_, T> {
        InOrder::new(self.root.as_deref(), self.size)
    }

    /// Items root first, then the left subtree, then the right subtree.
    pub fn preorder(&self) -> PreOrder<'_, T> {
        PreOrder::new(self.root.as_deref())
    }

    /// Items with both subtrees before their root.
    pub fn postorder(&self) -> PostOrder<'_, T> {
        PostOrder::new(self.root.as_deref())
    }

    /// Items one level at a time, starting at the root.
    pub fn levelorder(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self.root.as_deref())
    }

    /// Same as [`Tree::preorder`]. This is what iterating over a `&Tree` uses.
    pub fn iter(&self) -> PreOrder<'_, T> {
        self.preorder()
    }

    /// The height of the tree, `-1` when it is empty.
    ///
    /// **Note** a node only counts as taller than `0` when it has *both* children, in which case
    /// it is one more than its taller child. A node missing either child has height `0` no matter
    /// how deep its other subtree goes, so a chain built from sorted input has height `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.extend([2, 1, 3]);
    /// assert_eq!(tree.height(), 1);
    ///
    /// tree.add(4);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        // Every node pushes its height after popping the heights its children pushed.
        let mut heights: Vec<isize> = Vec::new();
        let mut nodes = PostOrder::new(self.root.as_deref());
        while let Some(node) = nodes.next_node() {
            let right = node.right.as_ref().and_then(|_| heights.pop());
            let left = node.left.as_ref().and_then(|_| heights.pop());
            heights.push(match (left, right) {
                (Some(left), Some(right)) => 1 + left.max(right),
                _ => 0,
            });
        }

        heights.pop().unwrap_or(-1)
    }

    /// Whether `height() <= 2 * log2(len() + 1) - 1`.
    pub fn is_balanced(&self) -> bool {
        let bound = 2.0 * ((self.size + 1) as f64).log2() - 1.0;
        self.height() as f64 <= bound
    }

    /// Every item `x` with `low <= x <= high`, in ascending order.
    ///
    /// This filters a full in-order walk; it doesn't skip subtrees that lie outside the range.
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T>
    where
        T: Ord,
    {
        self.inorder()
            .filter(|&item| low <= item && item <= high)
            .collect()
    }

    /// Rebuilds the tree with the smallest possible height, keeping the same items.
    ///
    /// Items are moved in ascending order into freshly allocated nodes; the middle item of every
    /// run becomes the root of the subtree built from that run. When that item has equal
    /// neighbours, the first of them is used instead so equal items never end up to the left of
    /// one another.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// tree.rebalance();
    ///
    /// assert_eq!(tree.preorder().collect::<Vec<_>>(), vec![&4, &2, &1, &3, &6, &5, &7]);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn rebalance(&mut self)
    where
        T: Ord,
    {
        let height_before = self.height();
        let mut items: Vec<Option<T>> = mem::take(self).into_iter().map(Some).collect();
        let size = items.len();

        self.root = Node::build_balanced(&mut items);
        self.size = size;
        debug!(
            size,
            height_before,
            height_after = self.height(),
            "rebalanced tree"
        );
    }

    /// The smallest stored item strictly greater than `item`.
    ///
    /// **Note** when there is no such item, `item` itself comes back rather than `None`. Compare
    /// [`Tree::predecessor`], which does return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&15), &20);
    /// assert_eq!(tree.successor(&30), &30);
    /// assert_eq!(tree.successor(&99), &99);
    /// ```
    pub fn successor<'a>(&'a self, item: &'a T) -> &'a T
    where
        T: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if node.item > *item {
                best = Some(&node.item);
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }

        best.unwrap_or(item)
    }

    /// The largest stored item strictly less than `item`, or `None` if there isn't one.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [10, 20, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&25), Some(&20));
    /// assert_eq!(tree.predecessor(&10), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if node.item < *item {
                best = Some(&node.item);
                node.right.as_deref()
            } else {
                node.left.as_deref()
            };
        }

        best
    }
}
