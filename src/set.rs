//! Ordered set backed by a top-down red-black tree.
//!
//! Nodes live in an append-only arena and link to each other by index, so the
//! tree needs no parent pointers and no unsafe aliasing. A separate vector of
//! node indices records iteration order: insertion order until
//! [`OrderedSet::sort_for_iteration`] is called, comparator order afterwards.
//!
//! Insertion follows the single-pass top-down scheme: nodes with two red
//! children are split on the way down, and red-red violations created by the
//! recursive step are repaired with rotations on the way back up. The root is
//! forced black after every insertion.

use std::cmp::Ordering;
use std::fmt;

/// Index of a node in the arena.
type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

#[derive(Debug, Clone)]
struct Node<T> {
    item: T,
    left: Option<NodeId>,
    right: Option<NodeId>,
    color: Color,
}

/// A set of distinct items ordered by [`Ord`].
///
/// Set algebra returns fresh sets. The plain variants ([`union`](Self::union),
/// [`intersection`](Self::intersection), [`difference`](Self::difference),
/// [`copy`](Self::copy)) clone items, so with reference-counted items such as
/// `Arc<str>` the derived set shares the input's allocations. The `*_with`
/// variants take a copy function for producing independently owned items.
#[derive(Clone)]
pub struct OrderedSet<T> {
    nodes: Vec<Node<T>>,
    root: Option<NodeId>,
    order: Vec<NodeId>,
}

impl<T: Ord> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> OrderedSet<T> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            order: Vec::new(),
        }
    }

    /// Number of items in the set.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add `item` to the set.
    ///
    /// Returns `false` if an equal item is already present; the existing item
    /// is kept and `item` is dropped.
    pub fn add(&mut self, item: T) -> bool {
        let mut added = false;
        let root = self.insert(self.root, item, false, &mut added);
        self.nodes[root].color = Color::Black;
        self.root = Some(root);
        added
    }

    /// Returns `true` if an item equal to `item` is in the set.
    pub fn contains(&self, item: &T) -> bool {
        self.find(item).is_some()
    }

    /// Returns the stored item equal to `item`, if any.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.find(item).map(|id| &self.nodes[id].item)
    }

    /// Height of the tree in edges from the root to the deepest node.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[id];
            stack.extend(node.left.map(|l| (l, level + 1)));
            stack.extend(node.right.map(|r| (r, level + 1)));
        }
        deepest
    }

    /// Reorder iteration so that items come out in ascending order.
    ///
    /// Only the iteration sequence is touched, never the tree. The sort is
    /// stable; items added afterwards are appended to the end of iteration.
    pub fn sort_for_iteration(&mut self) {
        let nodes = &self.nodes;
        self.order
            .sort_by(|&a, &b| nodes[a].item.cmp(&nodes[b].item));
    }

    /// Iterate items in insertion order, or ascending order after
    /// [`sort_for_iteration`](Self::sort_for_iteration).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            set: self,
            position: 0,
        }
    }

    /// All items of `self` and `other`, copying each with `copy`.
    ///
    /// `self` is reproduced node for node, colours included, without any
    /// rebalancing; items of `other` not already present are then added
    /// through the ordinary balanced insertion.
    pub fn union_with(&self, other: &Self, mut copy: impl FnMut(&T) -> T) -> Self {
        let mut union = self.copy_with(&mut copy);
        for id in other.preorder() {
            let item = &other.nodes[id].item;
            if !union.contains(item) {
                union.add(copy(item));
            }
        }
        union
    }

    /// Items present in both `self` and `other`, copying each with `copy`.
    pub fn intersection_with(&self, other: &Self, copy: impl FnMut(&T) -> T) -> Self {
        self.filtered(|item| other.contains(item), copy)
    }

    /// Items of `self` that are not in `other`, copying each with `copy`.
    pub fn difference_with(&self, other: &Self, copy: impl FnMut(&T) -> T) -> Self {
        self.filtered(|item| !other.contains(item), copy)
    }

    /// Structural duplicate of the set, copying each item with `copy`.
    pub fn copy_with(&self, mut copy: impl FnMut(&T) -> T) -> Self {
        let mut duplicate = Self::new();
        for id in self.preorder() {
            let node = &self.nodes[id];
            duplicate.insert_unbalanced(copy(&node.item), node.color);
        }
        duplicate
    }

    fn filtered(&self, keep: impl Fn(&T) -> bool, mut copy: impl FnMut(&T) -> T) -> Self {
        let mut result = Self::new();
        for id in self.preorder() {
            let item = &self.nodes[id].item;
            if keep(item) {
                result.add(copy(item));
            }
        }
        result
    }

    fn find(&self, item: &T) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match item.cmp(&node.item) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Node ids in pre-order (node, left subtree, right subtree).
    fn preorder(&self) -> Vec<NodeId> {
        let mut visited = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            visited.push(id);
            let node = &self.nodes[id];
            stack.extend(node.right);
            stack.extend(node.left);
        }
        visited
    }

    fn alloc(&mut self, item: T, color: Color) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            item,
            left: None,
            right: None,
            color,
        });
        self.order.push(id);
        id
    }

    fn is_red(&self, link: Option<NodeId>) -> bool {
        link.is_some_and(|id| self.nodes[id].color == Color::Red)
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let Some(child) = self.nodes[id].right else {
            return id;
        };
        self.nodes[id].right = self.nodes[child].left;
        self.nodes[child].left = Some(id);
        child
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let Some(child) = self.nodes[id].left else {
            return id;
        };
        self.nodes[id].left = self.nodes[child].right;
        self.nodes[child].right = Some(id);
        child
    }

    /// Insert below `link`, returning the new root of that subtree.
    ///
    /// `from_right` tells whether `link` is the right child of its parent.
    fn insert(&mut self, link: Option<NodeId>, item: T, from_right: bool, added: &mut bool) -> NodeId {
        let Some(mut id) = link else {
            *added = true;
            return self.alloc(item, Color::Red);
        };

        let (left, right) = (self.nodes[id].left, self.nodes[id].right);
        if self.is_red(left) && self.is_red(right) {
            self.nodes[id].color = Color::Red;
            for child in [left, right].into_iter().flatten() {
                self.nodes[child].color = Color::Black;
            }
        }

        match item.cmp(&self.nodes[id].item) {
            Ordering::Less => {
                let child = self.insert(left, item, false, added);
                self.nodes[id].left = Some(child);

                // Red node reached from the right with a red left child: hand
                // the zig-zag to the parent as a straight line.
                if from_right && self.is_red(Some(id)) && self.is_red(Some(child)) {
                    id = self.rotate_right(id);
                }
                let child = self.nodes[id].left;
                let grandchild = child.and_then(|c| self.nodes[c].left);
                if self.is_red(child) && self.is_red(grandchild) {
                    id = self.rotate_right(id);
                    self.nodes[id].color = Color::Black;
                    if let Some(right) = self.nodes[id].right {
                        self.nodes[right].color = Color::Red;
                    }
                }
            }
            Ordering::Greater => {
                let child = self.insert(right, item, true, added);
                self.nodes[id].right = Some(child);

                if !from_right && self.is_red(Some(id)) && self.is_red(Some(child)) {
                    id = self.rotate_left(id);
                }
                let child = self.nodes[id].right;
                let grandchild = child.and_then(|c| self.nodes[c].right);
                if self.is_red(child) && self.is_red(grandchild) {
                    id = self.rotate_left(id);
                    self.nodes[id].color = Color::Black;
                    if let Some(left) = self.nodes[id].left {
                        self.nodes[left].color = Color::Red;
                    }
                }
            }
            Ordering::Equal => {}
        }
        id
    }

    /// Plain binary-search placement keeping the given colour; no rotations.
    fn insert_unbalanced(&mut self, item: T, color: Color) {
        let Some(mut current) = self.root else {
            let id = self.alloc(item, color);
            self.root = Some(id);
            return;
        };
        loop {
            let node = &self.nodes[current];
            let (next, go_left) = match item.cmp(&node.item) {
                Ordering::Less => (node.left, true),
                Ordering::Greater => (node.right, false),
                Ordering::Equal => return,
            };
            match next {
                Some(next) => current = next,
                None => {
                    let id = self.alloc(item, color);
                    if go_left {
                        self.nodes[current].left = Some(id);
                    } else {
                        self.nodes[current].right = Some(id);
                    }
                    return;
                }
            }
        }
    }
}

impl<T: Ord + Clone> OrderedSet<T> {
    pub fn union(&self, other: &Self) -> Self {
        self.union_with(other, T::clone)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        self.intersection_with(other, T::clone)
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.difference_with(other, T::clone)
    }

    pub fn copy(&self) -> Self {
        self.copy_with(T::clone)
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.order.iter().map(|&id| &self.nodes[id].item))
            .finish()
    }
}

/// Iterator over the items of an [`OrderedSet`].
pub struct Iter<'a, T> {
    set: &'a OrderedSet<T>,
    position: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = *self.set.order.get(self.position)?;
        self.position += 1;
        Some(&self.set.nodes[id].item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.set.order.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T: Ord> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
