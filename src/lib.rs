//! A left-leaning red-black (LLRB) tree.

// The tree encodes a 2-3 tree in a binary tree by coloring links. A red link joins the two
// elements of a 3-node; black links are the links of the 2-3 tree itself.
//
// The fundamental invariants of an LLRB tree are:
// 1. Red links lean left: no node has a red right child.
// 2. Red links never chain: a red node never has a red left child.
// 3. Perfect black balance: every path from the root to an empty subtree crosses the same number
//    of black links.
// 4. Every node stores the size of its subtree: `count(h) == 1 + count(left) + count(right)`.
//
// Corollary:
// 5. The height is at most `2 * log2(n + 1)`, since no path has more red links than black ones.
//
// All updates are recursive: descend to the edit point, perform it, then rebuild the path
// bottom-up, restoring (1) and (2) at every level on the way back. Insertion and deletion both
// use this bottom-up discipline; mixing it with the top-down 2-3-4 variant breaks (1).

use core::{cmp::Ordering, fmt};

pub mod map;
mod node;
pub mod order;
mod validate;

#[cfg(any(test, feature = "std"))]
mod debug;

#[cfg(any(test, feature = "model"))]
pub mod model;


pub use map::LlrbMap;
pub use node::Node;
pub use order::{inf, less, Bound, Inf, Item};
pub use validate::InvariantError;

use node::Link;

/// A left-leaning red-black tree, implementing a 2-3 tree.
///
/// Implementation based on Sedgewick's [Left-Leaning Red-Black Trees].
///
/// [Left-Leaning Red-Black Trees]: https://sedgewick.io/wp-content/themes/sedgewick/papers/2008LLRB.pdf
#[derive(Clone)]
pub struct LlrbTree<T> {
    root: Link<T>,
}

impl<T> LlrbTree<T> {
    /// Returns a new empty tree.
    pub const fn new() -> LlrbTree<T> {
        LlrbTree { root: None }
    }

    /// Returns the number of elements in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        node::count(&self.root)
    }

    /// Returns `true` if the tree contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root node of the tree.
    ///
    /// Intended for code that serializes the tree.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Replaces the root node of the tree, dropping the previous contents.
    ///
    /// Intended for code that deserializes the tree. The caller is responsible for handing over a
    /// structure that satisfies the LLRB invariants; [`check_invariants`] can verify it.
    ///
    /// [`check_invariants`]: LlrbTree::check_invariants
    pub fn set_root(&mut self, root: Option<Box<Node<T>>>) {
        log::debug!(
            "installing external root with {} elements",
            node::count(&root)
        );
        self.root = root;
    }

    /// Detaches and returns the root node, leaving the tree empty.
    pub fn take_root(&mut self) -> Option<Box<Node<T>>> {
        self.root.take()
    }

    /// Returns the minimum element of the tree.
    pub fn min(&self) -> Option<&T> {
        let mut cur = self.root()?;
        while let Some(left) = cur.left() {
            cur = left;
        }
        Some(cur.item())
    }

    /// Returns the maximum element of the tree.
    pub fn max(&self) -> Option<&T> {
        let mut cur = self.root()?;
        while let Some(right) = cur.right() {
            cur = right;
        }
        Some(cur.item())
    }

    /// Removes and returns the minimum element of the tree.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn delete_min(&mut self) -> Option<T> {
        let (root, deleted) = Node::delete_min(self.root.take());
        self.set_root_black(root);
        deleted
    }

    /// Removes and returns the maximum element of the tree.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn delete_max(&mut self) -> Option<T> {
        let (root, deleted) = Node::delete_max(self.root.take());
        self.set_root_black(root);
        deleted
    }

    /// Clears the tree, removing all elements.
    pub fn clear(&mut self) {
        self.root = None;
    }

    pub(crate) fn get_by<F>(&self, probe: F) -> Option<&T>
    where
        F: Fn(&T) -> Ordering,
    {
        let mut opt_cur = self.root();

        loop {
            let cur = opt_cur?;

            match probe(cur.item()) {
                Ordering::Less => opt_cur = cur.left(),
                Ordering::Equal => return Some(cur.item()),
                Ordering::Greater => opt_cur = cur.right(),
            }
        }
    }

    // The caller must not change the element's order.
    pub(crate) fn get_by_mut<F>(&mut self, probe: F) -> Option<&mut T>
    where
        F: Fn(&T) -> Ordering,
    {
        let mut opt_cur = self.root.as_deref_mut();

        loop {
            let cur = opt_cur?;

            match probe(cur.item()) {
                Ordering::Less => opt_cur = cur.left_mut(),
                Ordering::Equal => return Some(cur.item_mut()),
                Ordering::Greater => opt_cur = cur.right_mut(),
            }
        }
    }

    pub(crate) fn delete_by<F>(&mut self, probe: F) -> Option<T>
    where
        F: Fn(&T) -> Ordering,
    {
        // The descent rebuilds nodes on its way down, so rule out misses first to leave the
        // tree untouched.
        self.get_by(&probe)?;

        let (root, deleted) = Node::delete(self.root.take(), &probe);
        self.set_root_black(root);
        deleted
    }

    #[inline]
    fn set_root_black(&mut self, root: Link<T>) {
        self.root = root;
        if let Some(root) = self.root.as_mut() {
            root.set_black();
        }
    }
}

impl<T: Item> LlrbTree<T> {
    /// Returns `true` if the tree contains an element with the same order as `key`.
    pub fn has(&self, key: &T) -> bool {
        self.get(key).is_some()
    }

    /// Returns the element with the same order as `key`.
    ///
    /// When several such elements are present, which one is returned is unspecified.
    pub fn get(&self, key: &T) -> Option<&T> {
        self.get_by(|elem| order::probe(key, elem))
    }

    /// Inserts `item` into the tree. If an element with the same order is present, it is
    /// replaced by `item` and returned.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn replace_or_insert(&mut self, item: T) -> Option<T> {
        let (root, replaced) = Node::replace_or_insert(self.root.take(), item);
        self.set_root_black(Some(root));
        replaced
    }

    /// Inserts `item` into the tree. Elements with the same order are kept side by side, and
    /// `item` is ordered after all of them.
    ///
    /// This operation completes in _O(log(n))_ time.
    pub fn insert_no_replace(&mut self, item: T) {
        let root = Node::insert_no_replace(self.root.take(), item);
        self.set_root_black(Some(root));
    }

    /// Calls [`replace_or_insert`](LlrbTree::replace_or_insert) for every item, in order.
    pub fn replace_or_insert_bulk<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.len();
        for item in items {
            self.replace_or_insert(item);
        }
        log::trace!("bulk replace-or-insert grew tree by {}", self.len() - before);
    }

    /// Calls [`insert_no_replace`](LlrbTree::insert_no_replace) for every item, in order.
    pub fn insert_no_replace_bulk<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = T>,
    {
        let before = self.len();
        for item in items {
            self.insert_no_replace(item);
        }
        log::trace!("bulk insert-no-replace added {} items", self.len() - before);
    }

    /// Removes and returns an element with the same order as `key`.
    ///
    /// A missing key leaves the tree untouched. This operation completes in _O(log(n))_ time.
    pub fn delete(&mut self, key: &T) -> Option<T> {
        self.delete_by(|elem| order::probe(key, elem))
    }
}

impl<T> Default for LlrbTree<T> {
    fn default() -> Self {
        LlrbTree::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LlrbTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlrbTree")
            .field("len", &self.len())
            .field("root", &self.root)
            .finish()
    }
}

impl<T: Item> Extend<T> for LlrbTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.replace_or_insert_bulk(iter);
    }
}

impl<T: Item> FromIterator<T> for LlrbTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = LlrbTree::new();
        tree.replace_or_insert_bulk(iter);
        tree
    }
}
