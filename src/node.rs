// Conventions used in comments follow Sedgewick's LLRB papers:
// - The color of a node is the color of the link from its parent to it.
// - `h` is the root of the subtree being rebuilt; `x` is the child rotated into its place.
//
// Every recursive routine takes ownership of a subtree root and hands back the (possibly
// different) root of the rebuilt subtree. Invariants may be broken inside a single frame but are
// restored by the fixup step before the frame returns.

extern crate alloc;

use alloc::boxed::Box;
use core::{cmp::Ordering, mem};

use crate::order::Item;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A node of an [`LlrbTree`](crate::LlrbTree).
///
/// Nodes are only reachable through [`LlrbTree::root`](crate::LlrbTree::root) and are built by
/// hand only by code that rebuilds a tree for [`LlrbTree::set_root`](crate::LlrbTree::set_root).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    item: T,
    left: Link<T>,
    right: Link<T>,
    count: usize,
    // In the LLRB, new nodes are always red.
    black: bool,
}

impl<T> Node<T> {
    pub(crate) fn leaf(item: T) -> Box<Node<T>> {
        Box::new(Node {
            item,
            left: None,
            right: None,
            count: 1,
            black: false,
        })
    }

    /// Assembles a node from its parts. The subtree count is derived from the children.
    pub fn from_parts(
        item: T,
        black: bool,
        left: Option<Box<Node<T>>>,
        right: Option<Box<Node<T>>>,
    ) -> Box<Node<T>> {
        let count = 1 + count(&left) + count(&right);
        Box::new(Node {
            item,
            left,
            right,
            count,
            black,
        })
    }

    /// Splits a node into `(item, black, left, right)`.
    pub fn into_parts(self) -> (T, bool, Option<Box<Node<T>>>, Option<Box<Node<T>>>) {
        (self.item, self.black, self.left, self.right)
    }

    /// The stored element.
    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    #[inline]
    pub(crate) fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    #[inline]
    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    #[inline]
    pub(crate) fn left_mut(&mut self) -> Option<&mut Node<T>> {
        self.left.as_deref_mut()
    }

    #[inline]
    pub(crate) fn right_mut(&mut self) -> Option<&mut Node<T>> {
        self.right.as_deref_mut()
    }

    /// Number of elements in the subtree rooted here, this node included.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `true` if the link into this node is black.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }

    /// Returns `true` if the link into this node is red.
    #[inline]
    pub fn is_red(&self) -> bool {
        !self.black
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.black = true;
    }

    // Structural primitives ==================================================

    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut x = match self.right.take() {
            Some(x) if x.is_red() => x,
            _ => invariant_violation("rotating a black link"),
        };

        x.count = self.count;
        self.right = x.left.take();
        self.count = 1 + count(&self.left) + count(&self.right);

        x.black = self.black;
        self.black = false;
        x.left = Some(self);
        x
    }

    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut x = match self.left.take() {
            Some(x) if x.is_red() => x,
            _ => invariant_violation("rotating a black link"),
        };

        x.count = self.count;
        self.left = x.right.take();
        self.count = 1 + count(&self.left) + count(&self.right);

        x.black = self.black;
        self.black = false;
        x.right = Some(self);
        x
    }

    // REQUIRE: Left and right children must be present.
    pub(crate) fn flip(&mut self) {
        self.black = !self.black;
        if let Some(left) = self.left.as_mut() {
            left.black = !left.black;
        }
        if let Some(right) = self.right.as_mut() {
            right.black = !right.black;
        }
    }

    // REQUIRE: Left and right children must be present.
    pub(crate) fn move_red_left(self: Box<Self>) -> Box<Self> {
        let mut h = self;
        h.flip();
        if h.right.as_deref().is_some_and(|r| is_red(&r.left)) {
            h.right = h.right.take().map(Node::rotate_right);
            h = h.rotate_left();
            h.flip();
        }
        h
    }

    // REQUIRE: Left and right children must be present.
    pub(crate) fn move_red_right(self: Box<Self>) -> Box<Self> {
        let mut h = self;
        h.flip();
        if h.left.as_deref().is_some_and(|l| is_red(&l.left)) {
            h = h.rotate_right();
            h.flip();
        }
        h
    }

    // Rebalances after insertion. A right-leaning red link is only rotated when the left link is
    // black; otherwise the flip below splits the 4-node.
    pub(crate) fn walk_up_rot23(self: Box<Self>) -> Box<Self> {
        let mut h = self;
        if is_red(&h.right) && !is_red(&h.left) {
            h = h.rotate_left();
        }
        if is_red(&h.left) && left_is_red(&h.left) {
            h = h.rotate_right();
        }
        if is_red(&h.left) && is_red(&h.right) {
            h.flip();
        }
        h
    }

    // Rebalances after deletion.
    pub(crate) fn fix_up(self: Box<Self>) -> Box<Self> {
        let mut h = self;
        if is_red(&h.right) {
            h = h.rotate_left();
        }
        if is_red(&h.left) && left_is_red(&h.left) {
            h = h.rotate_right();
        }
        if is_red(&h.left) && is_red(&h.right) {
            h.flip();
        }
        h
    }
}

// Insertion ==================================================================

impl<T: Item> Node<T> {
    // Returns the rebuilt subtree and the equal-order element `item` displaced, if any.
    pub(crate) fn replace_or_insert(h: Link<T>, item: T) -> (Box<Node<T>>, Option<T>) {
        let mut h = match h {
            Some(h) => h,
            None => return (Node::leaf(item), None),
        };

        let replaced = if item.less(&h.item) {
            let (left, replaced) = Node::replace_or_insert(h.left.take(), item);
            h.left = Some(left);
            if replaced.is_none() {
                h.count += 1;
            }
            replaced
        } else if h.item.less(&item) {
            let (right, replaced) = Node::replace_or_insert(h.right.take(), item);
            h.right = Some(right);
            if replaced.is_none() {
                h.count += 1;
            }
            replaced
        } else {
            Some(mem::replace(&mut h.item, item))
        };

        (h.walk_up_rot23(), replaced)
    }

    // Ties go right, so a later equal-order element sorts after the earlier ones.
    pub(crate) fn insert_no_replace(h: Link<T>, item: T) -> Box<Node<T>> {
        let mut h = match h {
            Some(h) => h,
            None => return Node::leaf(item),
        };

        if item.less(&h.item) {
            h.left = Some(Node::insert_no_replace(h.left.take(), item));
        } else {
            h.right = Some(Node::insert_no_replace(h.right.take(), item));
        }
        h.count += 1;

        h.walk_up_rot23()
    }
}

// Deletion ===================================================================

impl<T> Node<T> {
    pub(crate) fn delete_min(h: Link<T>) -> (Link<T>, Option<T>) {
        let mut h = match h {
            Some(h) => h,
            None => return (None, None),
        };
        if h.left.is_none() {
            return (None, Some(h.item));
        }

        if !is_red(&h.left) && !left_is_red(&h.left) {
            h = h.move_red_left();
        }

        let (left, deleted) = Node::delete_min(h.left.take());
        h.left = left;
        if deleted.is_some() {
            h.count -= 1;
        }

        (Some(h.fix_up()), deleted)
    }

    pub(crate) fn delete_max(h: Link<T>) -> (Link<T>, Option<T>) {
        let mut h = match h {
            Some(h) => h,
            None => return (None, None),
        };
        if is_red(&h.left) {
            h = h.rotate_right();
        }
        if h.right.is_none() {
            return (None, Some(h.item));
        }

        if !is_red(&h.right) && !left_is_red(&h.right) {
            h = h.move_red_right();
        }

        let (right, deleted) = Node::delete_max(h.right.take());
        h.right = right;
        if deleted.is_some() {
            h.count -= 1;
        }

        (Some(h.fix_up()), deleted)
    }

    // `probe` orders the key being deleted relative to a node's element.
    pub(crate) fn delete<F>(h: Link<T>, probe: &F) -> (Link<T>, Option<T>)
    where
        F: Fn(&T) -> Ordering,
    {
        let mut h = match h {
            Some(h) => h,
            None => return (None, None),
        };

        let deleted = if probe(&h.item) == Ordering::Less {
            if h.left.is_none() {
                // Key not present. Nothing to delete.
                return (Some(h), None);
            }
            if !is_red(&h.left) && !left_is_red(&h.left) {
                h = h.move_red_left();
            }
            let (left, deleted) = Node::delete(h.left.take(), probe);
            h.left = left;
            deleted
        } else {
            if is_red(&h.left) {
                h = h.rotate_right();
            }

            // Key equals `h` and there is nothing to the right: `h` is a leaf.
            if probe(&h.item) != Ordering::Greater && h.right.is_none() {
                return (None, Some(h.item));
            }

            if h.right.is_some() {
                let mut matched = probe(&h.item) != Ordering::Greater;
                if !is_red(&h.right) && !left_is_red(&h.right) {
                    // Borrowing from the left sibling rotates another node into `h`. An
                    // equal-order one must not be spliced here: the matched node now sits on the
                    // right with a red right link, which `delete_min` cannot take.
                    if left_is_red(&h.left) {
                        matched = false;
                    }
                    h = h.move_red_right();
                }

                if matched {
                    // Splice in the successor.
                    let (right, successor) = Node::delete_min(h.right.take());
                    h.right = right;
                    let successor = match successor {
                        Some(s) => s,
                        None => invariant_violation("successor missing from right subtree"),
                    };
                    Some(mem::replace(&mut h.item, successor))
                } else {
                    let (right, deleted) = Node::delete(h.right.take(), probe);
                    h.right = right;
                    deleted
                }
            } else {
                None
            }
        };

        if deleted.is_some() {
            h.count -= 1;
        }

        (Some(h.fix_up()), deleted)
    }
}

#[inline]
pub(crate) fn count<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |n| n.count)
}

#[inline]
pub(crate) fn is_red<T>(link: &Link<T>) -> bool {
    link.as_ref().is_some_and(|n| n.is_red())
}

// Returns `true` if the node at `link` exists and its left link is red.
#[inline]
fn left_is_red<T>(link: &Link<T>) -> bool {
    link.as_deref().is_some_and(|n| is_red(&n.left))
}

#[cold]
#[inline(never)]
fn invariant_violation(what: &str) -> ! {
    log::error!("llrb invariant violated: {what}");
    panic!("{what}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(item: u32, left: Link<u32>, right: Link<u32>) -> Link<u32> {
        Some(Node::from_parts(item, false, left, right))
    }

    fn black(item: u32, left: Link<u32>, right: Link<u32>) -> Link<u32> {
        Some(Node::from_parts(item, true, left, right))
    }

    #[test]
    fn rotate_left_moves_counts_and_colors() {
        let h = Node::from_parts(
            2,
            true,
            black(1, None, None),
            red(4, black(3, None, None), black(5, None, None)),
        );

        let x = h.rotate_left();
        assert_eq!(x.item, 4);
        assert!(x.is_black());
        assert_eq!(x.count, 5);

        let h = x.left().unwrap();
        assert_eq!(h.item, 2);
        assert!(h.is_red());
        assert_eq!(h.count, 3);
        assert_eq!(h.right().unwrap().item, 3);
    }

    #[test]
    fn rotate_right_moves_counts_and_colors() {
        let h = Node::from_parts(
            4,
            true,
            red(2, black(1, None, None), black(3, None, None)),
            black(5, None, None),
        );

        let x = h.rotate_right();
        assert_eq!(x.item, 2);
        assert!(x.is_black());
        assert_eq!(x.count, 5);

        let h = x.right().unwrap();
        assert_eq!(h.item, 4);
        assert!(h.is_red());
        assert_eq!(h.count, 3);
        assert_eq!(h.left().unwrap().item, 3);
    }

    #[test]
    #[should_panic(expected = "rotating a black link")]
    fn rotate_black_link_panics() {
        let h = Node::from_parts(1, true, None, black(2, None, None));
        h.rotate_left();
    }

    #[test]
    #[should_panic(expected = "rotating a black link")]
    fn rotate_missing_link_panics() {
        let h = Node::from_parts(1, true, None, None);
        h.rotate_right();
    }

    #[test]
    fn flip_toggles_three_links() {
        let mut h = Node::from_parts(2, true, red(1, None, None), red(3, None, None));
        h.flip();
        assert!(h.is_red());
        assert!(h.left().unwrap().is_black());
        assert!(h.right().unwrap().is_black());
    }

    #[test]
    fn fix_up_leans_left() {
        let h = Node::from_parts(1, true, None, red(2, None, None));
        let h = h.fix_up();
        assert_eq!(h.item, 2);
        assert!(h.is_black());
        assert!(h.left().unwrap().is_red());
        assert_eq!(h.count, 2);
    }

    #[test]
    fn walk_up_splits_four_node() {
        let h = Node::from_parts(2, true, red(1, None, None), red(3, None, None));
        let h = h.walk_up_rot23();
        assert_eq!(h.item, 2);
        assert!(h.is_red());
        assert!(h.left().unwrap().is_black());
        assert!(h.right().unwrap().is_black());
    }

    #[test]
    fn move_red_left_borrows_from_sibling() {
        // 2-node on the left, 3-node on the right.
        let h = Node::from_parts(
            2,
            false,
            black(1, None, None),
            black(4, red(3, None, None), None),
        );

        let h = h.move_red_left();
        assert_eq!(h.item, 3);
        assert_eq!(h.count, 4);
        assert!(h.left().unwrap().is_black());
        assert!(h.left().unwrap().left().unwrap().is_red());
        assert_eq!(count(&h.left), 2);
        assert_eq!(count(&h.right), 1);
    }
}
