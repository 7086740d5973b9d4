use thiserror::Error;

use crate::{node::Node, order::Item, LlrbTree};

/// A violated structural invariant, as reported by [`LlrbTree::check_invariants`].
///
/// Depths are counted in links from the root, which is at depth 0.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root link is red")]
    RedRoot,
    #[error("red right link at depth {depth}")]
    RedRightLink { depth: usize },
    #[error("consecutive red links at depth {depth}")]
    ConsecutiveRedLinks { depth: usize },
    #[error("unbalanced black links at depth {depth}: left {left}, right {right}")]
    BlackImbalance {
        depth: usize,
        left: usize,
        right: usize,
    },
    #[error("subtree count at depth {depth} is {stored}, expected {actual}")]
    CountMismatch {
        depth: usize,
        stored: usize,
        actual: usize,
    },
    #[error("element at depth {depth} is out of order")]
    OutOfOrder { depth: usize },
}

impl<T: Item> LlrbTree<T> {
    /// Checks every structural invariant of the tree.
    ///
    /// On success, returns the black height: the number of black links on any path from the
    /// root to an empty subtree. An empty tree has black height 0.
    pub fn check_invariants(&self) -> Result<usize, InvariantError> {
        let Some(root) = self.root() else {
            return Ok(0);
        };

        if root.is_red() {
            return Err(InvariantError::RedRoot);
        }

        check_at(root, 0, None, None)
    }

    #[doc(hidden)]
    #[track_caller]
    pub fn assert_invariants(&self) {
        if let Err(e) = self.check_invariants() {
            panic!("{e}");
        }
    }
}

// Returns the number of black links below `node`, counting the link into it.
//
// `lo` and `hi` are the nearest ancestors the subtree hangs to the right and left of; every
// element in the subtree must lie between them. Ties are allowed on both sides.
fn check_at<T: Item>(
    node: &Node<T>,
    depth: usize,
    lo: Option<&T>,
    hi: Option<&T>,
) -> Result<usize, InvariantError> {
    if lo.is_some_and(|lo| node.item().less(lo)) || hi.is_some_and(|hi| hi.less(node.item())) {
        return Err(InvariantError::OutOfOrder { depth });
    }

    if node.right().is_some_and(Node::is_red) {
        return Err(InvariantError::RedRightLink { depth: depth + 1 });
    }

    if node.is_red() && node.left().is_some_and(Node::is_red) {
        return Err(InvariantError::ConsecutiveRedLinks { depth: depth + 1 });
    }

    let (left, left_count) = match node.left() {
        Some(l) => (check_at(l, depth + 1, lo, Some(node.item()))?, l.count()),
        None => (0, 0),
    };
    let (right, right_count) = match node.right() {
        Some(r) => (check_at(r, depth + 1, Some(node.item()), hi)?, r.count()),
        None => (0, 0),
    };

    if left != right {
        return Err(InvariantError::BlackImbalance { depth, left, right });
    }

    let actual = 1 + left_count + right_count;
    if node.count() != actual {
        return Err(InvariantError::CountMismatch {
            depth,
            stored: node.count(),
            actual,
        });
    }

    Ok(left + usize::from(node.is_black()))
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::prelude::v1::*;

    use super::*;

    fn leaf(item: u32, black: bool) -> Option<Box<Node<u32>>> {
        Some(Node::from_parts(item, black, None, None))
    }

    fn tree(root: Box<Node<u32>>) -> LlrbTree<u32> {
        let mut tree = LlrbTree::new();
        tree.set_root(Some(root));
        tree
    }

    #[test]
    fn empty_tree_is_valid() {
        assert_eq!(LlrbTree::<u32>::new().check_invariants(), Ok(0));
    }

    #[test]
    fn black_height_is_reported() {
        let t = tree(Node::from_parts(2, true, leaf(1, true), leaf(3, true)));
        assert_eq!(t.check_invariants(), Ok(2));

        let t = tree(Node::from_parts(2, true, leaf(1, false), None));
        assert_eq!(t.check_invariants(), Ok(1));
    }

    #[test]
    fn red_root_is_rejected() {
        let t = tree(Node::from_parts(1, false, None, None));
        assert_eq!(t.check_invariants(), Err(InvariantError::RedRoot));
    }

    #[test]
    fn red_right_link_is_rejected() {
        let t = tree(Node::from_parts(1, true, None, leaf(2, false)));
        assert_eq!(
            t.check_invariants(),
            Err(InvariantError::RedRightLink { depth: 1 })
        );
    }

    #[test]
    fn consecutive_reds_are_rejected() {
        let left = Node::from_parts(2, false, leaf(1, false), None);
        let t = tree(Node::from_parts(3, true, Some(left), None));
        assert_eq!(
            t.check_invariants(),
            Err(InvariantError::ConsecutiveRedLinks { depth: 2 })
        );
    }

    #[test]
    fn black_imbalance_is_rejected() {
        let t = tree(Node::from_parts(2, true, leaf(1, true), None));
        assert_eq!(
            t.check_invariants(),
            Err(InvariantError::BlackImbalance {
                depth: 0,
                left: 1,
                right: 0
            })
        );
    }

    #[test]
    fn misordered_elements_are_rejected() {
        let t = tree(Node::from_parts(2, true, leaf(3, false), None));
        assert_eq!(
            t.check_invariants(),
            Err(InvariantError::OutOfOrder { depth: 1 })
        );
    }

    #[test]
    fn errors_render() {
        let e = InvariantError::CountMismatch {
            depth: 3,
            stored: 4,
            actual: 5,
        };
        assert_eq!(e.to_string(), "subtree count at depth 3 is 4, expected 5");
    }
}
