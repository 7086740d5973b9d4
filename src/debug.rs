extern crate std;

use std::{collections::VecDeque, fmt, prelude::v1::*};

use crate::{LlrbTree, Node};

impl<T: fmt::Display> LlrbTree<T> {
    /// Writes the tree as a Graphviz digraph, one rank per tree level.
    ///
    /// Red links are drawn in red. Each node is labelled with its element and subtree count.
    pub fn dotgraph<W>(&self, name: &str, mut w: W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let root = match self.root() {
            Some(r) => r,
            None => return write!(w, "digraph \"graph-{name}\" {{}}"),
        };

        enum Item<'a, T> {
            Node(usize, &'a Node<T>),
            Missing(usize),
        }

        let mut queue = VecDeque::new();
        queue.push_back(Item::Node(0, root));

        write!(
            w,
            "digraph \"graph-{name}\" {{\n subgraph \"subgraph-{name}\" {{"
        )?;

        // Ids are handed out in breadth-first order; equal-order elements would collide as keys.
        let mut next_id = 1;
        let mut links = String::new();

        loop {
            use fmt::Write;
            let remaining = queue.len();
            if remaining == 0 {
                break;
            }

            write!(w, "{{rank=same; ")?;

            for _ in 0..remaining {
                let Some(item) = queue.pop_front() else {
                    break;
                };

                let (id, node) = match item {
                    Item::Node(id, node) => (id, node),
                    Item::Missing(id) => {
                        write!(w, "\"graph{name}-{id}\" [shape=point]; ")?;
                        continue;
                    }
                };

                write!(
                    w,
                    "\"graph{name}-{id}\" [label=\"{}:{}\"]; ",
                    node.item(),
                    node.count()
                )?;

                for child in [node.left(), node.right()] {
                    let child_id = next_id;
                    next_id += 1;

                    let color = match child {
                        Some(c) if c.is_red() => " [color=red]",
                        _ => "",
                    };
                    writeln!(
                        links,
                        "\"graph{name}-{id}\" -> \"graph{name}-{child_id}\"{color};"
                    )?;

                    queue.push_back(match child {
                        Some(c) => Item::Node(child_id, c),
                        None => Item::Missing(child_id),
                    });
                }
            }

            writeln!(w, "}}")?;
        }

        w.write_str(&links)?;

        w.write_str(" }\n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph() {
        let tree: LlrbTree<u32> = LlrbTree::new();
        let mut out = String::new();
        tree.dotgraph("t", &mut out).unwrap();
        assert_eq!(out, "digraph \"graph-t\" {}");
    }

    #[test]
    fn red_links_are_colored() {
        let tree: LlrbTree<u32> = [2, 1].into_iter().collect();
        let mut out = String::new();
        tree.dotgraph("t", &mut out).unwrap();

        assert!(out.contains("\"grapht-0\" [label=\"2:2\"];"));
        assert!(out.contains("\"grapht-0\" -> \"grapht-1\" [color=red];"));
        assert!(out.contains("\"grapht-0\" -> \"grapht-2\";"));
        assert!(out.contains("\"grapht-2\" [shape=point];"));
    }
}
