use llrb_tree::LlrbTree;

fn main() {
    let mut tree: LlrbTree<u32> = LlrbTree::new();

    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.replace_or_insert(key);
        tree.assert_invariants();
        println!("len={} min={:?} max={:?}", tree.len(), tree.min(), tree.max());
    }

    let mut graph = String::new();
    tree.dotgraph("demo", &mut graph).unwrap();
    println!("{graph}");

    let five = tree.delete(&5).unwrap();
    assert_eq!(five, 5);
    assert!(!tree.has(&5));
    tree.assert_invariants();

    let one = tree.delete_min().unwrap();
    assert_eq!(one, 1);
    tree.assert_invariants();

    drop(tree);
}
