//! Console walkthrough of the full API: build a tree from random input,
//! show the diagram and all four traversal orders, unbalance it with a run
//! of large inserts, then rebalance.
//!
//! Run with `cargo run --example driver`.

use std::collections::HashSet;

use balanced_bst::{Node, Tree};

use rand::Rng;

/// Draws `count` distinct random values below `max`.
fn random_values(count: usize, max: u32) -> Vec<u32> {
    let mut rng = rand::thread_rng();
    let mut values = HashSet::new();
    while values.len() < count {
        values.insert(rng.gen_range(0..max));
    }
    values.into_iter().collect()
}

fn values<'a>(nodes: impl Iterator<Item = &'a Node<u32>>) -> Vec<u32> {
    nodes.map(|n| *n.value()).collect()
}

fn print_traversals(tree: &Tree<u32>) {
    println!("Level order: {:?}", values(tree.level_order()));
    println!("Pre order:   {:?}", values(tree.pre_order()));
    println!("In order:    {:?}", values(tree.in_order()));
    println!("Post order:  {:?}", values(tree.post_order()));
}

fn main() {
    let mut tree = Tree::build(random_values(16, 100));

    println!("Initial tree:");
    print!("{}", tree);
    println!("Is balanced: {}", tree.is_balanced());
    print_traversals(&tree);

    for value in 101..=110 {
        tree.insert(value);
    }
    println!("\nTree after adding values above 100:");
    print!("{}", tree);
    println!("Is balanced: {}", tree.is_balanced());

    tree.rebalance();
    println!("\nTree after rebalancing:");
    print!("{}", tree);
    println!("Is balanced: {}", tree.is_balanced());
    print_traversals(&tree);
}
