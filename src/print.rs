//! Console rendering of a tree as a sideways box-drawing diagram.
//!
//! The right subtree is printed above its node and the left subtree below,
//! so the diagram reads as the tree rotated 90° counter-clockwise.

use std::fmt;

use crate::tree::{Node, Tree};

impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => diagram(root, f, "", true),
            None => Ok(()),
        }
    }
}

fn diagram<T>(node: &Node<T>, f: &mut fmt::Formatter<'_>, prefix: &str, is_left: bool) -> fmt::Result
where
    T: fmt::Display,
{
    if let Some(right) = node.right() {
        let deeper = format!("{}{}", prefix, if is_left { "│   " } else { "    " });
        diagram(right, f, &deeper, false)?;
    }
    writeln!(
        f,
        "{}{}{}",
        prefix,
        if is_left { "└── " } else { "┌── " },
        node.value()
    )?;
    if let Some(left) = node.left() {
        let deeper = format!("{}{}", prefix, if is_left { "    " } else { "│   " });
        diagram(left, f, &deeper, true)?;
    }
    Ok(())
}
