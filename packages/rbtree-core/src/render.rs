//! Sideways text drawing of a tree, for debugging.
//!
//! The root sits at the left margin, right subtrees are drawn above their parent and left
//! subtrees below, one four-space indent per level:
//!
//! ```text
//!  /⎺ 3(R)
//! 2
//!  \_ 1(R)
//! ```

use std::fmt::Write;

use crate::arena::Color;
use crate::ids::{NodeIndex, NIL};
use crate::tree::RbTree;

const INDENT: &str = "    ";
const RIGHT_EDGE: &str = " /⎺ ";
const LEFT_EDGE: &str = " \\_ ";

#[derive(Clone, Copy)]
enum Style {
    Plain,
    Ansi,
}

impl RbTree {
    /// Draw the tree with RED keys suffixed by `(R)`. Empty trees render as an empty string.
    pub fn render(&self) -> String {
        self.render_with(Style::Plain)
    }

    /// Draw the tree with RED keys wrapped in ANSI red.
    pub fn render_ansi(&self) -> String {
        self.render_with(Style::Ansi)
    }

    fn render_with(&self, style: Style) -> String {
        let mut out = String::new();
        // reverse in-order: right subtree, node, left subtree
        let mut stack: Vec<(NodeIndex, usize, bool)> = Vec::new();
        let mut current = (self.root, 0usize, false);

        loop {
            while current.0 != NIL {
                stack.push(current);
                let (node, level, _) = current;
                current = (self.arena.right(node), level + 1, false);
            }
            let Some((node, level, is_left)) = stack.pop() else {
                break;
            };

            for _ in 1..level {
                out.push_str(INDENT);
            }
            if level > 0 {
                out.push_str(if is_left { LEFT_EDGE } else { RIGHT_EDGE });
            }
            let key = self.arena.key(node);
            match (self.arena.color(node), style) {
                (Color::Black, _) => {
                    let _ = writeln!(out, "{key}");
                }
                (Color::Red, Style::Plain) => {
                    let _ = writeln!(out, "{key}(R)");
                }
                (Color::Red, Style::Ansi) => {
                    let _ = writeln!(out, "\x1b[31m{key}\x1b[0m");
                }
            }

            current = (self.arena.left(node), level + 1, true);
        }
        out
    }
}
