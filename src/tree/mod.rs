//! Mirror tree: node types, sibling ordering, and the node index.

pub mod index;
pub mod node;
pub mod order;
