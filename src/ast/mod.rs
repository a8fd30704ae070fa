pub(crate) mod arena;
pub(crate) mod node;

pub use arena::{Arena, Extensions, NodeId};
pub use node::{Node, NodeKind};
