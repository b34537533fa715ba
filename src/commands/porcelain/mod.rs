//! Porcelain commands (user-facing operations)
//!
//! - `topo_order`: Print branch history in topological order with segment
//!   boundaries

pub mod topo_order;
