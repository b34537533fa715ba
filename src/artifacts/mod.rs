//! Git data structures and algorithms
//!
//! - `branch`: Branch names and branch references
//! - `graph`: Commit ancestry graph, its builder and topological sort
//! - `log`: Output of the ordered history
//! - `objects`: Git object types (commit records and their ids)

pub mod branch;
pub mod graph;
pub mod log;
pub mod objects;
