//! Printing of ordered commit history
//!
//! - `segments`: Line protocol that marks where the linear order leaves the
//!   graph's edges, plus a reader for it

pub mod segments;
