//! Command implementations
//!
//! Commands are methods on `Repository` that compose the repository areas and
//! the algorithms in `artifacts` into a complete run.

pub mod porcelain;
