//! Git object types and operations
//!
//! Only commits take part in ancestry, so commit is the one object kind with a
//! full record type. The other kinds are recognized in object headers so that
//! a branch pointing at a non-commit can be reported precisely.
//!
//! All objects use the loose object format `<type> <size>\0<content>`.

pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
