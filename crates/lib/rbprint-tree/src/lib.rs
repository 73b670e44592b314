//! Syntax tree side of **rbprint**: the `{type, body}` node model produced by a
//! Ripper-style parser, a read-only cursor to walk it, and the error types the
//! formatter front end reports.

pub mod kind;
pub mod load;
pub mod node;
pub mod path;
pub mod utils;

pub use kind::NodeKind;
pub use log;
pub use node::{Body, Node, Slot};
pub use path::{AstPath, PathError, Target};
