//! Path resolver (verb module)
//!
//! Resolves dotted field paths against the model registry, walking through
//! relation fields.

mod resolve;
mod types;
mod error;

pub use resolve::resolve_path;
pub use types::{ResolvedPath, RelationHop};
pub use error::ResolveError;
