//! Abstract pipeline types (noun module)
//!
//! The backend-agnostic output of a compilation pass: relation lookups plus one
//! named output expression per step. See `emitter` for the JSON encoding.

mod expr;
mod node;

pub use expr::{Expr, Literal};
pub use node::{AbstractPipeline, AddField, CompilationResult, LookupDescriptor};
