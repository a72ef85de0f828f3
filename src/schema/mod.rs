//! Model registry types (nouns)
//!
//! These types represent the models and fields a step list is written against.
//! The registry is owned by the host; the compiler only reads it.

mod model;
mod types;

pub use model::{Schema, Model, Field};
pub use types::FieldType;
