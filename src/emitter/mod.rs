//! JSON emitter (verb module)
//!
//! Transforms an AbstractPipeline into the aggregation-expression JSON the
//! downstream executor consumes.

mod emit;

pub use emit::{emit_expr, emit_lookup, emit_pipeline, emit_result};
