//! stepcalc - Compile calculation steps to abstract aggregation pipelines
//!
//! This library provides:
//! - Model registry types (Schema, Model, Field)
//! - Calculation step types (CalculationStep, Operand)
//! - Field path resolution through relations
//! - Step compilation with lookup deduplication and type coercion
//! - Aggregation-expression JSON emission
//! - A change-gated reactive wrapper for hosts that recompile on every edit
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `schema/` - model registry (Schema, Model, Field, FieldType)
//! - `step/` - step list (CalculationStep, Operand)
//! - `operator/` - closed operator set with arity and family
//! - `pipeline/` - output types (Expr, LookupDescriptor, AbstractPipeline, CompilationResult)
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML/JSON → Schema, steps
//! - `resolver/` - Schema + dotted path → ResolvedPath
//! - `compiler/` - Schema + steps → CompilationResult
//! - `emitter/` - CompilationResult → JSON
//! - `reactive/` - recompile on change, forward only new results
//! - `fields/` - picker field enumeration
//!
//! # Example
//!
//! ```ignore
//! use stepcalc::{parser, compile};
//!
//! let schema = parser::parse_schema_file("schema.yaml")?;
//! let steps = parser::parse_steps_json(&body)?;
//! let result = compile(&steps, "order", &schema);
//! if result.is_valid {
//!     send(result.to_json());
//! }
//! ```

pub mod schema;
pub mod step;
pub mod operator;
pub mod pipeline;
pub mod parser;
pub mod resolver;
pub mod compiler;
pub mod emitter;
pub mod reactive;
pub mod fields;
pub mod error;

// Re-export commonly used types
pub use schema::{Schema, Model, Field, FieldType};
pub use step::{CalculationStep, Operand, OperandKind};
pub use operator::{Operator, Arity, OperatorFamily};
pub use pipeline::{Expr, Literal, LookupDescriptor, AddField, AbstractPipeline, CompilationResult};
pub use resolver::{resolve_path, ResolvedPath, RelationHop, ResolveError};
pub use compiler::{compile, try_compile, diagnose, StepDiagnostic, CompileError, LookupRegistry, LOOKUP_ALIAS_PREFIX};
pub use emitter::{emit_expr, emit_pipeline, emit_result};
pub use reactive::ReactiveCompiler;
pub use fields::{available_fields, fields_for_operator, FieldOption, DEFAULT_MAX_DEPTH};
pub use error::ParseError;
