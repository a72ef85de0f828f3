//! Step compiler (verb module)
//!
//! Transforms a step list into an abstract pipeline:
//! - `lookup` - deduplicated relation lookups for one pass
//! - `operand` - operand -> expression with type coercion
//! - `step` - step -> named output expression
//! - `assemble` - step list -> `CompilationResult`
//! - `diagnose` - per-step errors for display

mod assemble;
mod diagnose;
mod error;
mod lookup;
mod operand;
mod step;

pub use assemble::{compile, try_compile, is_trivial};
pub use diagnose::{diagnose, StepDiagnostic};
pub use error::{CompileError, OperandError, StepShapeError};
pub use lookup::{lookup_alias, LookupCollision, LookupRegistry, LOOKUP_ALIAS_PREFIX};
pub use operand::{compile_operand, CompileScope};
pub use step::{compile_step, validate_alias};
