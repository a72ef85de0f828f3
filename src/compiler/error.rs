//! Compiler errors

use std::fmt;
use crate::resolver::ResolveError;

/// Why an operand could not be compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperandError {
    /// Binary operator without a second operand
    MissingOperand,
    /// Constant is null or empty where a value is required
    MissingConstant,
    /// Constant does not parse as a finite number
    NotANumber(String),
    /// Constant of a type the operator cannot take (arrays, objects, booleans for dates)
    UnsupportedConstant(String),
    /// Reference to a step alias that is not produced earlier in the list
    UnknownPreviousStep(String),
}

impl fmt::Display for OperandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandError::MissingOperand => write!(f, "Operator needs a second operand"),
            OperandError::MissingConstant => write!(f, "Constant value is missing"),
            OperandError::NotANumber(value) => write!(f, "'{}' is not a number", value),
            OperandError::UnsupportedConstant(value) => {
                write!(f, "Constant {} cannot be used with this operator", value)
            }
            OperandError::UnknownPreviousStep(alias) => {
                write!(f, "No earlier step produces '{}'", alias)
            }
        }
    }
}

/// Why a step is malformed regardless of its operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepShapeError {
    EmptyAlias,
    /// Alias contains characters outside `[A-Za-z0-9_]`
    InvalidAlias(String),
    /// Alias starts with the lookup alias prefix
    ReservedAlias(String),
    MissingOperator,
    UnknownOperator(String),
}

impl fmt::Display for StepShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepShapeError::EmptyAlias => write!(f, "Output name is empty"),
            StepShapeError::InvalidAlias(alias) => write!(
                f,
                "Output name '{}' may only contain letters, digits and underscores",
                alias
            ),
            StepShapeError::ReservedAlias(alias) => {
                write!(f, "Output name '{}' uses a reserved prefix", alias)
            }
            StepShapeError::MissingOperator => write!(f, "No operator selected"),
            StepShapeError::UnknownOperator(op) => write!(f, "Unknown operator '{}'", op),
        }
    }
}

/// Errors that invalidate a compilation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A field operand does not resolve
    PathResolution { step: usize, source: ResolveError },
    /// An operand has the wrong shape or value for its operator
    OperandType { step: usize, reason: OperandError },
    /// The step itself is malformed
    StepShape { step: usize, reason: StepShapeError },
    /// Two different relation paths derive the same lookup alias
    LookupCollision { step: usize, alias: String },
    /// The final alias is missing from the assembled output
    AssemblyConsistency { alias: String },
}

impl CompileError {
    /// Index of the step that failed, when the failure belongs to one step
    pub fn step(&self) -> Option<usize> {
        match self {
            CompileError::PathResolution { step, .. }
            | CompileError::OperandType { step, .. }
            | CompileError::StepShape { step, .. }
            | CompileError::LookupCollision { step, .. } => Some(*step),
            CompileError::AssemblyConsistency { .. } => None,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::PathResolution { step, source } => {
                write!(f, "Step {}: {}", step + 1, source)
            }
            CompileError::OperandType { step, reason } => {
                write!(f, "Step {}: {}", step + 1, reason)
            }
            CompileError::StepShape { step, reason } => {
                write!(f, "Step {}: {}", step + 1, reason)
            }
            CompileError::LookupCollision { step, alias } => write!(
                f,
                "Step {}: relation path maps to lookup '{}' already used by a different path",
                step + 1,
                alias
            ),
            CompileError::AssemblyConsistency { alias } => {
                write!(f, "Final output '{}' missing from assembled pipeline", alias)
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::PathResolution { source, .. } => Some(source),
            _ => None,
        }
    }
}
