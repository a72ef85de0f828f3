//! Step compilation: one step -> one named output expression

use std::collections::HashSet;
use crate::operator::{Arity, Operator};
use crate::pipeline::{AddField, Expr};
use crate::step::CalculationStep;
use super::error::{CompileError, OperandError, StepShapeError};
use super::lookup::{LookupRegistry, LOOKUP_ALIAS_PREFIX};
use super::operand::{compile_operand, CompileScope};

/// Compile one step into its output entry
///
/// Unary operators compile only `operand1` and ignore `operand2`; binary
/// operators require both.
pub fn compile_step(
    step: &CalculationStep,
    index: usize,
    prior_aliases: &HashSet<String>,
    scope: &CompileScope<'_>,
    registry: &mut LookupRegistry,
) -> Result<AddField, CompileError> {
    let shape_error = |reason| CompileError::StepShape { step: index, reason };

    validate_alias(&step.output_alias).map_err(shape_error)?;
    let operator = parse_operator(&step.operator).map_err(shape_error)?;

    let first = compile_operand(&step.operand1, operator, index, prior_aliases, scope, registry)?;

    let args = match operator.arity() {
        Arity::Unary => vec![first],
        Arity::Binary => {
            let operand2 = step.operand2.as_ref().ok_or(CompileError::OperandType {
                step: index,
                reason: OperandError::MissingOperand,
            })?;
            let second = compile_operand(operand2, operator, index, prior_aliases, scope, registry)?;
            vec![first, second]
        }
    };

    Ok(AddField {
        alias: step.output_alias.clone(),
        expr: Expr::apply(operator, args),
    })
}

/// Check an output alias: non-empty, `[A-Za-z0-9_]+`, not in the lookup namespace
pub fn validate_alias(alias: &str) -> Result<(), StepShapeError> {
    if alias.is_empty() {
        return Err(StepShapeError::EmptyAlias);
    }
    if !alias.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StepShapeError::InvalidAlias(alias.to_string()));
    }
    if alias.starts_with(LOOKUP_ALIAS_PREFIX) {
        return Err(StepShapeError::ReservedAlias(alias.to_string()));
    }
    Ok(())
}

fn parse_operator(raw: &str) -> Result<Operator, StepShapeError> {
    if raw.trim().is_empty() {
        return Err(StepShapeError::MissingOperator);
    }
    raw.parse::<Operator>()
        .map_err(|e| StepShapeError::UnknownOperator(e.input))
}
