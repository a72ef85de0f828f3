//! Operand compilation: one operand -> one expression, with coercions

use std::collections::HashSet;
use serde_json::{Number, Value};
use crate::operator::{Operator, OperatorFamily};
use crate::pipeline::{Expr, Literal};
use crate::resolver::resolve_path;
use crate::schema::{FieldType, Schema};
use crate::step::{Operand, OperandKind};
use super::error::{CompileError, OperandError};
use super::lookup::LookupRegistry;

/// Read-only inputs shared by every step of a pass
#[derive(Debug, Clone, Copy)]
pub struct CompileScope<'a> {
    pub schema: &'a Schema,
    pub root_model: &'a str,
}

/// Compile one operand for `operator`
///
/// # Arguments
/// * `operand` - The operand as authored
/// * `operator` - The operator consuming it; selects the coercion rules
/// * `step` - Index of the owning step
/// * `prior_aliases` - Aliases produced by steps before `step`
/// * `scope` - Registry and root model
/// * `registry` - Lookups registered so far in this pass
pub fn compile_operand(
    operand: &Operand,
    operator: Operator,
    step: usize,
    prior_aliases: &HashSet<String>,
    scope: &CompileScope<'_>,
    registry: &mut LookupRegistry,
) -> Result<Expr, CompileError> {
    match operand.kind {
        OperandKind::Constant => compile_constant(&operand.value, operator)
            .map_err(|reason| CompileError::OperandType { step, reason }),
        OperandKind::PreviousStep => compile_previous_step(operand, operator, prior_aliases)
            .map_err(|reason| CompileError::OperandType { step, reason }),
        OperandKind::Field => compile_field(operand, operator, step, scope, registry),
    }
}

fn compile_constant(value: &Value, operator: Operator) -> Result<Expr, OperandError> {
    match operator.family() {
        OperatorFamily::Concat => {
            let text = match value {
                Value::Null => return Err(OperandError::MissingConstant),
                Value::String(s) => s.clone(),
                Value::Number(n) => number_text(n),
                Value::Bool(b) => b.to_string(),
                other => return Err(OperandError::UnsupportedConstant(other.to_string())),
            };
            Ok(Expr::Literal(Literal::String(text)))
        }
        OperatorFamily::Date => match value {
            Value::String(s) if !s.trim().is_empty() => {
                Ok(Expr::to_date(Expr::Literal(Literal::string(s.as_str()))))
            }
            // Epoch milliseconds
            Value::Number(n) => Ok(Expr::to_date(Expr::Literal(Literal::Number(n.clone())))),
            Value::Null | Value::String(_) => Err(OperandError::MissingConstant),
            other => Err(OperandError::UnsupportedConstant(other.to_string())),
        },
        OperatorFamily::Numeric => {
            let number = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok(),
                Value::Null => return Err(OperandError::MissingConstant),
                _ => None,
            };
            number
                .and_then(Literal::number)
                .map(Expr::Literal)
                .ok_or_else(|| OperandError::NotANumber(constant_text(value)))
        }
    }
}

fn compile_previous_step(
    operand: &Operand,
    operator: Operator,
    prior_aliases: &HashSet<String>,
) -> Result<Expr, OperandError> {
    let alias = operand.text().unwrap_or_default();
    if !prior_aliases.contains(alias) {
        return Err(OperandError::UnknownPreviousStep(alias.to_string()));
    }

    // The earlier step's actual type is not checked; the consuming operator decides the wrapper
    let reference = Expr::field(alias);
    Ok(match operator.family() {
        OperatorFamily::Concat => Expr::to_string_expr(reference),
        OperatorFamily::Date => Expr::to_date(reference),
        OperatorFamily::Numeric => reference,
    })
}

fn compile_field(
    operand: &Operand,
    operator: Operator,
    step: usize,
    scope: &CompileScope<'_>,
    registry: &mut LookupRegistry,
) -> Result<Expr, CompileError> {
    let path = operand.text().unwrap_or_default();
    let resolved = resolve_path(scope.schema, scope.root_model, path)
        .map_err(|source| CompileError::PathResolution { step, source })?;

    let prefix = registry
        .register_chain(&resolved.chain)
        .map_err(|collision| CompileError::LookupCollision {
            step,
            alias: collision.alias,
        })?;

    let reference = match prefix {
        Some(alias) => Expr::field(format!("{}.{}", alias, resolved.leaf.name)),
        None => Expr::field(resolved.leaf.name.as_str()),
    };

    Ok(coerce_field(reference, &resolved.leaf.field_type, operator))
}

/// Wrap a field reference according to its type and the consuming operator
///
/// Dates are always coerced with `$toDate`. String fields are also coerced
/// with `$toDate` for every operator except concatenation, so a string field
/// fed to arithmetic becomes a date rather than being rejected.
// TODO: string -> $toDate is pending product review; keep the output shape until it is settled.
fn coerce_field(reference: Expr, field_type: &FieldType, operator: Operator) -> Expr {
    match field_type {
        FieldType::Date | FieldType::Datetime => Expr::to_date(reference),
        FieldType::String if !operator.is_concat() => Expr::to_date(reference),
        _ => reference,
    }
}

/// Decimal text of a number; whole floats lose their fraction (`1.0` -> `"1"`)
fn number_text(n: &Number) -> String {
    match n.as_f64().and_then(Literal::number) {
        Some(Literal::Number(whole)) if !whole.is_f64() => whole.to_string(),
        _ => n.to_string(),
    }
}

fn constant_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
