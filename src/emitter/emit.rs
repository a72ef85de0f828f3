//! Aggregation-expression emission
//!
//! Operator applications become `{ "$op": [a, b] }` for binary operators and
//! `{ "$op": a }` (bare argument) for unary ones; field references become
//! `"$path"`. The executor pattern-matches on exactly this shape.

use serde_json::{json, Map, Value};

use crate::pipeline::{AbstractPipeline, CompilationResult, Expr, Literal, LookupDescriptor};
use crate::operator::Arity;

const TO_DATE: &str = "$toDate";
const TO_STRING: &str = "$toString";
const LITERAL: &str = "$literal";

/// Emit a single expression
pub fn emit_expr(expr: &Expr) -> Value {
    match expr {
        Expr::Field(path) => Value::String(format!("${}", path)),
        Expr::Literal(lit) => emit_literal(lit),
        Expr::ToDate(inner) => single_key(TO_DATE, emit_expr(inner)),
        Expr::ToString(inner) => single_key(TO_STRING, emit_expr(inner)),
        Expr::Apply { operator, args } => {
            let emitted: Vec<Value> = args.iter().map(emit_expr).collect();
            let body = match (operator.arity(), emitted.len()) {
                (Arity::Unary, 1) => emitted.into_iter().next().unwrap_or(Value::Null),
                _ => Value::Array(emitted),
            };
            single_key(operator.as_str(), body)
        }
    }
}

fn emit_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Number(n.clone()),
        // A bare "$..." string would be read as a field path
        Literal::String(s) if s.starts_with('$') => single_key(LITERAL, Value::String(s.clone())),
        Literal::String(s) => Value::String(s.clone()),
    }
}

/// Emit a lookup descriptor
pub fn emit_lookup(lookup: &LookupDescriptor) -> Value {
    let mut obj = json!({
        "fromModel": lookup.from_model,
        "localField": lookup.local_field,
        "foreignModel": lookup.foreign_model,
        "as": lookup.alias,
        "isMultiple": lookup.is_multiple,
    });
    if let (Some(parent), Value::Object(map)) = (&lookup.parent_as, &mut obj) {
        map.insert("parentAs".to_string(), Value::String(parent.clone()));
    }
    obj
}

/// Emit `{ lookups: [...], addFields: { alias: expr, ... } }`
///
/// `addFields` keys follow step order; a repeated alias keeps its first
/// position and takes the last step's expression.
pub fn emit_pipeline(pipeline: &AbstractPipeline) -> Value {
    let lookups: Vec<Value> = pipeline.lookups.iter().map(emit_lookup).collect();

    let mut add_fields = Map::new();
    for field in &pipeline.add_fields {
        add_fields.insert(field.alias.clone(), emit_expr(&field.expr));
    }

    json!({
        "lookups": lookups,
        "addFields": Value::Object(add_fields),
    })
}

/// Emit `{ isValid, final, pipeline }`
pub fn emit_result(result: &CompilationResult) -> Value {
    json!({
        "isValid": result.is_valid,
        "final": result.final_alias,
        "pipeline": result.pipeline.as_ref().map(emit_pipeline),
    })
}

fn single_key(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}
