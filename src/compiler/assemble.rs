//! Pipeline assembly: the full step list -> compilation result

use std::collections::HashSet;
use tracing::{debug, instrument};
use crate::pipeline::{AbstractPipeline, CompilationResult};
use crate::schema::Schema;
use crate::step::CalculationStep;
use super::error::CompileError;
use super::lookup::LookupRegistry;
use super::operand::CompileScope;
use super::step::compile_step;

/// Compile a step list against `root_model`
///
/// All-or-nothing: if any step fails the result is invalid with no pipeline.
/// An empty list, or a single step nobody has filled in yet, is the valid
/// "no computation" result.
pub fn compile(steps: &[CalculationStep], root_model: &str, schema: &Schema) -> CompilationResult {
    match try_compile(steps, root_model, schema) {
        Ok(result) => result,
        Err(err) => {
            debug!(error = %err, step = ?err.step(), "calculation steps invalid");
            CompilationResult::invalid()
        }
    }
}

/// Like `compile`, but reports why a pass failed
#[instrument(skip_all, fields(root = root_model, steps = steps.len()))]
pub fn try_compile(
    steps: &[CalculationStep],
    root_model: &str,
    schema: &Schema,
) -> Result<CompilationResult, CompileError> {
    if is_trivial(steps) {
        return Ok(CompilationResult::empty());
    }

    let scope = CompileScope { schema, root_model };
    let mut registry = LookupRegistry::new();
    let mut prior_aliases: HashSet<String> = HashSet::new();
    let mut add_fields = Vec::with_capacity(steps.len());

    for (index, step) in steps.iter().enumerate() {
        let field = compile_step(step, index, &prior_aliases, &scope, &mut registry)?;
        prior_aliases.insert(field.alias.clone());
        add_fields.push(field);
    }

    let Some(final_alias) = add_fields.last().map(|f| f.alias.clone()) else {
        return Ok(CompilationResult::empty());
    };

    let pipeline = AbstractPipeline {
        lookups: registry.into_lookups(),
        add_fields,
    };

    // Every compiled alias was pushed above; this holds unless assembly itself is broken
    if !pipeline.contains_alias(&final_alias) {
        return Err(CompileError::AssemblyConsistency { alias: final_alias });
    }

    debug!(
        final_alias = %final_alias,
        lookups = pipeline.lookups.len(),
        "calculation steps compiled"
    );
    Ok(CompilationResult::compiled(final_alias, pipeline))
}

/// No steps, or one step with no operand filled in
pub fn is_trivial(steps: &[CalculationStep]) -> bool {
    match steps {
        [] => true,
        [only] => only.is_blank(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldType, Model};
    use crate::step::Operand;

    fn test_schema() -> Schema {
        Schema::new(vec![
            Model::new("order", vec![
                Field::new("amount", FieldType::Number),
                Field::relation("customer", "customer"),
            ]),
            Model::new("customer", vec![Field::new("discountRate", FieldType::Number)]),
        ])
    }

    fn net_step() -> CalculationStep {
        CalculationStep::new("net", Operand::field("amount"), "$subtract")
            .with_operand2(Operand::constant(10))
    }

    #[test]
    fn test_empty_and_default_steps_are_no_ops() {
        let schema = test_schema();
        assert_eq!(compile(&[], "order", &schema), CompilationResult::empty());
        assert_eq!(
            compile(&[CalculationStep::default()], "order", &schema),
            CompilationResult::empty()
        );
    }

    #[test]
    fn test_two_blank_steps_are_not_trivial() {
        let schema = test_schema();
        let steps = vec![CalculationStep::default(), CalculationStep::default()];
        assert_eq!(compile(&steps, "order", &schema), CompilationResult::invalid());
    }

    #[test]
    fn test_final_alias_is_last_step() {
        let schema = test_schema();
        let steps = vec![
            net_step(),
            CalculationStep::new("withTax", Operand::previous_step("net"), "$multiply")
                .with_operand2(Operand::constant(1.2)),
        ];
        let result = compile(&steps, "order", &schema);

        assert!(result.is_valid);
        assert_eq!(result.final_alias.as_deref(), Some("withTax"));
        assert_eq!(result.pipeline.unwrap().add_fields.len(), 2);
    }

    #[test]
    fn test_failure_reports_step_index() {
        let schema = test_schema();
        let steps = vec![
            net_step(),
            CalculationStep::new("bad", Operand::field("customer.nope"), "$abs"),
        ];
        let err = try_compile(&steps, "order", &schema).unwrap_err();
        assert_eq!(err.step(), Some(1));
        assert_eq!(compile(&steps, "order", &schema), CompilationResult::invalid());
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let schema = test_schema();
        let steps = vec![
            net_step(),
            CalculationStep::new("loop", Operand::previous_step("loop"), "$abs"),
        ];
        assert!(!compile(&steps, "order", &schema).is_valid);
    }

    #[test]
    fn test_duplicate_alias_may_reference_earlier_binding() {
        let schema = test_schema();
        let steps = vec![
            net_step(),
            CalculationStep::new("net", Operand::previous_step("net"), "$abs"),
        ];
        let result = compile(&steps, "order", &schema);
        assert!(result.is_valid);
        assert_eq!(result.final_alias.as_deref(), Some("net"));
    }

    #[test]
    fn test_unknown_root_model_with_field_operand() {
        let schema = test_schema();
        assert!(!compile(&[net_step()], "invoice", &schema).is_valid);
    }

    #[test]
    fn test_is_trivial() {
        assert!(is_trivial(&[]));
        assert!(is_trivial(&[CalculationStep::default()]));
        assert!(!is_trivial(&[net_step()]));
    }
}
