//! Per-step diagnostics for hosts that need to show which step is wrong

use std::collections::HashSet;
use crate::schema::Schema;
use crate::step::CalculationStep;
use super::assemble::is_trivial;
use super::error::CompileError;
use super::lookup::LookupRegistry;
use super::operand::CompileScope;
use super::step::compile_step;

/// Validation outcome for one step
#[derive(Debug, Clone, PartialEq)]
pub struct StepDiagnostic {
    pub index: usize,
    /// The step's host identifier
    pub id: String,
    pub error: Option<CompileError>,
}

impl StepDiagnostic {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Check every step, continuing past failures
///
/// Each step sees the aliases of all earlier steps, including earlier steps
/// that failed, so one bad step is reported once instead of cascading into
/// every step that references it. The all-or-nothing result of `compile` is
/// unaffected.
pub fn diagnose(steps: &[CalculationStep], root_model: &str, schema: &Schema) -> Vec<StepDiagnostic> {
    let trivial = is_trivial(steps);
    let scope = CompileScope { schema, root_model };
    let mut registry = LookupRegistry::new();
    let mut prior_aliases: HashSet<String> = HashSet::new();

    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let error = if trivial {
                None
            } else {
                compile_step(step, index, &prior_aliases, &scope, &mut registry).err()
            };
            if !step.output_alias.is_empty() {
                prior_aliases.insert(step.output_alias.clone());
            }
            StepDiagnostic {
                index,
                id: step.id.clone(),
                error,
            }
        })
        .collect()
}
