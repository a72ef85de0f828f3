//! Reactive emitter
//!
//! Recompiles on every input change and forwards the result only when it
//! differs from the last one forwarded, so the downstream executor does not
//! re-run an identical pipeline.

use tracing::trace;
use crate::compiler::compile;
use crate::pipeline::CompilationResult;
use crate::schema::Schema;
use crate::step::CalculationStep;

/// Change-gated compiler around a host callback
pub struct ReactiveCompiler<F>
where
    F: FnMut(&CompilationResult),
{
    last: Option<CompilationResult>,
    on_change: F,
    emitted: usize,
}

impl<F> ReactiveCompiler<F>
where
    F: FnMut(&CompilationResult),
{
    pub fn new(on_change: F) -> Self {
        Self {
            last: None,
            on_change,
            emitted: 0,
        }
    }

    /// Recompile after the steps, schema or root model changed
    ///
    /// Returns true when the callback ran. The first update always emits.
    pub fn update(&mut self, steps: &[CalculationStep], root_model: &str, schema: &Schema) -> bool {
        let result = compile(steps, root_model, schema);

        if self.last.as_ref() == Some(&result) {
            trace!("calculation result unchanged");
            return false;
        }

        (self.on_change)(&result);
        self.last = Some(result);
        self.emitted += 1;
        true
    }

    /// The last result forwarded to the callback
    pub fn last(&self) -> Option<&CompilationResult> {
        self.last.as_ref()
    }

    /// How many times the callback has run
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Forget the last result so the next update emits unconditionally
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, FieldType, Model};
    use crate::step::Operand;

    fn test_schema() -> Schema {
        Schema::new(vec![Model::new("order", vec![Field::new("amount", FieldType::Number)])])
    }

    #[test]
    fn test_first_update_emits() {
        let schema = test_schema();
        let mut seen = Vec::new();
        {
            let mut reactive = ReactiveCompiler::new(|r: &CompilationResult| seen.push(r.clone()));
            assert!(reactive.update(&[], "order", &schema));
            assert_eq!(reactive.emitted(), 1);
        }
        assert_eq!(seen, vec![CompilationResult::empty()]);
    }

    #[test]
    fn test_identical_result_is_not_reemitted() {
        let schema = test_schema();
        let steps = vec![
            CalculationStep::new("net", Operand::field("amount"), "$subtract")
                .with_operand2(Operand::constant(10)),
        ];
        let mut reactive = ReactiveCompiler::new(|_: &CompilationResult| {});

        assert!(reactive.update(&steps, "order", &schema));
        assert!(!reactive.update(&steps, "order", &schema));

        // A different step id does not change the compiled output
        let renamed = vec![steps[0].clone().with_id("other")];
        assert!(!reactive.update(&renamed, "order", &schema));
        assert_eq!(reactive.emitted(), 1);
    }

    #[test]
    fn test_changed_result_emits() {
        let schema = test_schema();
        let mut reactive = ReactiveCompiler::new(|_: &CompilationResult| {});
        let step = CalculationStep::new("net", Operand::field("amount"), "$subtract")
            .with_operand2(Operand::constant(10));

        reactive.update(&[step.clone()], "order", &schema);
        let edited = step.with_operand2(Operand::constant(11));
        assert!(reactive.update(&[edited], "order", &schema));
        assert_eq!(reactive.emitted(), 2);
    }

    #[test]
    fn test_reset_forces_emit() {
        let schema = test_schema();
        let mut reactive = ReactiveCompiler::new(|_: &CompilationResult| {});
        reactive.update(&[], "order", &schema);
        reactive.reset();
        assert!(reactive.last().is_none());
        assert!(reactive.update(&[], "order", &schema));
    }
}
