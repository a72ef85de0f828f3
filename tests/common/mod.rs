//! Shared test utilities for integration tests

use serde_json::Value;
use stepcalc::{compile, parser, CalculationStep, Operand, Schema};

/// Load a schema fixture from the tests/test_data directory
pub fn load_fixture(name: &str) -> Schema {
    let path = format!("tests/test_data/{}", name);
    parser::parse_schema_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Load a step list fixture from the tests/test_data directory
#[allow(dead_code)]
pub fn load_steps(name: &str) -> Vec<CalculationStep> {
    let path = format!("tests/test_data/{}", name);
    parser::parse_steps_file(&path)
        .unwrap_or_else(|e| panic!("Failed to load test steps {}: {}", name, e))
}

/// Compile against the `order` model and encode as JSON
pub fn compile_json(schema: &Schema, steps: &[CalculationStep]) -> Value {
    compile(steps, "order", schema).to_json()
}

/// The step `net = amount - 10`
#[allow(dead_code)]
pub fn net_step() -> CalculationStep {
    CalculationStep::new("net", Operand::field("amount"), "$subtract")
        .with_operand2(Operand::constant(10))
}

/// The result every failed pass collapses to
#[allow(dead_code)]
pub fn invalid() -> Value {
    serde_json::json!({ "isValid": false, "final": null, "pipeline": null })
}
