//! Integration tests for single-operand and date operators

mod common;

use common::{compile_json, invalid, load_fixture};
use serde_json::json;
use stepcalc::{CalculationStep, Operand, Operator};

#[test]
fn test_year_of_date_field() {
    let schema = load_fixture("orders.yaml");
    let step = CalculationStep::new("yr", Operand::field("orderDate"), "$year");

    let result = compile_json(&schema, &[step]);

    assert_eq!(
        result["pipeline"]["addFields"]["yr"],
        json!({ "$year": { "$toDate": "$orderDate" } })
    );
}

#[test]
fn test_atomic_operator_ignores_second_operand() {
    let schema = load_fixture("orders.yaml");
    let step = CalculationStep::new("root", Operand::field("amount"), "$sqrt")
        .with_operand2(Operand::field("does.not.exist"));

    let result = compile_json(&schema, &[step]);

    assert_eq!(result["pipeline"]["addFields"]["root"], json!({ "$sqrt": "$amount" }));
    assert_eq!(result["pipeline"]["lookups"], json!([]));
}

#[test]
fn test_date_part_of_related_date() {
    let schema = load_fixture("orders.yaml");
    let step = CalculationStep::new("sinceMonth", Operand::field("customer.since"), "$month");

    let result = compile_json(&schema, &[step]);

    assert_eq!(
        result["pipeline"]["addFields"]["sinceMonth"],
        json!({ "$month": { "$toDate": "$__calc_lookup_customer.since" } })
    );
}

#[test]
fn test_date_constant_is_coerced() {
    let schema = load_fixture("orders.yaml");
    let step = CalculationStep::new("dow", Operand::constant("2024-03-01"), "$dayOfWeek");

    let result = compile_json(&schema, &[step]);

    assert_eq!(
        result["pipeline"]["addFields"]["dow"],
        json!({ "$dayOfWeek": { "$toDate": "2024-03-01" } })
    );
}

#[test]
fn test_binary_operator_without_second_operand_is_invalid() {
    let schema = load_fixture("orders.yaml");
    let step = CalculationStep::new("x", Operand::field("amount"), "$subtract");

    assert_eq!(compile_json(&schema, &[step]), invalid());
}

#[test]
fn test_every_operator_compiles_over_a_number() {
    let schema = load_fixture("orders.yaml");

    for op in Operator::ALL {
        let field = if op.is_date_part() { "orderDate" } else { "amount" };
        let mut step = CalculationStep::new("out", Operand::field(field), op.as_str());
        if !op.is_atomic() {
            step = step.with_operand2(Operand::constant(2));
        }

        let result = compile_json(&schema, &[step]);

        assert_eq!(result["isValid"], json!(true), "operator {}", op);
        assert!(result["pipeline"]["addFields"]["out"].get(op.as_str()).is_some());
    }
}
