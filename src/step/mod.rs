//! Calculation step types (noun module)
//!
//! A step list is authored by the host UI. Steps are kept in the same loose
//! form the UI sends (raw operator string, untyped operand values) so that an
//! incomplete step can still be represented; the compiler decides validity.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// What an operand refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperandKind {
    /// Dotted field path on the root model, e.g. `customer.discountRate`
    Field,
    /// Literal value
    Constant,
    /// Output alias of an earlier step
    PreviousStep,
}

/// One input of a calculation step
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Operand {
    #[serde(rename = "type")]
    pub kind: OperandKind,
    #[serde(default)]
    pub value: Value,
}

/// A single calculation step: `outputAlias = operand1 <operator> operand2`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    /// Opaque identifier assigned by the host; numeric ids are kept as their decimal text
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub output_alias: String,
    pub operand1: Operand,
    /// Operator identifier as authored, e.g. `$subtract`
    #[serde(default)]
    pub operator: String,
    /// Absent for unary operators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand2: Option<Operand>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "step id must be a string or number, got {}",
            other
        ))),
    }
}

impl Operand {
    pub fn field(path: impl Into<String>) -> Self {
        Self {
            kind: OperandKind::Field,
            value: Value::String(path.into()),
        }
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Self {
            kind: OperandKind::Constant,
            value: value.into(),
        }
    }

    pub fn previous_step(alias: impl Into<String>) -> Self {
        Self {
            kind: OperandKind::PreviousStep,
            value: Value::String(alias.into()),
        }
    }

    /// The value as text, for field paths and step aliases
    pub fn text(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Whether the user has filled this operand in
    ///
    /// Constants count as populated only when they differ from the defaults a
    /// new step starts with (null, empty string, zero).
    pub fn is_populated(&self) -> bool {
        match self.kind {
            OperandKind::Field | OperandKind::PreviousStep => {
                self.text().map(|s| !s.trim().is_empty()).unwrap_or(false)
            }
            OperandKind::Constant => match &self.value {
                Value::Null => false,
                Value::String(s) => !s.is_empty(),
                Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
                _ => true,
            },
        }
    }
}

impl Default for CalculationStep {
    /// The step a host inserts when the user adds a new row
    fn default() -> Self {
        Self {
            id: String::new(),
            output_alias: String::new(),
            operand1: Operand::field(""),
            operator: "$add".to_string(),
            operand2: Some(Operand::constant(0)),
        }
    }
}

impl CalculationStep {
    pub fn new(output_alias: impl Into<String>, operand1: Operand, operator: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            output_alias: output_alias.into(),
            operand1,
            operator: operator.into(),
            operand2: None,
        }
    }

    pub fn with_operand2(mut self, operand: Operand) -> Self {
        self.operand2 = Some(operand);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// True when no operand has been filled in yet
    pub fn is_blank(&self) -> bool {
        !self.operand1.is_populated()
            && !self.operand2.as_ref().map(Operand::is_populated).unwrap_or(false)
    }
}
