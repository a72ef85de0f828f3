//! Expression types for the abstract pipeline

use serde_json::Number;
use crate::operator::Operator;

/// Literal values
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(Number),
    String(String),
}

impl Literal {
    /// Build a numeric literal, keeping integral values as integers
    ///
    /// Returns `None` for NaN and infinities.
    pub fn number(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // 2^53: the largest range where every integer is exact in f64
        if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            return Some(Literal::Number(Number::from(value as i64)));
        }
        Number::from_f64(value).map(Literal::Number)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Literal::String(value.into())
    }
}

/// Output expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field path without the leading `$`, e.g. `amount` or `__calc_lookup_customer.discountRate`
    Field(String),
    /// Literal value
    Literal(Literal),
    /// Coerce to a date
    ToDate(Box<Expr>),
    /// Coerce to a string
    ToString(Box<Expr>),
    /// Operator application; one argument for unary operators, two otherwise
    Apply {
        operator: Operator,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn field(path: impl Into<String>) -> Self {
        Expr::Field(path.into())
    }

    pub fn to_date(inner: Expr) -> Self {
        Expr::ToDate(Box::new(inner))
    }

    pub fn to_string_expr(inner: Expr) -> Self {
        Expr::ToString(Box::new(inner))
    }

    pub fn apply(operator: Operator, args: Vec<Expr>) -> Self {
        Expr::Apply { operator, args }
    }

    /// Field paths referenced anywhere in this expression
    pub fn field_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        collect_field_refs(self, &mut refs);
        refs
    }
}

fn collect_field_refs<'a>(expr: &'a Expr, refs: &mut Vec<&'a str>) {
    match expr {
        Expr::Field(path) => refs.push(path),
        Expr::Literal(_) => {}
        Expr::ToDate(inner) | Expr::ToString(inner) => collect_field_refs(inner, refs),
        Expr::Apply { args, .. } => {
            for arg in args {
                collect_field_refs(arg, refs);
            }
        }
    }
}
