//! Calculation operators (noun module)
//!
//! The closed set of operators a step may apply. Each operator carries its
//! arity and family as data; compilation dispatches on those rather than on the
//! raw identifier string.

use std::fmt;
use std::str::FromStr;

/// How many operands an operator consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// One operand, emitted as a bare argument
    Unary,
    /// Two operands, emitted as an argument array
    Binary,
}

/// Which coercion rules apply to an operator's operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    Numeric,
    /// String concatenation
    Concat,
    /// Date-part extraction
    Date,
}

/// Operators supported in calculation steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Binary arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Mod,
    Pow,
    // Binary string
    Concat,
    // Date-part extraction
    Year,
    Month,
    Week,
    DayOfMonth,
    DayOfWeek,
    DayOfYear,
    Hour,
    Minute,
    Second,
    // Unary numeric
    Sqrt,
    Abs,
    Ceil,
    Floor,
    Trunc,
    Exp,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl Operator {
    pub const ALL: [Operator; 30] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Mod,
        Operator::Pow,
        Operator::Concat,
        Operator::Year,
        Operator::Month,
        Operator::Week,
        Operator::DayOfMonth,
        Operator::DayOfWeek,
        Operator::DayOfYear,
        Operator::Hour,
        Operator::Minute,
        Operator::Second,
        Operator::Sqrt,
        Operator::Abs,
        Operator::Ceil,
        Operator::Floor,
        Operator::Trunc,
        Operator::Exp,
        Operator::Ln,
        Operator::Log10,
        Operator::Sin,
        Operator::Cos,
        Operator::Tan,
        Operator::Asin,
        Operator::Acos,
        Operator::Atan,
    ];

    /// Aggregation-expression identifier, including the leading `$`
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "$add",
            Operator::Subtract => "$subtract",
            Operator::Multiply => "$multiply",
            Operator::Divide => "$divide",
            Operator::Mod => "$mod",
            Operator::Pow => "$pow",
            Operator::Concat => "$concat",
            Operator::Year => "$year",
            Operator::Month => "$month",
            Operator::Week => "$week",
            Operator::DayOfMonth => "$dayOfMonth",
            Operator::DayOfWeek => "$dayOfWeek",
            Operator::DayOfYear => "$dayOfYear",
            Operator::Hour => "$hour",
            Operator::Minute => "$minute",
            Operator::Second => "$second",
            Operator::Sqrt => "$sqrt",
            Operator::Abs => "$abs",
            Operator::Ceil => "$ceil",
            Operator::Floor => "$floor",
            Operator::Trunc => "$trunc",
            Operator::Exp => "$exp",
            Operator::Ln => "$ln",
            Operator::Log10 => "$log10",
            Operator::Sin => "$sin",
            Operator::Cos => "$cos",
            Operator::Tan => "$tan",
            Operator::Asin => "$asin",
            Operator::Acos => "$acos",
            Operator::Atan => "$atan",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Operator::Add
            | Operator::Subtract
            | Operator::Multiply
            | Operator::Divide
            | Operator::Mod
            | Operator::Pow
            | Operator::Concat => Arity::Binary,
            _ => Arity::Unary,
        }
    }

    pub fn family(&self) -> OperatorFamily {
        match self {
            Operator::Concat => OperatorFamily::Concat,
            Operator::Year
            | Operator::Month
            | Operator::Week
            | Operator::DayOfMonth
            | Operator::DayOfWeek
            | Operator::DayOfYear
            | Operator::Hour
            | Operator::Minute
            | Operator::Second => OperatorFamily::Date,
            _ => OperatorFamily::Numeric,
        }
    }

    /// Unary operators take a single bare argument
    pub fn is_atomic(&self) -> bool {
        self.arity() == Arity::Unary
    }

    pub fn is_concat(&self) -> bool {
        self.family() == OperatorFamily::Concat
    }

    pub fn is_date_part(&self) -> bool {
        self.family() == OperatorFamily::Date
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an operator identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOperatorError {
    pub input: String,
}

impl fmt::Display for ParseOperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.input.is_empty() {
            write!(f, "No operator selected")
        } else {
            write!(f, "Unknown operator '{}'", self.input)
        }
    }
}

impl std::error::Error for ParseOperatorError {}

impl FromStr for Operator {
    type Err = ParseOperatorError;

    /// Accepts the identifier with or without its leading `$`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed.strip_prefix('$').unwrap_or(trimmed);
        Operator::ALL
            .iter()
            .copied()
            .find(|op| &op.as_str()[1..] == name)
            .filter(|_| !name.is_empty())
            .ok_or_else(|| ParseOperatorError { input: s.to_string() })
    }
}
