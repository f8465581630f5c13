//! Comparison operators for field filters.
//!
//! `filter_by` accepts the operator as text (`"="`, `"<"`, `">"`, `"<="`, `">="`); the text is
//! parsed into an [`Operator`] before any member is looked at, so an unknown operator fails
//! fast with [`PackmanError::InvalidOperator`].
//!
//! ```ignore
//! use packman::query::Operator;
//!
//! let op: Operator = ">=".parse()?;
//! assert!(op.evaluate(&json!("30"), &json!(25)));
//! ```

use serde_json::Value;
use std::{cmp::Ordering, fmt, str::FromStr};

use crate::{
    compare::compare_values,
    error::PackmanError,
};

/// Field comparison operators for filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal to (`=`).
    Eq,
    /// Less than (`<`).
    Lt,
    /// Greater than (`>`).
    Gt,
    /// Less than or equal to (`<=`).
    Lte,
    /// Greater than or equal to (`>=`).
    Gte,
}

impl Operator {
    /// Returns the textual form of this operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Lte => "<=",
            Operator::Gte => ">=",
        }
    }

    /// Applies the operator as `left <op> right`.
    ///
    /// Values that cannot be ordered against each other never satisfy an ordering operator.
    pub fn evaluate(&self, left: &Value, right: &Value) -> bool {
        match compare_values(left, right) {
            Some(ordering) => match self {
                Operator::Eq => ordering == Ordering::Equal,
                Operator::Lt => ordering == Ordering::Less,
                Operator::Gt => ordering == Ordering::Greater,
                Operator::Lte => ordering != Ordering::Greater,
                Operator::Gte => ordering != Ordering::Less,
            },
            None => false,
        }
    }
}

impl FromStr for Operator {
    type Err = PackmanError;

    fn from_str(op: &str) -> Result<Self, Self::Err> {
        match op {
            "=" => Ok(Operator::Eq),
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "<=" => Ok(Operator::Lte),
            ">=" => Ok(Operator::Gte),
            other => Err(PackmanError::InvalidOperator(other.to_string())),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = PackmanError;

    fn try_from(op: &str) -> Result<Self, Self::Error> {
        op.parse()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
