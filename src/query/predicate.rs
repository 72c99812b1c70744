//! Predicate engine
//!
//! Resolves a column reference against a record and evaluates one
//! comparison operator. Evaluation is permissive: unknown
//! operators pass every record, and missing columns resolve to "absent"
//! rather than raising.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::storage::Record;
use crate::value::Value;

static SNAKE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([a-z])").expect("snake_case segment pattern is valid"));

/// Comparison operators understood by `where_` clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Case-insensitive substring match; `%` wildcards are stripped, not interpreted
    ILike,
    /// Any other operator string. Matches every record; nothing is validated.
    PassThrough(String),
}

impl Operator {
    pub fn parse(op: &str) -> Self {
        match op {
            "=" => Operator::Eq,
            "!=" => Operator::Ne,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            "ilike" => Operator::ILike,
            other => Operator::PassThrough(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::ILike => "ilike",
            Operator::PassThrough(op) => op,
        }
    }
}

impl From<&str> for Operator {
    fn from(op: &str) -> Self {
        Operator::parse(op)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single filter accumulated by a builder.
///
/// Top-level predicates on a builder are AND-combined. `AnyOf` is one
/// opaque predicate holding an internal OR, used for multi-column search.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: String,
        op: Operator,
        value: Value,
    },
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    /// Build one comparison. An unrecognised operator is kept as
    /// [`Operator::PassThrough`] and logged, since it will match every row.
    pub fn compare(column: impl Into<String>, op: impl Into<Operator>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let op = op.into();
        if let Operator::PassThrough(raw) = &op {
            tracing::warn!(column = %column, op = %raw, "unknown operator matches every row");
        }
        Predicate::Compare {
            column,
            op,
            value: value.into(),
        }
    }

    pub fn any_of(predicates: Vec<Predicate>) -> Self {
        Predicate::AnyOf(predicates)
    }

    /// Whether `record` satisfies this predicate
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::Compare { column, op, value } => {
                compare(resolve_column(record, column), op, value)
            }
            Predicate::AnyOf(predicates) => predicates.iter().any(|p| p.matches(record)),
        }
    }

    /// Whether this is an `id = <value>` lookup
    pub fn is_id_equality(&self) -> bool {
        matches!(
            self,
            Predicate::Compare { column, op: Operator::Eq, .. } if unqualified(column) == "id"
        )
    }
}

/// A record satisfies a predicate set iff it satisfies every predicate.
pub fn matches_all(record: &Record, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| p.matches(record))
}

fn unqualified(column: &str) -> &str {
    column.split('.').nth(1).unwrap_or(column)
}

/// Convert a snake_case name to camelCase (`full_text` -> `fullText`)
pub fn to_camel_case(name: &str) -> String {
    SNAKE_SEGMENT
        .replace_all(name, |caps: &Captures| caps[1].to_uppercase())
        .into_owned()
}

/// Look up a column on a record.
///
/// A `table.column` qualifier is stripped first. The exact name is tried,
/// then its camelCase form. `None` means the field is absent, which is not
/// an error.
pub fn resolve_column<'r>(record: &'r Record, column: &str) -> Option<&'r Value> {
    let name = unqualified(column);
    record
        .get(name)
        .or_else(|| record.get(&to_camel_case(name)))
}

/// Evaluate `resolved <op> expected`.
///
/// - `=` never matches an absent field, whatever `expected` is.
/// - `!=` always matches an absent field.
/// - Ordering operators only match values of the same kind; absent fields,
///   nulls and mixed kinds never match.
/// - `ilike` requires text on both sides.
/// - Unknown operators match unconditionally.
pub fn compare(resolved: Option<&Value>, op: &Operator, expected: &Value) -> bool {
    use std::cmp::Ordering::{Equal, Greater, Less};

    let ordering = || resolved.and_then(|v| v.partial_order(expected));
    match op {
        Operator::Eq => resolved.is_some_and(|v| v == expected),
        Operator::Ne => resolved.is_none_or(|v| v != expected),
        Operator::Gt => ordering() == Some(Greater),
        Operator::Gte => matches!(ordering(), Some(Greater | Equal)),
        Operator::Lt => ordering() == Some(Less),
        Operator::Lte => matches!(ordering(), Some(Less | Equal)),
        Operator::ILike => match (resolved, expected) {
            (Some(Value::Text(haystack)), Value::Text(pattern)) => {
                let needle = pattern.replace('%', "").to_lowercase();
                haystack.to_lowercase().contains(&needle)
            }
            _ => false,
        },
        Operator::PassThrough(_) => true,
    }
}
