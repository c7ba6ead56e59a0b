//! Transform specifiers and string-to-value coercion.
//!
//! A [`Transform`] names the target type for a resolved raw value. The
//! symbolic specifiers (`string`, `number`, `boolean`, `bigint`) have fixed
//! semantics; [`Transform::Custom`] carries an arbitrary caller-supplied
//! function.
//!
//! `Number` and `Boolean` are lenient: a present value that does not match
//! the expected pattern coerces to absence rather than an error. `BigInt`
//! is strict and fails with [`TransformError::BigInt`] on a present but
//! unparsable value. The asymmetry is part of the contract.

use std::fmt;
use std::sync::{Arc, LazyLock};

use num_bigint::BigInt;
use regex::Regex;
use thiserror::Error;

/// Integer-or-decimal literal accepted by the `number` transform.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Big-integer literal (`1234n`) accepted by the `number` transform.
static NUMBER_BIGINT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+n$").unwrap());

/// Digit run with an optional trailing marker, accepted by `bigint`.
static BIGINT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)n?$").unwrap());

/// Errors during coercion.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("cannot parse `{value}` as a big integer")]
    BigInt { value: String },

    #[error("custom transform failed: {0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// A coerced configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    BigInt(BigInt),
    /// Structured data produced by a custom transform (e.g. parsed JSON).
    Json(serde_json::Value),
}

impl Value {
    /// The string content, if this is a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, if this is a `Number` value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean content, if this is a `Boolean` value.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The big-integer content, if this is a `BigInt` value.
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Value::BigInt(i) => Some(i),
            _ => None,
        }
    }

    /// The structured content, if this is a `Json` value.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(j) => Some(j),
            _ => None,
        }
    }
}

/// Caller-supplied transform from a raw string to a [`Value`].
pub type CustomFn = Arc<dyn Fn(&str) -> Result<Value, TransformError> + Send + Sync>;

/// Target type for coercing a resolved raw value.
#[derive(Clone, Default)]
pub enum Transform {
    /// Identity; the raw string is the value.
    #[default]
    String,
    /// Lenient numeric parse; mismatches coerce to absence.
    Number,
    /// Lenient case-insensitive `true`/`false`; mismatches coerce to absence.
    Boolean,
    /// Strict arbitrary-precision integer parse; mismatches are errors.
    BigInt,
    /// Arbitrary function over the raw string; its errors propagate.
    Custom(CustomFn),
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::String => write!(f, "String"),
            Transform::Number => write!(f, "Number"),
            Transform::Boolean => write!(f, "Boolean"),
            Transform::BigInt => write!(f, "BigInt"),
            Transform::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::String => write!(f, "string"),
            Transform::Number => write!(f, "number"),
            Transform::Boolean => write!(f, "boolean"),
            Transform::BigInt => write!(f, "bigint"),
            Transform::Custom(_) => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for Transform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(Transform::String),
            "number" => Ok(Transform::Number),
            "boolean" => Ok(Transform::Boolean),
            "bigint" => Ok(Transform::BigInt),
            other => Err(format!(
                "unsupported transform: '{other}'. Supported: string, number, boolean, bigint"
            )),
        }
    }
}

impl Transform {
    /// Apply the transform to a resolved raw value.
    ///
    /// `Ok(None)` means the value was present but did not match a lenient
    /// specifier's pattern; callers treat it as absence.
    pub fn apply(&self, raw: &str) -> Result<Option<Value>, TransformError> {
        match self {
            Transform::String => Ok(Some(Value::String(raw.to_string()))),
            Transform::Number => Ok(parse_number(raw).map(Value::Number)),
            Transform::Boolean => Ok(parse_boolean(raw).map(Value::Boolean)),
            Transform::BigInt => parse_bigint(raw).map(|i| Some(Value::BigInt(i))),
            Transform::Custom(f) => f(raw).map(Some),
        }
    }
}

/// Parse an integer, decimal, or big-integer literal into an `f64`.
///
/// A `1234n` literal is promoted to the numeric type by stripping the
/// trailing marker.
fn parse_number(raw: &str) -> Option<f64> {
    if NUMBER_RE.is_match(raw) {
        raw.parse().ok()
    } else if NUMBER_BIGINT_RE.is_match(raw) {
        raw[..raw.len() - 1].parse().ok()
    } else {
        None
    }
}

/// Parse a case-insensitive `true`/`false` literal.
fn parse_boolean(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Parse a digit run (with optional trailing `n` marker) into a `BigInt`.
fn parse_bigint(raw: &str) -> Result<BigInt, TransformError> {
    let captures = BIGINT_RE.captures(raw).ok_or_else(|| TransformError::BigInt {
        value: raw.to_string(),
    })?;
    captures[1].parse().map_err(|_| TransformError::BigInt {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_identity() {
        let value = Transform::String.apply("hello").unwrap();
        assert_eq!(value, Some(Value::String("hello".to_string())));
    }

    #[test]
    fn number_parses_integer_and_decimal() {
        assert_eq!(
            Transform::Number.apply("1234").unwrap(),
            Some(Value::Number(1234.0))
        );
        assert_eq!(
            Transform::Number.apply("1234.5").unwrap(),
            Some(Value::Number(1234.5))
        );
    }

    #[test]
    fn number_promotes_bigint_literal() {
        assert_eq!(
            Transform::Number.apply("1234n").unwrap(),
            Some(Value::Number(1234.0))
        );
    }

    #[test]
    fn number_mismatch_is_lenient() {
        assert_eq!(Transform::Number.apply("gt12").unwrap(), None);
        assert_eq!(Transform::Number.apply("12,5").unwrap(), None);
        assert_eq!(Transform::Number.apply("-5").unwrap(), None);
        assert_eq!(Transform::Number.apply("").unwrap(), None);
    }

    #[test]
    fn boolean_is_case_insensitive() {
        assert_eq!(
            Transform::Boolean.apply("true").unwrap(),
            Some(Value::Boolean(true))
        );
        assert_eq!(
            Transform::Boolean.apply("TRUE").unwrap(),
            Some(Value::Boolean(true))
        );
        assert_eq!(
            Transform::Boolean.apply("False").unwrap(),
            Some(Value::Boolean(false))
        );
    }

    #[test]
    fn boolean_mismatch_is_lenient() {
        assert_eq!(Transform::Boolean.apply("yes").unwrap(), None);
        assert_eq!(Transform::Boolean.apply("truthy").unwrap(), None);
        assert_eq!(Transform::Boolean.apply("").unwrap(), None);
    }

    #[test]
    fn bigint_parses_with_and_without_marker() {
        let expected: BigInt = "1234".parse().unwrap();
        assert_eq!(
            Transform::BigInt.apply("1234n").unwrap(),
            Some(Value::BigInt(expected.clone()))
        );
        assert_eq!(
            Transform::BigInt.apply("1234").unwrap(),
            Some(Value::BigInt(expected))
        );
    }

    #[test]
    fn bigint_exceeds_machine_width() {
        let digits = "123456789012345678901234567890123456789012345678901234567890";
        let value = Transform::BigInt.apply(digits).unwrap().unwrap();
        assert_eq!(value.as_bigint().unwrap().to_string(), digits);
    }

    #[test]
    fn bigint_mismatch_is_strict() {
        assert!(matches!(
            Transform::BigInt.apply("12.5"),
            Err(TransformError::BigInt { .. })
        ));
        assert!(matches!(
            Transform::BigInt.apply("abc"),
            Err(TransformError::BigInt { .. })
        ));
    }

    #[test]
    fn custom_transform_errors_propagate() {
        let transform = Transform::Custom(Arc::new(|_: &str| {
            Err(TransformError::Custom("nope".into()))
        }));
        let err = transform.apply("anything").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn transform_tag_round_trip() {
        for tag in ["string", "number", "boolean", "bigint"] {
            let transform: Transform = tag.parse().unwrap();
            assert_eq!(transform.to_string(), tag);
        }
        assert!("date".parse::<Transform>().is_err());
    }
}
