//! Per-field rule records: coercion targets, checks, and builders.

use serde_json::Value;

/// Coercion target for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Number,
    Boolean,
}

impl Kind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Kind::Text => "text",
            Kind::Number => "a number",
            Kind::Boolean => "a boolean",
        }
    }

    /// Attempt to coerce `value` into this kind. `None` means the value
    /// cannot represent the kind and the field fails with an invalid-type
    /// issue.
    pub(crate) fn coerce(self, value: &Value) -> Option<Value> {
        match self {
            Kind::Text => value.as_str().map(|s| Value::String(s.trim().to_string())),
            Kind::Number => coerce_number(value),
            Kind::Boolean => value.as_bool().map(Value::Bool),
        }
    }
}

/// JSON numbers pass through unchanged; numeric-looking strings parse after
/// trimming. Anything else, and non-finite parses, refuse coercion.
fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => {
            let parsed: f64 = s.trim().parse().ok()?;
            if !parsed.is_finite() {
                return None;
            }
            number_value(parsed)
        }
        _ => None,
    }
}

/// Integral parses become integer JSON numbers so "3" coerces to 3, not 3.0.
fn number_value(n: f64) -> Option<Value> {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(Value::Number((n as i64).into()))
    } else {
        serde_json::Number::from_f64(n).map(Value::Number)
    }
}

/// JSON type name used in invalid-type messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Range and length checks applied to the coerced value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    MinChars(usize),
    GreaterThan(f64),
    AtLeast(f64),
}

impl Check {
    pub(crate) fn passes(self, value: &Value) -> bool {
        match self {
            Check::MinChars(min) => value
                .as_str()
                .map(|s| s.chars().count() >= min)
                .unwrap_or(false),
            Check::GreaterThan(bound) => value.as_f64().map(|n| n > bound).unwrap_or(false),
            Check::AtLeast(bound) => value.as_f64().map(|n| n >= bound).unwrap_or(false),
        }
    }
}

/// A check paired with the message reported when it fails.
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub check: Check,
    pub message: &'static str,
}

/// Declarative rule record for one payload field.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    pub(crate) kind: Kind,
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) constraints: Vec<Constraint>,
}

impl Field {
    fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            constraints: Vec::new(),
        }
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, Kind::Text)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, Kind::Number)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, Kind::Boolean)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Absent values fall back to `default` instead of failing as missing.
    /// The default is trusted as declared; no checks run against it.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self.required = false;
        self
    }

    /// Relax the presence requirement and drop any default, so an absent
    /// field contributes neither a value nor a failure.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self.default = None;
        self
    }

    pub fn min_chars(self, min: usize, message: &'static str) -> Self {
        self.constraint(Check::MinChars(min), message)
    }

    pub fn greater_than(self, bound: f64, message: &'static str) -> Self {
        self.constraint(Check::GreaterThan(bound), message)
    }

    pub fn at_least(self, bound: f64, message: &'static str) -> Self {
        self.constraint(Check::AtLeast(bound), message)
    }

    fn constraint(mut self, check: Check, message: &'static str) -> Self {
        self.constraints.push(Constraint { check, message });
        self
    }
}
