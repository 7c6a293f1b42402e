//! Schema evaluation: walk every field rule, collect every failure.

use serde_json::{Map, Value};

use crate::field::{json_type_name, Field};
use crate::issue::Issue;

/// Cleaned validation output: declared fields only, values coerced.
pub type Document = Map<String, Value>;

/// Ordered collection of field rules describing one payload shape.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Derive the all-optional variant of this schema at construction time.
    ///
    /// Presence requirements relax; per-field constraints still apply to
    /// whichever fields appear. Defaults are dropped, so a field absent from
    /// the input stays absent from the output.
    pub fn partial(&self) -> Schema {
        Schema {
            fields: self.fields.iter().map(|f| f.clone().optional()).collect(),
        }
    }

    /// Validate `raw` against every field rule.
    ///
    /// Fields are evaluated independently in declaration order; a failure on
    /// one field never suppresses evaluation of the others. Within a field,
    /// a coercion failure reports one invalid-type issue and skips the
    /// field's constraints (there is no value to check). Undeclared input
    /// keys are dropped from the success value.
    pub fn validate(&self, raw: &Value) -> Result<Document, Vec<Issue>> {
        let Some(input) = raw.as_object() else {
            return Err(vec![Issue::root(format!(
                "Expected an object, received {}",
                json_type_name(raw)
            ))]);
        };

        let mut output = Document::new();
        let mut issues = Vec::new();

        for field in &self.fields {
            match input.get(field.name()) {
                None => {
                    if let Some(default) = &field.default {
                        output.insert(field.name().to_string(), default.clone());
                    } else if field.required {
                        issues.push(Issue::new(field.name(), "Required"));
                    }
                }
                Some(value) => match field.kind.coerce(value) {
                    None => issues.push(Issue::new(
                        field.name(),
                        format!(
                            "Expected {}, received {}",
                            field.kind.label(),
                            json_type_name(value)
                        ),
                    )),
                    Some(coerced) => {
                        for constraint in &field.constraints {
                            if !constraint.check.passes(&coerced) {
                                issues.push(Issue::new(field.name(), constraint.message));
                            }
                        }
                        output.insert(field.name().to_string(), coerced);
                    }
                },
            }
        }

        if issues.is_empty() {
            Ok(output)
        } else {
            Err(issues)
        }
    }
}
