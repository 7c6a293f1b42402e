//! Per-collection document rules.
//!
//! A collection declares the shape every stored document must satisfy.
//! Checking a document yields at most one failure per field: missing, then
//! wrong kind, then range/length, mirroring how document databases report
//! model-level validation.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::store::Document;

/// JSON kinds a document field may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Number,
    Boolean,
}

impl ValueKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::Text => value.is_string(),
            ValueKind::Number => value.is_number(),
            ValueKind::Boolean => value.is_boolean(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Number => "number",
            ValueKind::Boolean => "boolean",
        }
    }
}

/// Flat rule record for one document field.
#[derive(Debug, Clone)]
pub struct DocField {
    name: &'static str,
    kind: ValueKind,
    required: Option<&'static str>,
    min_number: Option<(f64, &'static str)>,
    min_chars: Option<(usize, &'static str)>,
}

impl DocField {
    fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            required: None,
            min_number: None,
            min_chars: None,
        }
    }

    pub fn text(name: &'static str) -> Self {
        Self::new(name, ValueKind::Text)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, ValueKind::Number)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, ValueKind::Boolean)
    }

    /// Report `message` when the field is missing (or null).
    pub fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub fn min_number(mut self, bound: f64, message: &'static str) -> Self {
        self.min_number = Some((bound, message));
        self
    }

    pub fn min_chars(mut self, min: usize, message: &'static str) -> Self {
        self.min_chars = Some((min, message));
        self
    }
}

/// Ordered field rules for one collection.
#[derive(Debug, Clone, Default)]
pub struct DocumentRules {
    fields: Vec<DocField>,
}

impl DocumentRules {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, field: DocField) -> Self {
        self.fields.push(field);
        self
    }

    /// Check `doc` against every field rule, producing one message per
    /// failing field. An empty map means the document satisfies the rules.
    pub fn check(&self, doc: &Document) -> BTreeMap<String, String> {
        let mut failures = BTreeMap::new();

        for field in &self.fields {
            match doc.get(field.name) {
                None | Some(Value::Null) => {
                    if let Some(message) = field.required {
                        failures.insert(field.name.to_string(), message.to_string());
                    }
                }
                Some(value) => {
                    if !field.kind.matches(value) {
                        failures.insert(
                            field.name.to_string(),
                            format!(
                                "Cast to {} failed for path '{}'",
                                field.kind.label(),
                                field.name
                            ),
                        );
                        continue;
                    }
                    if let Some((bound, message)) = field.min_number {
                        if value.as_f64().map(|n| n < bound).unwrap_or(false) {
                            failures.insert(field.name.to_string(), message.to_string());
                            continue;
                        }
                    }
                    if let Some((min, message)) = field.min_chars {
                        if value.as_str().map(|s| s.chars().count() < min).unwrap_or(false) {
                            failures.insert(field.name.to_string(), message.to_string());
                        }
                    }
                }
            }
        }

        failures
    }
}

/// A collection a module contributes at startup.
#[derive(Debug, Clone)]
pub struct CollectionSpec {
    pub name: &'static str,
    pub rules: DocumentRules,
}

impl CollectionSpec {
    pub fn new(name: &'static str, rules: DocumentRules) -> Self {
        Self { name, rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn note_rules() -> DocumentRules {
        DocumentRules::new()
            .field(
                DocField::text("title")
                    .required("Note title is required")
                    .min_chars(3, "Title must be at least 3 characters"),
            )
            .field(
                DocField::number("score")
                    .required("Score is required")
                    .min_number(1.0, "Score must be positive"),
            )
            .field(DocField::boolean("pinned"))
    }

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn valid_document_yields_empty_map() {
        let failures = note_rules().check(&doc(json!({
            "title": "groceries",
            "score": 4,
            "pinned": true
        })));
        assert!(failures.is_empty());
    }

    #[test]
    fn missing_required_field_reports_its_message() {
        let failures = note_rules().check(&doc(json!({"score": 4})));
        assert_eq!(
            failures.get("title").map(String::as_str),
            Some("Note title is required")
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let failures = note_rules().check(&doc(json!({"title": null, "score": 4})));
        assert_eq!(
            failures.get("title").map(String::as_str),
            Some("Note title is required")
        );
    }

    #[test]
    fn wrong_kind_reports_cast_failure() {
        let failures = note_rules().check(&doc(json!({"title": "ok note", "score": "four"})));
        assert_eq!(
            failures.get("score").map(String::as_str),
            Some("Cast to number failed for path 'score'")
        );
    }

    #[test]
    fn range_rules_use_their_declared_messages() {
        let failures = note_rules().check(&doc(json!({"title": "ab", "score": 0})));
        assert_eq!(
            failures.get("title").map(String::as_str),
            Some("Title must be at least 3 characters")
        );
        assert_eq!(
            failures.get("score").map(String::as_str),
            Some("Score must be positive")
        );
    }

    #[test]
    fn one_failure_per_field() {
        // "ab" violates min_chars, but a cast failure would also apply if the
        // kind were wrong; only the first applicable rule reports.
        let failures = note_rules().check(&doc(json!({"title": 12, "score": 0})));
        assert_eq!(failures.len(), 2);
        assert_eq!(
            failures.get("title").map(String::as_str),
            Some("Cast to text failed for path 'title'")
        );
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let failures = note_rules().check(&doc(json!({"title": "groceries", "score": 2})));
        assert!(failures.is_empty());
    }

    #[test]
    fn length_rule_applies_when_numeric_rule_is_also_declared() {
        // A numeric bound on a text field never trips, but it must not keep
        // the length rule from running.
        let rules = DocumentRules::new().field(
            DocField::text("code")
                .min_number(1.0, "Code must be positive")
                .min_chars(4, "Code must be at least 4 characters"),
        );
        let failures = rules.check(&doc(json!({"code": "ab"})));
        assert_eq!(failures.len(), 1);
        assert_eq!(
            failures.get("code").map(String::as_str),
            Some("Code must be at least 4 characters")
        );
    }
}
