//! The store itself: named collections of documents behind one lock.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::StoreError;
use crate::rules::{CollectionSpec, DocumentRules};

/// A stored document: a flat JSON object.
pub type Document = Map<String, Value>;

/// Keys the store owns; write paths never let a caller set them.
const METADATA_KEYS: [&str; 3] = ["id", "createdAt", "updatedAt"];

struct Collection {
    rules: DocumentRules,
    /// Insertion order is creation order; reads rely on it.
    docs: Vec<Document>,
}

/// Thread-safe in-memory store of named document collections.
///
/// Reads take the lock shared, writes exclusive. Operations are short and
/// never await or perform I/O while holding the lock.
pub struct DocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a collection and its document rules.
    pub fn register(&self, spec: CollectionSpec) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        if collections.contains_key(spec.name) {
            return Err(StoreError::CollectionExists(spec.name.to_string()));
        }
        collections.insert(
            spec.name.to_string(),
            Collection {
                rules: spec.rules,
                docs: Vec::new(),
            },
        );
        Ok(())
    }

    /// Validate and persist `doc`, stamping metadata. Returns the document
    /// as stored.
    pub fn insert(&self, collection: &str, mut doc: Document) -> Result<Document, StoreError> {
        let mut collections = self.collections.write();
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;

        let failures = target.rules.check(&doc);
        if !failures.is_empty() {
            return Err(StoreError::Validation { fields: failures });
        }

        let id = Uuid::now_v7().to_string();
        let now = timestamp();
        doc.insert("id".to_string(), Value::String(id.clone()));
        doc.insert("createdAt".to_string(), Value::String(now.clone()));
        doc.insert("updatedAt".to_string(), Value::String(now));
        target.docs.push(doc.clone());

        tracing::debug!(collection, id = %id, "document inserted");
        Ok(doc)
    }

    /// All documents matching `filter`, in creation order.
    pub fn find<F>(&self, collection: &str, filter: F) -> Result<Vec<Document>, StoreError>
    where
        F: Fn(&Document) -> bool,
    {
        let collections = self.collections.read();
        let target = collections
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
        Ok(target.docs.iter().filter(|doc| filter(doc)).cloned().collect())
    }

    /// Fetch one document by id. A malformed id is a cast failure; a
    /// well-formed id with no document is `Ok(None)`.
    pub fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let id = cast_id(id)?;
        let collections = self.collections.read();
        let target = collections
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;
        Ok(target
            .docs
            .iter()
            .find(|doc| document_id_is(doc, &id))
            .cloned())
    }

    /// Merge `patch` into the document with `id`, re-validate the merged
    /// document, and commit only when it still satisfies the rules.
    ///
    /// Store-owned metadata keys in the patch are ignored. A validation
    /// failure leaves the stored document untouched.
    pub fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let id = cast_id(id)?;
        let mut collections = self.collections.write();
        let target = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;

        let Some(position) = target.docs.iter().position(|doc| document_id_is(doc, &id)) else {
            return Ok(None);
        };

        let mut merged = target.docs[position].clone();
        for (key, value) in patch {
            if METADATA_KEYS.contains(&key.as_str()) {
                continue;
            }
            merged.insert(key, value);
        }

        let failures = target.rules.check(&merged);
        if !failures.is_empty() {
            return Err(StoreError::Validation { fields: failures });
        }

        merged.insert("updatedAt".to_string(), Value::String(timestamp()));
        target.docs[position] = merged.clone();

        tracing::debug!(collection, id = %id, "document updated");
        Ok(Some(merged))
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonicalize a raw identifier, rejecting anything that is not a UUID.
fn cast_id(raw: &str) -> Result<String, StoreError> {
    Uuid::parse_str(raw)
        .map(|id| id.to_string())
        .map_err(|_| StoreError::InvalidId(raw.to_string()))
}

fn document_id_is(doc: &Document, id: &str) -> bool {
    doc.get("id").and_then(Value::as_str) == Some(id)
}

fn timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339).unwrap_or_else(|_| now.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::DocField;
    use serde_json::json;

    fn store_with_notes() -> DocumentStore {
        let store = DocumentStore::new();
        let rules = DocumentRules::new()
            .field(
                DocField::text("title")
                    .required("Note title is required")
                    .min_chars(3, "Title must be at least 3 characters"),
            )
            .field(DocField::number("score").required("Score is required"))
            .field(DocField::boolean("archived"));
        store
            .register(CollectionSpec::new("notes", rules))
            .expect("collection registers");
        store
    }

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn insert_stamps_id_and_timestamps() {
        let store = store_with_notes();
        let saved = store
            .insert("notes", doc(json!({"title": "groceries", "score": 4})))
            .expect("document inserts");

        let id = saved.get("id").and_then(Value::as_str).expect("id stamped");
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(saved.get("createdAt"), saved.get("updatedAt"));
    }

    #[test]
    fn insert_rejects_documents_violating_rules() {
        let store = store_with_notes();
        let err = store
            .insert("notes", doc(json!({"score": 4})))
            .expect_err("missing title is rejected");

        match err {
            StoreError::Validation { fields } => {
                assert_eq!(
                    fields.get("title").map(String::as_str),
                    Some("Note title is required")
                );
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn find_preserves_creation_order() {
        let store = store_with_notes();
        for title in ["first note", "second note", "third note"] {
            store
                .insert("notes", doc(json!({"title": title, "score": 1})))
                .expect("document inserts");
        }

        let titles: Vec<String> = store
            .find("notes", |_| true)
            .expect("find succeeds")
            .iter()
            .filter_map(|d| d.get("title").and_then(Value::as_str).map(String::from))
            .collect();
        assert_eq!(titles, vec!["first note", "second note", "third note"]);
    }

    #[test]
    fn find_applies_the_filter() {
        let store = store_with_notes();
        store
            .insert("notes", doc(json!({"title": "keep me", "score": 1})))
            .expect("document inserts");
        store
            .insert(
                "notes",
                doc(json!({"title": "hide me", "score": 1, "archived": true})),
            )
            .expect("document inserts");

        let visible = store
            .find("notes", |d| {
                !matches!(d.get("archived"), Some(Value::Bool(true)))
            })
            .expect("find succeeds");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].get("title"), Some(&json!("keep me")));
    }

    #[test]
    fn get_returns_the_matching_document() {
        let store = store_with_notes();
        let saved = store
            .insert("notes", doc(json!({"title": "groceries", "score": 4})))
            .expect("document inserts");
        let id = saved.get("id").and_then(Value::as_str).expect("id stamped");

        let fetched = store.get("notes", id).expect("get succeeds");
        assert_eq!(fetched, Some(saved));
    }

    #[test]
    fn get_with_unknown_id_is_none() {
        let store = store_with_notes();
        let absent = Uuid::now_v7().to_string();
        assert_eq!(store.get("notes", &absent).expect("get succeeds"), None);
    }

    #[test]
    fn get_with_malformed_id_is_a_cast_failure() {
        let store = store_with_notes();
        let err = store.get("notes", "not-a-uuid").expect_err("cast fails");
        assert!(matches!(err, StoreError::InvalidId(_)));
        assert_eq!(
            err.to_string(),
            "Cast to DocumentId failed for value 'not-a-uuid'"
        );
    }

    #[test]
    fn update_merges_patch_and_keeps_creation_metadata() {
        let store = store_with_notes();
        let saved = store
            .insert("notes", doc(json!({"title": "groceries", "score": 4})))
            .expect("document inserts");
        let id = saved.get("id").and_then(Value::as_str).expect("id stamped");

        let updated = store
            .update("notes", id, doc(json!({"score": 9})))
            .expect("update succeeds")
            .expect("document exists");

        assert_eq!(updated.get("score"), Some(&json!(9)));
        assert_eq!(updated.get("title"), Some(&json!("groceries")));
        assert_eq!(updated.get("id"), saved.get("id"));
        assert_eq!(updated.get("createdAt"), saved.get("createdAt"));
    }

    #[test]
    fn update_ignores_store_owned_keys_in_the_patch() {
        let store = store_with_notes();
        let saved = store
            .insert("notes", doc(json!({"title": "groceries", "score": 4})))
            .expect("document inserts");
        let id = saved.get("id").and_then(Value::as_str).expect("id stamped");

        let updated = store
            .update("notes", id, doc(json!({"id": "forged", "score": 5})))
            .expect("update succeeds")
            .expect("document exists");
        assert_eq!(updated.get("id"), saved.get("id"));
    }

    #[test]
    fn failed_update_commits_nothing() {
        let store = store_with_notes();
        let saved = store
            .insert("notes", doc(json!({"title": "groceries", "score": 4})))
            .expect("document inserts");
        let id = saved.get("id").and_then(Value::as_str).expect("id stamped");

        let err = store
            .update("notes", id, doc(json!({"title": "ab"})))
            .expect_err("short title is rejected");
        assert!(matches!(err, StoreError::Validation { .. }));

        let fetched = store
            .get("notes", id)
            .expect("get succeeds")
            .expect("document exists");
        assert_eq!(fetched, saved);
    }

    #[test]
    fn update_with_unknown_id_is_none() {
        let store = store_with_notes();
        let absent = Uuid::now_v7().to_string();
        let outcome = store
            .update("notes", &absent, doc(json!({"score": 2})))
            .expect("update succeeds");
        assert_eq!(outcome, None);
    }

    #[test]
    fn unknown_collection_is_an_error() {
        let store = store_with_notes();
        let err = store
            .find("missing", |_| true)
            .expect_err("collection is unknown");
        assert!(matches!(err, StoreError::UnknownCollection(_)));
    }

    #[test]
    fn registering_a_collection_twice_is_an_error() {
        let store = store_with_notes();
        let err = store
            .register(CollectionSpec::new("notes", DocumentRules::new()))
            .expect_err("duplicate registration");
        assert!(matches!(err, StoreError::CollectionExists(_)));
    }
}
