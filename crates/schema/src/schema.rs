//! Schema container and defensive coercion of upstream JSON
//!
//! Schema extraction runs against live databases and returns heterogeneous,
//! occasionally malformed JSON. Coercion therefore never fails on shape
//! problems below the top level: missing arrays become empty sequences,
//! non-string identifiers are stringified, and structured index descriptors
//! are serialized to display text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use scope_core::{DiagramError, DiagramResult};

use crate::collection::Collection;
use crate::field::{Field, FieldType, MAX_SAMPLE_VALUES};
use crate::relationship::{RelationKind, Relationship};

// ============================================================================
// Schema
// ============================================================================

/// A normalized database schema: the diagram's source data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub collections: Vec<Collection>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and coerce a schema from raw JSON text
    pub fn from_json(json: &str) -> DiagramResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Coerce an arbitrary JSON value into a schema.
    ///
    /// Only a non-object top level is an error; everything below is coerced.
    pub fn from_value(value: &Value) -> DiagramResult<Self> {
        let Some(root) = value.as_object() else {
            return Err(DiagramError::schema_format("root must be a JSON object"));
        };

        let collections = root
            .get("collections")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(coerce_collection).collect())
            .unwrap_or_default();

        let relationships = root
            .get("relationships")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(coerce_relationship).collect())
            .unwrap_or_default();

        Ok(Self {
            collections,
            relationships,
        })
    }

    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Relationships paired with their derived edge identifiers
    pub fn edges(&self) -> impl Iterator<Item = (String, &Relationship)> {
        self.relationships
            .iter()
            .enumerate()
            .map(|(idx, rel)| (rel.edge_id(idx), rel))
    }

    /// True when the schema has no collections
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

// ============================================================================
// Coercion Helpers
// ============================================================================

/// Coerce any JSON value into a display string
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_collection(value: &Value) -> Option<Collection> {
    let obj = value.as_object()?;

    let name = obj.get("name").map(coerce_string)?;

    let document_count = obj
        .get("documentCount")
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0) as u64)))
        .unwrap_or(0);

    let fields = obj
        .get("fields")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(coerce_field).collect())
        .unwrap_or_default();

    let indexes = obj
        .get("indexes")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(coerce_string).collect())
        .unwrap_or_default();

    Some(Collection {
        name,
        document_count,
        fields,
        indexes,
    })
}

fn coerce_field(value: &Value) -> Option<Field> {
    let obj = value.as_object()?;

    let name = obj.get("name").map(coerce_string)?;
    let field_type = obj
        .get("type")
        .map(|v| FieldType::parse(&coerce_string(v)))
        .unwrap_or_default();

    let mut sample_values: Vec<Value> = obj
        .get("sampleValues")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    sample_values.truncate(MAX_SAMPLE_VALUES);

    let is_nested = obj
        .get("isNested")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Some(Field {
        name,
        field_type,
        sample_values,
        is_nested,
    })
}

fn coerce_relationship(value: &Value) -> Option<Relationship> {
    let obj = value.as_object()?;

    let from = obj.get("from").map(coerce_string)?;
    let to = obj.get("to").map(coerce_string)?;

    let field = obj.get("field").map(coerce_string).unwrap_or_default();
    let kind = obj
        .get("type")
        .map(|v| RelationKind::parse(&coerce_string(v)))
        .unwrap_or_default();

    Some(Relationship {
        from,
        to,
        field,
        kind,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(Schema::from_value(&json!([1, 2, 3])).is_err());
        assert!(Schema::from_value(&json!("schema")).is_err());
    }

    #[test]
    fn test_missing_arrays_become_empty() {
        let schema = Schema::from_value(&json!({})).unwrap();
        assert!(schema.collections.is_empty());
        assert!(schema.relationships.is_empty());
    }

    #[test]
    fn test_full_schema_coercion() {
        let schema = Schema::from_value(&json!({
            "collections": [
                {
                    "name": "users",
                    "documentCount": 1200,
                    "fields": [
                        {"name": "email", "type": "String", "sampleValues": ["a@b.com"]},
                        {"name": "age", "type": "Number"}
                    ],
                    "indexes": ["email_1", {"key": {"email": 1}, "unique": true}]
                }
            ],
            "relationships": [
                {"from": "orders", "to": "users", "field": "userId", "type": "one-to-many"}
            ]
        }))
        .unwrap();

        let users = schema.collection("users").unwrap();
        assert_eq!(users.document_count, 1200);
        assert_eq!(users.fields[0].field_type, FieldType::String);
        assert_eq!(users.indexes[0], "email_1");
        // Structured index descriptor serialized to display text
        assert!(users.indexes[1].contains("\"unique\":true"));

        assert_eq!(schema.relationships[0].kind, RelationKind::OneToMany);
    }

    #[test]
    fn test_non_string_names_stringified() {
        let schema = Schema::from_value(&json!({
            "collections": [{"name": 42, "fields": [{"name": true, "type": 7}]}]
        }))
        .unwrap();

        assert_eq!(schema.collections[0].name, "42");
        assert_eq!(schema.collections[0].fields[0].name, "true");
        assert_eq!(
            schema.collections[0].fields[0].field_type,
            FieldType::Other("7".to_string())
        );
    }

    #[test]
    fn test_non_array_fields_become_empty() {
        let schema = Schema::from_value(&json!({
            "collections": [{"name": "users", "fields": "oops"}]
        }))
        .unwrap();
        assert!(schema.collections[0].fields.is_empty());
    }

    #[test]
    fn test_sample_values_bounded() {
        let schema = Schema::from_value(&json!({
            "collections": [{
                "name": "users",
                "fields": [{"name": "tag", "type": "String", "sampleValues": [1,2,3,4,5,6,7,8]}]
            }]
        }))
        .unwrap();
        assert_eq!(
            schema.collections[0].fields[0].sample_values.len(),
            MAX_SAMPLE_VALUES
        );
    }

    #[test]
    fn test_non_string_relationship_field_serialized() {
        let schema = Schema::from_value(&json!({
            "relationships": [{"from": "a", "to": "b", "field": {"path": "x"}, "type": "one-to-one"}]
        }))
        .unwrap();
        assert_eq!(schema.relationships[0].field, "{\"path\":\"x\"}");
    }

    #[test]
    fn test_edge_ids_use_source_ordinals() {
        let schema = Schema::from_value(&json!({
            "relationships": [
                {"from": "a", "to": "b", "field": "x"},
                {"from": "a", "to": "b", "field": "y"}
            ]
        }))
        .unwrap();
        let ids: Vec<String> = schema.edges().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["a-b-0", "a-b-1"]);
    }
}
