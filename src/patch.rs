//! Partial-update merge semantics.
//!
//! A [`FieldPatch`] is the structured form of a partial update: the set of
//! fields to replace wholesale on a stored record. Absent fields are left
//! untouched. There is no way to distinguish "set to null" from "never
//! supplied": an omitted field simply does not appear in the patch, which
//! matches the wire contract of the update endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::store::Document;

/// An ordered list of field-level replacements.
///
/// The store adapters consume this directly: the in-memory backend merges
/// it into the stored document, the DynamoDB backend turns it into an
/// update expression. `id` is never a legal update target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldPatch {
    fields: Vec<(String, Value)>,
}

impl FieldPatch {
    /// Builds a patch from a typed partial update.
    ///
    /// Only fields the caller actually supplied survive serialization
    /// (`None` fields are skipped), and `id` is dropped if present.
    pub fn from_update<T: Serialize>(update: &T) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(update)?;
        let mut fields = Vec::new();
        if let Value::Object(map) = value {
            for (name, value) in map {
                if name == "id" {
                    continue;
                }
                fields.push((name, value));
            }
        }
        Ok(Self { fields })
    }

    /// A patch replacing a single field.
    pub fn single(field: impl Into<String>, value: Value) -> Self {
        Self {
            fields: vec![(field.into(), value)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Applies the patch to a document, replacing each named field
    /// wholesale. Fields not named in the patch are untouched.
    pub fn apply(&self, doc: &mut Document) {
        for (name, value) in &self.fields {
            doc.insert(name.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize, Default)]
    struct TestPatch {
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<i64>,
    }

    fn doc(value: serde_json::Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let patch = FieldPatch::from_update(&TestPatch {
            name: Some("new".into()),
            count: None,
        })
        .unwrap();

        assert_eq!(patch.fields().len(), 1);
        assert_eq!(patch.fields()[0].0, "name");
    }

    #[test]
    fn test_apply_changes_only_named_fields() {
        let mut record = doc(json!({"id": "x-1", "name": "old", "count": 3, "extra": true}));
        let patch = FieldPatch::from_update(&TestPatch {
            name: Some("new".into()),
            count: None,
        })
        .unwrap();

        patch.apply(&mut record);

        assert_eq!(record["name"], json!("new"));
        assert_eq!(record["count"], json!(3));
        assert_eq!(record["extra"], json!(true));
        assert_eq!(record["id"], json!("x-1"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let original = doc(json!({"id": "x-1", "name": "old", "count": 3}));
        let patch = FieldPatch::from_update(&TestPatch {
            name: Some("new".into()),
            count: Some(9),
        })
        .unwrap();

        let mut once = original.clone();
        patch.apply(&mut once);
        let mut twice = once.clone();
        patch.apply(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let original = doc(json!({"id": "x-1", "name": "old"}));
        let patch = FieldPatch::from_update(&TestPatch::default()).unwrap();
        assert!(patch.is_empty());

        let mut record = original.clone();
        patch.apply(&mut record);
        assert_eq!(record, original);
    }

    #[test]
    fn test_id_is_never_an_update_target() {
        #[derive(Serialize)]
        struct Sneaky {
            id: String,
            name: String,
        }

        let patch = FieldPatch::from_update(&Sneaky {
            id: "x-2".into(),
            name: "new".into(),
        })
        .unwrap();

        let mut record = doc(json!({"id": "x-1", "name": "old"}));
        patch.apply(&mut record);

        assert_eq!(record["id"], json!("x-1"));
        assert_eq!(record["name"], json!("new"));
    }

    #[test]
    fn test_nested_values_replace_wholesale() {
        let mut record = doc(json!({"id": "x-1", "specs": {"cpu": "4", "ram": "8GB"}}));
        let patch = FieldPatch::single("specs", json!({"cpu": "8"}));

        patch.apply(&mut record);

        // No deep merge: the old "ram" key is gone.
        assert_eq!(record["specs"], json!({"cpu": "8"}));
    }
}
