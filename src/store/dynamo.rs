//! DynamoDB record store backend.
//!
//! One table per resource type, string partition key `id`. Documents cross
//! the wire as JSON; numbers are carried in DynamoDB's `N` string form so
//! fractional values survive the round trip without drift. Scans walk
//! `LastEvaluatedKey` pages transparently and return the full logical
//! result. Partial updates arrive as a structured field list and are turned
//! into an update expression here, not by callers.

use std::collections::HashMap;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::{Number, Value};

use super::{Document, FieldFilter, StoreError, StoreOp};
use crate::patch::FieldPatch;

/// Record store backed by a single DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    pub async fn get(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let out = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                StoreError::new(
                    StoreOp::Get,
                    Some(id.to_string()),
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        match out.item() {
            Some(item) => {
                let doc = item_to_document(item)
                    .map_err(|m| StoreError::new(StoreOp::Get, Some(id.to_string()), m))?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    pub async fn put(&self, doc: &Document) -> Result<(), StoreError> {
        let key = doc.get("id").and_then(Value::as_str).map(str::to_string);
        let item =
            document_to_item(doc).map_err(|m| StoreError::new(StoreOp::Put, key.clone(), m))?;

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                StoreError::new(StoreOp::Put, key, DisplayErrorContext(&e).to_string())
            })?;
        Ok(())
    }

    /// Replaces the named fields and returns the merged item (`ALL_NEW`).
    ///
    /// `patch` must be non-empty; DynamoDB rejects an empty SET clause.
    pub async fn update(&self, id: &str, patch: &FieldPatch) -> Result<Document, StoreError> {
        let (expression, names, values) = build_update_expression(patch)
            .map_err(|m| StoreError::new(StoreOp::Update, Some(id.to_string()), m))?;

        let out = self
            .client
            .update_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .update_expression(expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| {
                StoreError::new(
                    StoreOp::Update,
                    Some(id.to_string()),
                    DisplayErrorContext(&e).to_string(),
                )
            })?;

        let item = out.attributes().ok_or_else(|| {
            StoreError::new(
                StoreOp::Update,
                Some(id.to_string()),
                "no attributes returned",
            )
        })?;
        item_to_document(item)
            .map_err(|m| StoreError::new(StoreOp::Update, Some(id.to_string()), m))
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| {
                StoreError::new(
                    StoreOp::Delete,
                    Some(id.to_string()),
                    DisplayErrorContext(&e).to_string(),
                )
            })?;
        Ok(())
    }

    pub async fn scan(&self, filter: Option<&FieldFilter>) -> Result<Vec<Document>, StoreError> {
        walk_scan(|start_key| {
            let mut req = self.client.scan().table_name(&self.table);
            if let Some(f) = filter {
                req = req
                    .filter_expression("#f = :v")
                    .expression_attribute_names("#f", &f.field)
                    .expression_attribute_values(":v", AttributeValue::S(f.value.clone()));
            }
            req = req.set_exclusive_start_key(start_key);

            async move {
                let out = req.send().await.map_err(|e| {
                    StoreError::new(StoreOp::Scan, None, DisplayErrorContext(&e).to_string())
                })?;
                Ok(ScanPage {
                    items: out.items().to_vec(),
                    last_evaluated_key: out.last_evaluated_key().cloned(),
                })
            }
        })
        .await
    }
}

/// One page of scan output: its items plus the paging cursor, if any.
struct ScanPage {
    items: Vec<HashMap<String, AttributeValue>>,
    last_evaluated_key: Option<HashMap<String, AttributeValue>>,
}

/// Walks a paged scan to completion, feeding each page's
/// `LastEvaluatedKey` back as the next request's start key, and returns
/// the concatenated logical result. An absent or empty cursor ends the
/// walk.
async fn walk_scan<F, Fut>(mut fetch: F) -> Result<Vec<Document>, StoreError>
where
    F: FnMut(Option<HashMap<String, AttributeValue>>) -> Fut,
    Fut: std::future::Future<Output = Result<ScanPage, StoreError>>,
{
    let mut docs = Vec::new();
    let mut start_key: Option<HashMap<String, AttributeValue>> = None;

    loop {
        let page = fetch(start_key.take()).await?;
        for item in &page.items {
            docs.push(item_to_document(item).map_err(|m| StoreError::new(StoreOp::Scan, None, m))?);
        }

        match page.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    Ok(docs)
}

/// Builds a `SET` update expression with placeholder names and values from
/// a field patch.
fn build_update_expression(
    patch: &FieldPatch,
) -> Result<(String, HashMap<String, String>, HashMap<String, AttributeValue>), String> {
    if patch.is_empty() {
        return Err("empty field patch".to_string());
    }

    let mut clauses = Vec::new();
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    for (i, (field, value)) in patch.fields().iter().enumerate() {
        let name = format!("#f{}", i);
        let placeholder = format!(":v{}", i);
        clauses.push(format!("{} = {}", name, placeholder));
        names.insert(name, field.clone());
        values.insert(placeholder, to_attr(value)?);
    }

    Ok((format!("SET {}", clauses.join(", ")), names, values))
}

fn document_to_item(doc: &Document) -> Result<HashMap<String, AttributeValue>, String> {
    doc.iter()
        .map(|(k, v)| Ok((k.clone(), to_attr(v)?)))
        .collect()
}

fn item_to_document(item: &HashMap<String, AttributeValue>) -> Result<Document, String> {
    item.iter()
        .map(|(k, v)| Ok((k.clone(), from_attr(v)?)))
        .collect()
}

fn to_attr(value: &Value) -> Result<AttributeValue, String> {
    Ok(match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        // serde_json renders the shortest representation that parses back
        // to the same number, so the N string is lossless.
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => {
            AttributeValue::L(items.iter().map(to_attr).collect::<Result<_, _>>()?)
        }
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), to_attr(v)?)))
                .collect::<Result<_, String>>()?,
        ),
    })
}

fn from_attr(attr: &AttributeValue) -> Result<Value, String> {
    Ok(match attr {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::L(items) => {
            Value::Array(items.iter().map(from_attr).collect::<Result<_, _>>()?)
        }
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), from_attr(v)?)))
                .collect::<Result<_, String>>()?,
        ),
        AttributeValue::Ss(items) => {
            Value::Array(items.iter().cloned().map(Value::String).collect())
        }
        other => return Err(format!("unsupported attribute value: {:?}", other)),
    })
}

fn parse_number(s: &str) -> Result<Number, String> {
    if !s.contains(['.', 'e', 'E']) {
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Number::from(i));
        }
        if let Ok(u) = s.parse::<u64>() {
            return Ok(Number::from(u));
        }
    }
    let f: f64 = s
        .parse()
        .map_err(|_| format!("invalid number attribute: {}", s))?;
    Number::from_f64(f).ok_or_else(|| format!("non-finite number attribute: {}", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attr_roundtrip_scalars() {
        for value in [
            json!("text"),
            json!(true),
            json!(42),
            json!(-7),
            json!(0),
            Value::Null,
        ] {
            let attr = to_attr(&value).unwrap();
            assert_eq!(from_attr(&attr).unwrap(), value);
        }
    }

    #[test]
    fn test_attr_roundtrip_floats_exactly() {
        for value in [json!(12.49), json!(0.1), json!(1e-10), json!(-3.5)] {
            let attr = to_attr(&value).unwrap();
            assert_eq!(from_attr(&attr).unwrap(), value);
        }
    }

    #[test]
    fn test_attr_roundtrip_nested() {
        let value = json!({
            "specs": {"cpu": "8 vCPU", "ram": "32GB"},
            "tags": ["web", "api"],
            "records": [{"id": "dns-1", "ttl": 300}],
        });
        let attr = to_attr(&value).unwrap();
        assert_eq!(from_attr(&attr).unwrap(), value);
    }

    #[test]
    fn test_numbers_ride_as_n_strings() {
        assert_eq!(
            to_attr(&json!(12.49)).unwrap(),
            AttributeValue::N("12.49".to_string())
        );
        assert_eq!(
            to_attr(&json!(300)).unwrap(),
            AttributeValue::N("300".to_string())
        );
    }

    #[test]
    fn test_string_set_reads_as_array() {
        let attr = AttributeValue::Ss(vec!["a".into(), "b".into()]);
        assert_eq!(from_attr(&attr).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_binary_attribute_rejected() {
        let attr = AttributeValue::B(aws_sdk_dynamodb::primitives::Blob::new(vec![1u8]));
        assert!(from_attr(&attr).is_err());
    }

    #[test]
    fn test_build_update_expression() {
        let update = serde_json::Map::from_iter([
            ("status".to_string(), json!("offline")),
            ("ttl".to_string(), json!(600)),
        ]);
        let patch = FieldPatch::from_update(&update).unwrap();

        let (expr, names, values) = build_update_expression(&patch).unwrap();
        assert_eq!(expr, "SET #f0 = :v0, #f1 = :v1");
        assert_eq!(names["#f0"], "status");
        assert_eq!(names["#f1"], "ttl");
        assert_eq!(values[":v0"], AttributeValue::S("offline".to_string()));
        assert_eq!(values[":v1"], AttributeValue::N("600".to_string()));
    }

    #[test]
    fn test_empty_patch_rejected() {
        assert!(build_update_expression(&FieldPatch::default()).is_err());
    }

    fn scan_key(id: &str) -> HashMap<String, AttributeValue> {
        HashMap::from([("id".to_string(), AttributeValue::S(id.to_string()))])
    }

    fn scan_page(ids: &[&str], cursor: Option<&str>) -> ScanPage {
        ScanPage {
            items: ids.iter().map(|id| scan_key(id)).collect(),
            last_evaluated_key: cursor.map(scan_key),
        }
    }

    #[tokio::test]
    async fn test_scan_walks_every_page_into_one_result() {
        let mut pages = vec![
            scan_page(&["srv-1", "srv-2"], Some("srv-2")),
            scan_page(&["srv-3"], Some("srv-3")),
            scan_page(&["srv-4"], None),
        ]
        .into_iter();
        let mut cursors = Vec::new();

        let docs = walk_scan(|start_key| {
            cursors.push(start_key);
            let page = pages.next().expect("requested a page past the last cursor");
            async move { Ok(page) }
        })
        .await
        .unwrap();

        let ids: Vec<_> = docs
            .iter()
            .map(|doc| doc.get("id").and_then(Value::as_str).unwrap())
            .collect();
        assert_eq!(ids, ["srv-1", "srv-2", "srv-3", "srv-4"]);

        // Each page's cursor is fed back verbatim as the next start key.
        assert_eq!(
            cursors,
            vec![None, Some(scan_key("srv-2")), Some(scan_key("srv-3"))]
        );
    }

    #[tokio::test]
    async fn test_scan_stops_on_empty_paging_cursor() {
        let mut pages = vec![ScanPage {
            items: vec![scan_key("srv-1")],
            last_evaluated_key: Some(HashMap::new()),
        }]
        .into_iter();

        let docs = walk_scan(|_| {
            let page = pages.next().expect("an empty cursor must end the walk");
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(docs.len(), 1);
        assert!(pages.next().is_none());
    }

    #[tokio::test]
    async fn test_scan_surfaces_a_mid_walk_failure() {
        let mut calls = 0;

        let err = walk_scan(|_| {
            calls += 1;
            let result = if calls == 1 {
                Ok(scan_page(&["srv-1"], Some("srv-1")))
            } else {
                Err(StoreError::new(StoreOp::Scan, None, "throttled"))
            };
            async move { result }
        })
        .await
        .unwrap_err();

        assert_eq!(calls, 2);
        assert!(err.to_string().contains("throttled"));
    }
}
