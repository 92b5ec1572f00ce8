//! JSON text in and out of [`Document`], via `serde_json`.
//!
//! JSON has no date, UUID, URI or binary types: those render as RFC 3339,
//! hyphenated, URL and standard base64 strings respectively, and come back as
//! plain strings. The coercing [`Decode`] impls turn them into typed values.

use base64::prelude::*;
use serde_json::{Map, Number, Value};

use crate::{Decode, Document, Error};

pub fn from_str(text: &str) -> Result<Document, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    Ok(Document::from(value))
}

pub fn from_slice(bytes: &[u8]) -> Result<Document, serde_json::Error> {
    let value: Value = serde_json::from_slice(bytes)?;
    Ok(Document::from(value))
}

pub fn to_string(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Value::from(document))
}

pub fn to_pretty_string(document: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Value::from(document))
}

/// Parses JSON text and decodes it into `T`.
pub fn decode_str<T: Decode>(text: &str) -> Result<T, Error> {
    let document = from_str(text)?;
    Ok(T::decode(&document)?)
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Document::Integer(i),
                None => Document::Real(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Document::String(s),
            Value::Array(items) => Document::Array(items.into_iter().map(Document::from).collect()),
            Value::Object(map) => {
                Document::Map(map.into_iter().map(|(k, v)| (k, Document::from(v))).collect())
            }
        }
    }
}

impl From<&Document> for Value {
    fn from(document: &Document) -> Self {
        match document {
            Document::Null => Value::Null,
            Document::Boolean(b) => Value::Bool(*b),
            Document::Integer(i) => Value::Number((*i).into()),
            Document::Real(r) => Number::from_f64(*r).map_or(Value::Null, Value::Number),
            Document::String(s) => Value::String(s.clone()),
            Document::Date(d) => Value::String(d.to_rfc3339()),
            Document::Uuid(u) => Value::String(u.to_string()),
            Document::Uri(u) => Value::String(u.to_string()),
            Document::Binary(b) => Value::String(BASE64_STANDARD.encode(b)),
            Document::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Document::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::from(&document)
    }
}
