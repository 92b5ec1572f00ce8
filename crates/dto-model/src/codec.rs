//! Ready-made codecs for `#[dto(with = ...)]`.
//!
//! A codec is any module exposing
//! `fn decode(&Document) -> anyhow::Result<T>` and `fn encode(&T) -> Document`.

/// `Vec<u8>` carried as binary, or as a standard base64 string (the usual JSON form).
pub mod base64 {
    use ::base64::prelude::*;

    use crate::{DecodeError, Document, ValueKind};

    pub fn decode(document: &Document) -> anyhow::Result<Vec<u8>> {
        match document {
            Document::Binary(bytes) => Ok(bytes.clone()),
            Document::String(text) => Ok(BASE64_STANDARD.decode(text.as_bytes())?),
            other => Err(DecodeError::type_mismatch(ValueKind::Binary, other).into()),
        }
    }

    pub fn encode(bytes: &[u8]) -> Document {
        Document::Binary(bytes.to_vec())
    }
}

/// `DateTime<Utc>` carried as seconds since the Unix epoch.
pub mod unix_timestamp {
    use chrono::{DateTime, Utc};

    use crate::{DecodeError, Document, ValueKind};

    pub fn decode(document: &Document) -> anyhow::Result<DateTime<Utc>> {
        match document {
            Document::Date(date) => Ok(*date),
            Document::Integer(secs) => DateTime::from_timestamp(*secs, 0)
                .ok_or_else(|| DecodeError::out_of_range(secs, "timestamp").into()),
            Document::Real(secs) if secs.is_finite() => {
                let whole = secs.floor();
                let nanos = ((secs - whole) * 1e9).round() as u32;
                DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
                    .ok_or_else(|| DecodeError::out_of_range(secs, "timestamp").into())
            }
            other => Err(DecodeError::type_mismatch(ValueKind::Integer, other).into()),
        }
    }

    pub fn encode(date: &DateTime<Utc>) -> Document {
        Document::Integer(date.timestamp())
    }
}
