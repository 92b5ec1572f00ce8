use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::{DecodeError, Document, ValueKind};

/// Construct a value from a [`Document`], coercing where the document's type differs.
///
/// Implemented for scalars, strings, dates, UUIDs, URLs and the common
/// containers; `#[derive(DecodeDto)]` implements it for structs.
pub trait Decode: Sized {
    fn decode(document: &Document) -> Result<Self, DecodeError>;
}

macro_rules! impl_decode_int {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode(document: &Document) -> Result<Self, DecodeError> {
                    match document {
                        Document::Integer(value) => <$t>::try_from(*value)
                            .map_err(|_| DecodeError::out_of_range(value, stringify!($t))),
                        // `as i128` is exact for every integral f64 inside the i128 range
                        // and saturates outside it, which no target type can hold either.
                        Document::Real(value) if value.is_finite() && value.fract() == 0.0 => {
                            <$t>::try_from(*value as i128)
                                .map_err(|_| DecodeError::out_of_range(value, stringify!($t)))
                        }
                        Document::Boolean(value) => Ok(if *value { 1 } else { 0 }),
                        Document::String(value) => value
                            .trim()
                            .parse::<$t>()
                            .map_err(|_| DecodeError::type_mismatch(ValueKind::Integer, document)),
                        _ => Err(DecodeError::type_mismatch(ValueKind::Integer, document)),
                    }
                }
            }
        )*
    };
}

impl_decode_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

macro_rules! impl_decode_real {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode(document: &Document) -> Result<Self, DecodeError> {
                    match document {
                        Document::Real(value) => Ok(*value as $t),
                        Document::Integer(value) => Ok(*value as $t),
                        Document::Boolean(value) => Ok(if *value { 1.0 } else { 0.0 }),
                        Document::String(value) => value
                            .trim()
                            .parse::<$t>()
                            .map_err(|_| DecodeError::type_mismatch(ValueKind::Real, document)),
                        _ => Err(DecodeError::type_mismatch(ValueKind::Real, document)),
                    }
                }
            }
        )*
    };
}

impl_decode_real!(f32, f64);

impl Decode for bool {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        document
            .as_boolean()
            .copied()
            .ok_or_else(|| DecodeError::type_mismatch(ValueKind::Boolean, document))
    }
}

impl Decode for String {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        document
            .as_string()
            .cloned()
            .ok_or_else(|| DecodeError::type_mismatch(ValueKind::String, document))
    }
}

impl Decode for DateTime<Utc> {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        match document {
            Document::Date(value) => Ok(*value),
            Document::String(value) => DateTime::parse_from_rfc3339(value)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|_| DecodeError::type_mismatch(ValueKind::Date, document)),
            _ => Err(DecodeError::type_mismatch(ValueKind::Date, document)),
        }
    }
}

impl Decode for Uuid {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        match document {
            Document::Uuid(value) => Ok(*value),
            Document::String(value) => Uuid::parse_str(value)
                .map_err(|_| DecodeError::type_mismatch(ValueKind::Uuid, document)),
            _ => Err(DecodeError::type_mismatch(ValueKind::Uuid, document)),
        }
    }
}

impl Decode for Url {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        match document {
            Document::Uri(value) => Ok(value.clone()),
            Document::String(value) => {
                Url::parse(value).map_err(|_| DecodeError::type_mismatch(ValueKind::Uri, document))
            }
            _ => Err(DecodeError::type_mismatch(ValueKind::Uri, document)),
        }
    }
}

impl Decode for Document {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        Ok(document.clone())
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        match document {
            Document::Null => Ok(None),
            other => T::decode(other).map(Some),
        }
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        T::decode(document).map(Box::new)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        match document {
            Document::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::decode(item).map_err(|e| e.at_index(i)))
                .collect(),
            // binary payloads decode element-wise so `Vec<u8>` fields accept them
            Document::Binary(bytes) => bytes
                .iter()
                .enumerate()
                .map(|(i, b)| T::decode(&Document::Integer(i64::from(*b))).map_err(|e| e.at_index(i)))
                .collect(),
            _ => Err(DecodeError::type_mismatch(ValueKind::Array, document)),
        }
    }
}

impl<V: Decode> Decode for HashMap<String, V> {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        let map = document
            .as_map()
            .ok_or_else(|| DecodeError::type_mismatch(ValueKind::Map, document))?;
        map.iter()
            .map(|(k, v)| Ok((k.clone(), V::decode(v).map_err(|e| e.at(k))?)))
            .collect()
    }
}

impl<V: Decode> Decode for BTreeMap<String, V> {
    fn decode(document: &Document) -> Result<Self, DecodeError> {
        let map = document
            .as_map()
            .ok_or_else(|| DecodeError::type_mismatch(ValueKind::Map, document))?;
        map.iter()
            .map(|(k, v)| Ok((k.clone(), V::decode(v).map_err(|e| e.at(k))?)))
            .collect()
    }
}
