use std::{
    collections::{BTreeMap, HashMap},
    fmt, ops,
};

use chrono::{DateTime, FixedOffset, Utc};
use enum_as_inner::EnumAsInner;
use url::Url;
use uuid::Uuid;

extern crate self as dto_model;

pub mod batch;
pub mod codec;
pub mod convert;
pub mod decode;
pub mod derive;
pub mod descriptor;
pub mod error;
#[cfg(feature = "json")]
pub mod json;

pub use convert::{ConversionPair, ToDomainModel, ToDtoModel};
pub use decode::Decode;
pub use descriptor::{FieldDescriptor, Reflect, StructDescriptor, TypeTag};
pub use error::{DecodeError, DefinitionError, Error};

#[cfg(feature = "derive")]
pub use dto_model_derive::{ConvertToDomainModel, ConvertToDtoModel, DecodeDto, EncodeDto, Reflect};

/// A dynamically-typed key-value document, the input of every generated decoder.
#[derive(Debug, Default, Clone, EnumAsInner, PartialEq)]
pub enum Document {
    #[default]
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Date(DateTime<Utc>),
    Uuid(Uuid),
    Uri(Url),
    Binary(Vec<u8>),
    Array(Vec<Document>),
    Map(HashMap<String, Document>),
}

/// The variant tag of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Real,
    String,
    Date,
    Uuid,
    Uri,
    Binary,
    Array,
    Map,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Real => "real",
            ValueKind::String => "string",
            ValueKind::Date => "date",
            ValueKind::Uuid => "uuid",
            ValueKind::Uri => "uri",
            ValueKind::Binary => "binary",
            ValueKind::Array => "array",
            ValueKind::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Document {
    pub fn new() -> Self {
        Document::Null
    }

    pub fn array() -> Self {
        Document::Array(Vec::new())
    }

    pub fn map() -> Self {
        Document::Map(HashMap::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Document::Null => ValueKind::Null,
            Document::Boolean(_) => ValueKind::Boolean,
            Document::Integer(_) => ValueKind::Integer,
            Document::Real(_) => ValueKind::Real,
            Document::String(_) => ValueKind::String,
            Document::Date(_) => ValueKind::Date,
            Document::Uuid(_) => ValueKind::Uuid,
            Document::Uri(_) => ValueKind::Uri,
            Document::Binary(_) => ValueKind::Binary,
            Document::Array(_) => ValueKind::Array,
            Document::Map(_) => ValueKind::Map,
        }
    }

    pub fn clear(&mut self) {
        *self = Document::Null;
    }

    pub fn push<T: Into<Document>>(mut self, value: T) -> Result<Self, DecodeError> {
        match &mut self {
            Document::Array(array) => array.push(value.into()),
            Document::Null => {
                self = Document::Array(vec![value.into()]);
            }
            other => return Err(DecodeError::type_mismatch(ValueKind::Array, other)),
        }
        Ok(self)
    }

    pub fn insert<K: Into<String>, T: Into<Document>>(
        mut self,
        key: K,
        value: T,
    ) -> Result<Self, DecodeError> {
        match &mut self {
            Document::Map(map) => {
                map.insert(key.into(), value.into());
            }
            Document::Null => {
                let mut map = HashMap::new();
                map.insert(key.into(), value.into());
                self = Document::Map(map);
            }
            other => return Err(DecodeError::type_mismatch(ValueKind::Map, other)),
        }
        Ok(self)
    }

    pub fn get(&self, index: impl Index) -> Option<&Document> {
        index.index_into(self)
    }

    pub fn get_mut(&mut self, index: impl Index) -> Option<&mut Document> {
        index.index_into_mut(self)
    }

    pub fn contains(&self, index: impl Index) -> bool {
        self.get(index).is_some()
    }

    pub fn len(&self) -> usize {
        match self {
            Document::Array(a) => a.len(),
            Document::Map(m) => m.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a value by a JSON-pointer style path (`/a/0/b`).
    pub fn pointer(&self, pointer: &str) -> Option<&Document> {
        if pointer.is_empty() {
            return Some(self);
        }
        if !pointer.starts_with('/') {
            return None;
        }
        pointer
            .split('/')
            .skip(1)
            .map(|x| x.replace("~1", "/").replace("~0", "~"))
            .try_fold(self, |target, token| match target {
                Document::Array(array) => token.parse::<usize>().ok().and_then(|x| array.get(x)),
                Document::Map(map) => map.get(&token),
                _ => None,
            })
    }

    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Document::Null)
    }

    /// Decodes this document into `T`.
    pub fn decode<T: Decode>(&self) -> Result<T, DecodeError> {
        T::decode(self)
    }
}

impl From<bool> for Document {
    fn from(v: bool) -> Self {
        Document::Boolean(v)
    }
}

impl From<&bool> for Document {
    fn from(v: &bool) -> Self {
        Document::Boolean(*v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Document {
                fn from(v: $t) -> Self {
                    Document::Integer(v as i64)
                }
            }
            impl From<&$t> for Document {
                fn from(v: &$t) -> Self {
                    Document::Integer(*v as i64)
                }
            }
        )*
    };
}

impl_from_int!(u8, u16, u32, i8, i16, i32, i64);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Document {
                fn from(v: $t) -> Self {
                    match i64::try_from(v) {
                        Ok(v) => Document::Integer(v),
                        Err(_) => Document::Real(v as f64),
                    }
                }
            }
            impl From<&$t> for Document {
                fn from(v: &$t) -> Self {
                    Document::from(*v)
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

macro_rules! impl_from_real {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Document {
                fn from(v: $t) -> Self {
                    Document::Real(v as f64)
                }
            }
            impl From<&$t> for Document {
                fn from(v: &$t) -> Self {
                    Document::Real(*v as f64)
                }
            }
        )*
    };
}

impl_from_real!(f32, f64);

impl From<&str> for Document {
    fn from(v: &str) -> Self {
        Document::String(v.to_string())
    }
}

impl From<String> for Document {
    fn from(v: String) -> Self {
        Document::String(v)
    }
}

impl From<&String> for Document {
    fn from(v: &String) -> Self {
        Document::String(v.clone())
    }
}

impl From<Uuid> for Document {
    fn from(v: Uuid) -> Self {
        Document::Uuid(v)
    }
}

impl From<&Uuid> for Document {
    fn from(v: &Uuid) -> Self {
        Document::Uuid(*v)
    }
}

impl From<Url> for Document {
    fn from(v: Url) -> Self {
        Document::Uri(v)
    }
}

impl From<&Url> for Document {
    fn from(v: &Url) -> Self {
        Document::Uri(v.clone())
    }
}

impl From<DateTime<Utc>> for Document {
    fn from(v: DateTime<Utc>) -> Self {
        Document::Date(v)
    }
}

impl From<&DateTime<Utc>> for Document {
    fn from(v: &DateTime<Utc>) -> Self {
        Document::Date(*v)
    }
}

impl From<DateTime<FixedOffset>> for Document {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Document::Date(v.with_timezone(&Utc))
    }
}

impl From<&[u8]> for Document {
    fn from(v: &[u8]) -> Self {
        Document::Binary(Vec::from(v))
    }
}

impl<const N: usize> From<[u8; N]> for Document {
    fn from(v: [u8; N]) -> Self {
        Document::Binary(v.to_vec())
    }
}

impl<T: Into<Document>> From<Option<T>> for Document {
    fn from(v: Option<T>) -> Self {
        v.map_or(Document::Null, Into::into)
    }
}

impl<T: Into<Document>> From<Box<T>> for Document {
    fn from(v: Box<T>) -> Self {
        (*v).into()
    }
}

impl<T: Into<Document>> From<Vec<T>> for Document {
    fn from(v: Vec<T>) -> Self {
        Document::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Document>> From<HashMap<K, V>> for Document {
    fn from(v: HashMap<K, V>) -> Self {
        v.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Document>> From<BTreeMap<K, V>> for Document {
    fn from(v: BTreeMap<K, V>) -> Self {
        v.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Document>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

pub trait Index: private::Sealed {
    fn index_into<'v>(&self, v: &'v Document) -> Option<&'v Document>;
    fn index_into_mut<'v>(&self, v: &'v mut Document) -> Option<&'v mut Document>;
    fn index_or_insert<'v>(&self, v: &'v mut Document) -> &'v mut Document;
}

impl<I> ops::Index<I> for Document
where
    I: Index,
{
    type Output = Document;
    fn index(&self, index: I) -> &Document {
        static NULL: Document = Document::Null;
        index.index_into(self).unwrap_or(&NULL)
    }
}

impl<I> ops::IndexMut<I> for Document
where
    I: Index,
{
    fn index_mut(&mut self, index: I) -> &mut Document {
        index.index_or_insert(self)
    }
}

impl Index for usize {
    fn index_into<'v>(&self, v: &'v Document) -> Option<&'v Document> {
        match v {
            Document::Array(vec) => vec.get(*self),
            _ => None,
        }
    }
    fn index_into_mut<'v>(&self, v: &'v mut Document) -> Option<&'v mut Document> {
        match v {
            Document::Array(vec) => vec.get_mut(*self),
            _ => None,
        }
    }
    fn index_or_insert<'v>(&self, v: &'v mut Document) -> &'v mut Document {
        match v {
            Document::Array(vec) => {
                let len = vec.len();
                vec.get_mut(*self).unwrap_or_else(|| {
                    panic!("cannot access index {} of array of length {}", self, len)
                })
            }
            _ => panic!("cannot access index {}", self),
        }
    }
}

impl Index for str {
    fn index_into<'v>(&self, v: &'v Document) -> Option<&'v Document> {
        match v {
            Document::Map(map) => map.get(self),
            _ => None,
        }
    }
    fn index_into_mut<'v>(&self, v: &'v mut Document) -> Option<&'v mut Document> {
        match v {
            Document::Map(map) => map.get_mut(self),
            _ => None,
        }
    }
    fn index_or_insert<'v>(&self, v: &'v mut Document) -> &'v mut Document {
        if let Document::Null = v {
            *v = Document::Map(HashMap::new());
        }
        match v {
            Document::Map(map) => map.entry(self.to_owned()).or_insert(Document::Null),
            _ => panic!("cannot access key {:?}", self),
        }
    }
}

impl<T> Index for &T
where
    T: ?Sized + Index,
{
    fn index_into<'v>(&self, v: &'v Document) -> Option<&'v Document> {
        (**self).index_into(v)
    }
    fn index_into_mut<'v>(&self, v: &'v mut Document) -> Option<&'v mut Document> {
        (**self).index_into_mut(v)
    }
    fn index_or_insert<'v>(&self, v: &'v mut Document) -> &'v mut Document {
        (**self).index_or_insert(v)
    }
}

impl Index for String {
    fn index_into<'v>(&self, v: &'v Document) -> Option<&'v Document> {
        self[..].index_into(v)
    }
    fn index_into_mut<'v>(&self, v: &'v mut Document) -> Option<&'v mut Document> {
        self[..].index_into_mut(v)
    }
    fn index_or_insert<'v>(&self, v: &'v mut Document) -> &'v mut Document {
        self[..].index_or_insert(v)
    }
}

/// Support code for the derive macros. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    use std::collections::HashMap;

    pub use crate::convert::shapes_match;
    pub use crate::descriptor::unchecked_field as field;

    use crate::{Decode, DecodeError, Document, ValueKind};

    pub type Map = HashMap<String, Document>;

    pub fn expect_map(document: &Document) -> Result<&Map, DecodeError> {
        document
            .as_map()
            .ok_or_else(|| DecodeError::type_mismatch(ValueKind::Map, document))
    }

    pub fn required<T: Decode>(map: &Map, key: &str) -> Result<T, DecodeError> {
        let value = map
            .get(key)
            .ok_or_else(|| DecodeError::MissingKey(key.to_string()))?;
        T::decode(value).map_err(|e| e.at(key))
    }

    pub fn optional<T: Decode>(map: &Map, key: &str) -> Result<Option<T>, DecodeError> {
        match map.get(key) {
            None | Some(Document::Null) => Ok(None),
            Some(value) => T::decode(value).map(Some).map_err(|e| e.at(key)),
        }
    }

    pub fn required_with<T>(
        map: &Map,
        key: &str,
        decode: fn(&Document) -> anyhow::Result<T>,
    ) -> Result<T, DecodeError> {
        let value = map
            .get(key)
            .ok_or_else(|| DecodeError::MissingKey(key.to_string()))?;
        decode(value).map_err(|e| DecodeError::from_hook(e).at(key))
    }

    pub fn optional_with<T>(
        map: &Map,
        key: &str,
        decode: fn(&Document) -> anyhow::Result<T>,
    ) -> Result<Option<T>, DecodeError> {
        match map.get(key) {
            None | Some(Document::Null) => Ok(None),
            Some(value) => decode(value)
                .map(Some)
                .map_err(|e| DecodeError::from_hook(e).at(key)),
        }
    }

    pub fn deny_unknown(map: &Map, known: &[&str]) -> Result<(), DecodeError> {
        match map.keys().find(|key| !known.contains(&key.as_str())) {
            Some(key) => Err(DecodeError::UnknownKey(key.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_and_lookup() {
        let doc = Document::map()
            .insert("id", 7u32)
            .unwrap()
            .insert("tags", Document::array().push("a").unwrap().push("b").unwrap())
            .unwrap();
        assert_eq!(doc["id"], Document::Integer(7));
        assert_eq!(doc.pointer("/tags/1"), Some(&Document::String("b".into())));
        assert_eq!(doc["missing"], Document::Null);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn insert_into_scalar_fails() {
        let err = Document::Integer(1).insert("k", 1).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                key: String::new(),
                expected: ValueKind::Map,
                found: ValueKind::Integer,
            }
        );
    }

    #[test]
    fn index_mut_creates_map() {
        let mut doc = Document::Null;
        doc["name"] = "Ada".into();
        assert_eq!(doc.kind(), ValueKind::Map);
        assert_eq!(doc["name"].as_string().map(String::as_str), Some("Ada"));
    }

    #[test]
    fn wide_integers_fall_back_to_real() {
        assert_eq!(Document::from(u64::MAX), Document::Real(u64::MAX as f64));
        assert_eq!(Document::from(5u64), Document::Integer(5));
    }

    #[test]
    fn option_none_is_null() {
        assert_eq!(Document::from(None::<i32>), Document::Null);
        assert_eq!(Document::from(Some(3)), Document::Integer(3));
    }
}
