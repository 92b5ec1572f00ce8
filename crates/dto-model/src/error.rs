use thiserror::Error;

use crate::{Document, TypeTag, ValueKind};

/// Failure returned by a generated (or hand-written) [`Decode`](crate::Decode) impl.
///
/// `key` fields hold the path to the offending value, e.g. `items[2].id`.
/// An empty key means the failure is at the document root.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("missing key `{0}`")]
    MissingKey(String),
    #[error("{}expected {expected}, found {found}", key_prefix(.key))]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("{}value {value} is out of range for {target}", key_prefix(.key))]
    OutOfRange {
        key: String,
        value: String,
        target: &'static str,
    },
    #[error("unknown key `{0}`")]
    UnknownKey(String),
    #[error("{}{message}", key_prefix(.key))]
    Custom { key: String, message: String },
}

fn key_prefix(key: &str) -> String {
    if key.is_empty() {
        String::new()
    } else {
        format!("`{key}`: ")
    }
}

fn join_path(head: &str, tail: &str) -> String {
    if tail.is_empty() {
        head.to_string()
    } else if tail.starts_with('[') {
        format!("{head}{tail}")
    } else {
        format!("{head}.{tail}")
    }
}

impl DecodeError {
    pub fn type_mismatch(expected: ValueKind, found: &Document) -> Self {
        DecodeError::TypeMismatch {
            key: String::new(),
            expected,
            found: found.kind(),
        }
    }

    pub fn out_of_range(value: impl ToString, target: &'static str) -> Self {
        DecodeError::OutOfRange {
            key: String::new(),
            value: value.to_string(),
            target,
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        DecodeError::Custom {
            key: String::new(),
            message: message.into(),
        }
    }

    /// Converts an error raised by a `with` codec hook, keeping decode errors intact.
    pub fn from_hook(err: anyhow::Error) -> Self {
        match err.downcast::<DecodeError>() {
            Ok(decode) => decode,
            Err(other) => DecodeError::custom(format!("{other:#}")),
        }
    }

    /// The key path this error refers to.
    pub fn key(&self) -> &str {
        match self {
            DecodeError::MissingKey(key) | DecodeError::UnknownKey(key) => key,
            DecodeError::TypeMismatch { key, .. }
            | DecodeError::OutOfRange { key, .. }
            | DecodeError::Custom { key, .. } => key,
        }
    }

    fn key_mut(&mut self) -> &mut String {
        match self {
            DecodeError::MissingKey(key) | DecodeError::UnknownKey(key) => key,
            DecodeError::TypeMismatch { key, .. }
            | DecodeError::OutOfRange { key, .. }
            | DecodeError::Custom { key, .. } => key,
        }
    }

    /// Prefixes the key path with a map key.
    pub fn at(mut self, key: &str) -> Self {
        let path = self.key_mut();
        *path = join_path(key, path);
        self
    }

    /// Prefixes the key path with an array index.
    pub fn at_index(mut self, index: usize) -> Self {
        let path = self.key_mut();
        *path = join_path(&format!("[{index}]"), path);
        self
    }
}

/// Violation of a declaration-level contract: an invalid key or mismatched conversion shapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("invalid key for field `{field}`: external keys must be non-empty")]
    InvalidKey { field: &'static str },
    #[error("field `{field}` is declared more than once in `{type_name}`")]
    DuplicateField {
        type_name: &'static str,
        field: &'static str,
    },
    #[error("fields `{first}` and `{second}` of `{type_name}` both map to key `{key}`")]
    DuplicateKey {
        type_name: &'static str,
        key: &'static str,
        first: &'static str,
        second: &'static str,
    },
    #[error(
        "shape mismatch between `{source_type}` and `{target_type}`: missing in target {missing_in_target:?}, missing in source {missing_in_source:?}, type conflicts {type_conflicts:?}"
    )]
    ShapeMismatch {
        source_type: &'static str,
        target_type: &'static str,
        missing_in_target: Vec<&'static str>,
        missing_in_source: Vec<&'static str>,
        type_conflicts: Vec<(&'static str, TypeTag, TypeTag)>,
    },
}

/// Errors from the text-format entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[cfg(feature = "json")]
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
