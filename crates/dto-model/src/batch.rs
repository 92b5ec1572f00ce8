//! Decoding many documents where one bad record must not sink the rest.

use tracing::warn;

use crate::{Decode, DecodeError, Document};

/// Decodes every document independently, yielding one result per input.
pub fn decode_each<'a, T, I>(documents: I) -> impl Iterator<Item = Result<T, DecodeError>> + 'a
where
    T: Decode + 'a,
    I: IntoIterator<Item = &'a Document>,
    I::IntoIter: 'a,
{
    documents.into_iter().map(T::decode)
}

/// Decodes what it can and skips malformed documents, logging each skip.
pub fn decode_lossy<'a, T, I>(documents: I) -> Vec<T>
where
    T: Decode,
    I: IntoIterator<Item = &'a Document>,
{
    documents
        .into_iter()
        .enumerate()
        .filter_map(|(index, document)| match T::decode(document) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(index, %error, "skipping malformed record");
                None
            }
        })
        .collect()
}

/// Decodes a top-level array document, skipping malformed elements.
pub fn decode_array_lossy<T: Decode>(document: &Document) -> Result<Vec<T>, DecodeError> {
    match document {
        Document::Array(items) => Ok(decode_lossy(items)),
        other => Err(DecodeError::type_mismatch(crate::ValueKind::Array, other)),
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    fn records() -> Vec<Document> {
        vec![
            Document::Integer(1),
            Document::String("two".into()),
            Document::Integer(3),
        ]
    }

    #[test]
    fn decode_each_keeps_positions() {
        let docs = records();
        let results: Vec<Result<i64, DecodeError>> = decode_each(&docs).collect();
        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
        assert_eq!(results[2], Ok(3));
    }

    #[test]
    #[traced_test]
    fn lossy_decode_skips_and_logs() {
        let docs = records();
        let values: Vec<i64> = decode_lossy(&docs);
        assert_eq!(values, vec![1, 3]);
        assert!(logs_contain("skipping malformed record"));
        assert!(logs_contain("index=1"));
    }

    #[test]
    fn array_lossy_requires_an_array() {
        assert_eq!(
            decode_array_lossy::<i64>(&Document::Array(records())),
            Ok(vec![1, 3])
        );
        assert!(decode_array_lossy::<i64>(&Document::Null).is_err());
    }
}
