#![cfg(feature = "derive")]
use dto_model::{DecodeDto, DecodeError, Document, Reflect, ValueKind};

#[derive(Debug, PartialEq, DecodeDto, Reflect)]
struct TestDto {
    test: String,
}

#[derive(Debug, PartialEq, DecodeDto, Reflect)]
struct Model {
    #[dto(key = "receiver_id")]
    receiver: i64,
}

#[derive(Debug, PartialEq, DecodeDto)]
struct Record {
    id: i64,
}

#[test]
fn field_name_is_the_default_key() {
    let doc = Document::map().insert("test", "hello").unwrap();
    assert_eq!(
        doc.decode::<TestDto>(),
        Ok(TestDto {
            test: "hello".into()
        })
    );
    assert_eq!(TestDto::descriptor().fields()[0].external_key(), "test");
}

#[test]
fn remapped_key_is_used_instead_of_the_name() {
    let doc = Document::map().insert("receiver_id", 42).unwrap();
    assert_eq!(doc.decode::<Model>(), Ok(Model { receiver: 42 }));

    let by_name = Document::map().insert("receiver", 42).unwrap();
    assert_eq!(
        by_name.decode::<Model>(),
        Err(DecodeError::MissingKey("receiver_id".into()))
    );
}

#[test]
fn descriptor_records_the_override() {
    let desc = Model::descriptor();
    assert_eq!(desc.type_name(), "Model");
    let field = &desc.fields()[0];
    assert_eq!(field.name(), "receiver");
    assert_eq!(field.external_key(), "receiver_id");
    assert_eq!(field.declared_type().as_str(), "i64");
}

#[test]
fn empty_document_reports_missing_key() {
    assert_eq!(
        Document::map().decode::<Record>(),
        Err(DecodeError::MissingKey("id".into()))
    );
}

#[test]
fn unparseable_value_reports_type_mismatch() {
    let doc = Document::map().insert("id", "not-a-number").unwrap();
    assert_eq!(
        doc.decode::<Record>(),
        Err(DecodeError::TypeMismatch {
            key: "id".into(),
            expected: ValueKind::Integer,
            found: ValueKind::String,
        })
    );
}

#[test]
fn numeric_strings_are_coerced() {
    let doc = Document::map().insert("id", "17").unwrap();
    assert_eq!(doc.decode::<Record>(), Ok(Record { id: 17 }));
}

#[test]
fn extra_keys_are_ignored_by_default() {
    let doc = Document::map()
        .insert("id", 1)
        .unwrap()
        .insert("other", true)
        .unwrap();
    assert_eq!(doc.decode::<Record>(), Ok(Record { id: 1 }));
}

#[derive(Debug, PartialEq, DecodeDto, Reflect)]
struct Account {
    #[dto(key = "id")]
    account_id: i64,
    #[dto(skip)]
    id: i64,
}

#[test]
fn skipped_field_may_share_a_name_with_a_key() {
    let doc = Document::map().insert("id", 5).unwrap();
    assert_eq!(
        doc.decode::<Account>(),
        Ok(Account {
            account_id: 5,
            id: 0
        })
    );
    assert!(dto_model::ConversionPair::of::<Account, Account>().is_ok());
}

#[derive(Debug, PartialEq, DecodeDto)]
struct Batch {
    records: Vec<Record>,
}

#[test]
fn array_element_failures_name_the_index() {
    let doc = Document::map()
        .insert(
            "records",
            vec![
                Document::map().insert("id", 1).unwrap(),
                Document::map(),
            ],
        )
        .unwrap();
    assert_eq!(
        doc.decode::<Batch>(),
        Err(DecodeError::MissingKey("records[1].id".into()))
    );
}

#[test]
fn malformed_records_can_be_skipped() {
    let docs = vec![
        Document::map().insert("id", 1).unwrap(),
        Document::map().insert("id", "x").unwrap(),
        Document::map().insert("id", 3).unwrap(),
    ];
    let records: Vec<Record> = dto_model::batch::decode_lossy(&docs);
    assert_eq!(records, vec![Record { id: 1 }, Record { id: 3 }]);
}

#[cfg(feature = "json")]
#[test]
fn decodes_straight_from_json() {
    let model: Model = dto_model::json::decode_str(r#"{"receiver_id": 42}"#).unwrap();
    assert_eq!(model, Model { receiver: 42 });
}
