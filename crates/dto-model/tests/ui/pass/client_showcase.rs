use chrono::{DateTime, Utc};
use dto_model::{
    ConvertToDomainModel, ConvertToDtoModel, DecodeDto, Document, Reflect, ToDomainModel,
};

#[derive(DecodeDto)]
struct TestDto {
    test: String,
}

#[derive(DecodeDto)]
struct Model {
    #[dto(key = "receiver_id")]
    receiver: i64,
}

#[derive(Reflect, ConvertToDomainModel)]
#[domain_model(DomainModel)]
struct ResponseModel {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Reflect, ConvertToDtoModel)]
#[dto_model(RequestModel)]
struct DomainModel {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Reflect)]
struct RequestModel {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

fn main() {
    let doc = Document::map().insert("receiver_id", 42).unwrap();
    let model = doc.decode::<Model>().unwrap();
    assert_eq!(model.receiver, 42);
    let _ = Document::map().decode::<TestDto>();

    let response = ResponseModel {
        id: 1,
        name: "sd".into(),
        created_at: Utc::now(),
    };
    let request: RequestModel = response.to_domain_model().into();
    let _ = (request.id, request.name, request.created_at);
}
