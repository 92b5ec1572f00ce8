use chrono::{DateTime, Utc};
use dto_model::{
    ConvertToDomainModel, ConvertToDtoModel, DecodeDto, EncodeDto, Reflect, ToDomainModel,
    ToDtoModel, batch, json,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

// Decoding with field names as document keys.
#[derive(Debug, DecodeDto)]
struct TestDto {
    test: String,
}

// A field read from a differently named document key.
#[derive(Debug, DecodeDto)]
struct Model {
    #[dto(key = "receiver_id")]
    receiver: i64,
}

// Wire model converted into the domain model. Both sides must declare the
// same field names with the same types.
#[derive(Debug, Clone, DecodeDto, Reflect, ConvertToDomainModel)]
#[dto(rename_all = "camelCase")]
#[domain_model(DomainModel)]
struct ResponseModel {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Reflect, ConvertToDtoModel)]
#[dto_model(RequestModel)]
struct DomainModel {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Reflect, EncodeDto)]
#[dto(rename_all = "camelCase")]
struct RequestModel {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let test: TestDto = json::decode_str(r#"{"test": "hello"}"#)?;
    info!(?test, "decoded");

    let model: Model = json::decode_str(r#"{"receiver_id": 42}"#)?;
    info!(?model, "decoded with remapped key");

    let response: ResponseModel =
        json::decode_str(r#"{"id": 1, "name": "sd", "createdAt": "2024-05-01T10:00:00Z"}"#)?;
    let domain = response.to_domain_model();
    println!("{domain:?}");

    let request = domain.to_dto_model();
    println!("{}", json::to_pretty_string(&request.into())?);

    let page = json::from_str(
        r#"[{"receiver_id": 1}, {"receiver_id": "oops"}, {"receiver_id": 3}]"#,
    )?;
    let models: Vec<Model> = batch::decode_array_lossy(&page)?;
    info!(count = models.len(), "decoded page, malformed records skipped");
    Ok(())
}
