use dto_model::DecodeDto;

#[derive(DecodeDto)]
struct Model {
    id: i64,
    #[dto(key = "id")]
    legacy_id: i64,
}

fn main() {}
