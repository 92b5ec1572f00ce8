use dto_model::DecodeDto;

#[derive(DecodeDto)]
struct Model {
    #[dto(key = "")]
    receiver: i64,
}

fn main() {}
