use dto_model::{ConvertToDtoModel, Reflect};

#[derive(Reflect, ConvertToDtoModel)]
struct Domain {
    id: i64,
}

fn main() {}
