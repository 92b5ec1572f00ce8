use dto_model::{ConvertToDomainModel, Reflect};

#[derive(Reflect, ConvertToDomainModel)]
#[domain_model(Domain)]
struct Response {
    id: i64,
    name: String,
}

#[derive(Reflect)]
struct Domain {
    id: i64,
}

fn main() {}
