use dto_model::{DecodeDto, Document, EncodeDto};

#[derive(Debug, PartialEq, DecodeDto, EncodeDto)]
struct Envelope<T>
where
    T: dto_model::Decode + Into<Document>,
{
    #[dto(key = "payload")]
    inner: T,
    #[dto(default)]
    retries: u32,
}

fn main() {
    let doc: Document = Envelope { inner: 5i64, retries: 0 }.into();
    let back: Envelope<i64> = doc.decode().unwrap();
    assert_eq!(back.inner, 5);
}
