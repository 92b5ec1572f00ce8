//! Derive macro user-facing documentation (implementation in `dto-model-derive`).
//!
//! The macros are re-exported when the `derive` feature (on by default) is active:
//! ```rust
//! # #[cfg(feature = "derive")]
//! use dto_model::{ConvertToDomainModel, ConvertToDtoModel, DecodeDto, EncodeDto, Reflect};
//! ```
//!
//! Decoding with a remapped key:
//! ```rust
//! # #[cfg(feature = "derive")]
//! # mod demo {
//! use dto_model::{DecodeDto, Document};
//!
//! #[derive(Debug, PartialEq, DecodeDto)]
//! struct Model {
//!     #[dto(key = "receiver_id")]
//!     receiver: i64,
//! }
//!
//! pub fn run() {
//!     let doc = Document::map().insert("receiver_id", 42).unwrap();
//!     assert_eq!(doc.decode::<Model>().unwrap(), Model { receiver: 42 });
//! }
//! # }
//! # #[cfg(feature = "derive")]
//! # demo::run();
//! ```
//!
//! Converting between a DTO and a domain model of the same shape:
//! ```rust
//! # #[cfg(feature = "derive")]
//! # mod demo {
//! use dto_model::{ConvertToDomainModel, Reflect, ToDomainModel};
//!
//! #[derive(Reflect, ConvertToDomainModel)]
//! #[domain_model(User)]
//! pub struct UserDto {
//!     id: i64,
//!     name: String,
//! }
//!
//! #[derive(Debug, Reflect)]
//! pub struct User {
//!     pub id: i64,
//!     pub name: String,
//! }
//!
//! pub fn run() {
//!     let user = UserDto { id: 1, name: "Ada".into() }.to_domain_model();
//!     assert_eq!(user.name, "Ada");
//! }
//! # }
//! # #[cfg(feature = "derive")]
//! # demo::run();
//! ```
//!
//! Field attributes (`#[dto(...)]`):
//! - `key = "external"`: document key for the field; must be non-empty and unique
//! - `default` or `default = path::to_fn`: value used when the key is absent
//! - `skip`: never read or written; filled with the default
//! - `with = module`: custom codec, `module::decode(&Document) -> anyhow::Result<T>`
//!   and `module::encode(&T) -> Document` (see [`crate::codec`])
//!
//! Container attributes:
//! - `#[dto(rename_all = "case")]`: snake_case | kebab-case | camelCase | PascalCase |
//!   SCREAMING_SNAKE_CASE | lowercase | UPPERCASE
//! - `#[dto(deny_unknown_fields)]`
//! - `#[domain_model(Type)]` for `ConvertToDomainModel`, `#[dto_model(Type)]` for `ConvertToDtoModel`
//!
//! `Option<T>` fields decode a missing key or `null` as `None`, and encode `None`
//! by omitting the key.
//!
//! Converters require both types to derive [`Reflect`](crate::Reflect). A field
//! set that differs in names or declared types (compared by spelling) fails to
//! compile with a `ShapeMismatch` message. Only flat, field-for-field moves are
//! generated: no coercion, no partial mappings.
//!
//! Generic structs: bounds are not inferred; add them manually if needed.
