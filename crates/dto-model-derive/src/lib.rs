//! Derive macros for the `dto-model` crate.
//! Re-exported automatically when enabling the `derive` feature on `dto-model`.

extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod convert;
mod dto;
mod model;
mod reflect;

use convert::Direction;

/// Generates `Decode` (plus `TryFrom<&Document>` / `TryFrom<Document>`) for a struct.
#[proc_macro_derive(DecodeDto, attributes(dto))]
pub fn derive_decode_dto(input: TokenStream) -> TokenStream {
    expand(input, dto::expand_decode)
}

/// Generates `From<T> for Document`, writing each field under its document key.
#[proc_macro_derive(EncodeDto, attributes(dto))]
pub fn derive_encode_dto(input: TokenStream) -> TokenStream {
    expand(input, dto::expand_encode)
}

/// Generates the `Reflect` descriptor consumed by the converters.
#[proc_macro_derive(Reflect, attributes(dto))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    expand(input, reflect::expand_reflect)
}

/// `#[domain_model(Target)]`: generates `ToDomainModel` and `From<Self> for Target`.
#[proc_macro_derive(ConvertToDomainModel, attributes(domain_model))]
pub fn derive_convert_to_domain_model(input: TokenStream) -> TokenStream {
    expand(input, |ast| convert::expand_convert(ast, Direction::ToDomain))
}

/// `#[dto_model(Target)]`: generates `ToDtoModel` and `From<Self> for Target`.
#[proc_macro_derive(ConvertToDtoModel, attributes(dto_model))]
pub fn derive_convert_to_dto_model(input: TokenStream) -> TokenStream {
    expand(input, |ast| convert::expand_convert(ast, Direction::ToDto))
}

fn expand(
    input: TokenStream,
    generate: impl FnOnce(&DeriveInput) -> syn::Result<proc_macro2::TokenStream>,
) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match generate(&ast) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
