use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attrs::DefaultType;
use crate::model::{FieldInfo, collect};

pub(crate) fn expand_decode(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let info = collect(ast, "DecodeDto")?;
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let deny_unknown = info.container.deny_unknown_fields.then(|| {
        let known = info.fields.iter().filter(|f| !f.attrs.skip).map(|f| &f.key);
        quote! { ::dto_model::__private::deny_unknown(map, &[ #( #known ),* ])?; }
    });
    let field_inits = info.fields.iter().map(field_init);

    Ok(quote! {
        impl #impl_generics ::dto_model::Decode for #name #ty_generics #where_clause {
            fn decode(
                document: &::dto_model::Document,
            ) -> ::core::result::Result<Self, ::dto_model::DecodeError> {
                #[allow(unused_variables)]
                let map = ::dto_model::__private::expect_map(document)?;
                #deny_unknown
                ::core::result::Result::Ok(Self { #( #field_inits ),* })
            }
        }
        impl #impl_generics ::core::convert::TryFrom<&::dto_model::Document> for #name #ty_generics #where_clause {
            type Error = ::dto_model::DecodeError;
            fn try_from(
                document: &::dto_model::Document,
            ) -> ::core::result::Result<Self, Self::Error> {
                <Self as ::dto_model::Decode>::decode(document)
            }
        }
        impl #impl_generics ::core::convert::TryFrom<::dto_model::Document> for #name #ty_generics #where_clause {
            type Error = ::dto_model::DecodeError;
            fn try_from(
                document: ::dto_model::Document,
            ) -> ::core::result::Result<Self, Self::Error> {
                <Self as ::dto_model::Decode>::decode(&document)
            }
        }
    })
}

fn field_init(f: &FieldInfo) -> TokenStream {
    let ident = &f.ident;
    let key = &f.key;

    if f.attrs.skip {
        let default_expr = match &f.attrs.default {
            DefaultType::None | DefaultType::Default => {
                quote! { ::core::default::Default::default() }
            }
            DefaultType::Path(p) => quote! { #p() },
        };
        return quote! { #ident: #default_expr };
    }

    let lookup = match &f.attrs.with {
        Some(p) => quote! { ::dto_model::__private::optional_with(map, #key, #p::decode)? },
        None => quote! { ::dto_model::__private::optional(map, #key)? },
    };

    let init_expr = match (&f.attrs.default, f.is_option) {
        (DefaultType::None, false) => match &f.attrs.with {
            Some(p) => quote! { ::dto_model::__private::required_with(map, #key, #p::decode)? },
            None => quote! { ::dto_model::__private::required(map, #key)? },
        },
        (DefaultType::None | DefaultType::Default, true) => lookup,
        (DefaultType::Default, false) => quote! { #lookup.unwrap_or_default() },
        (DefaultType::Path(func), false) => quote! { #lookup.unwrap_or_else(#func) },
        (DefaultType::Path(func), true) => quote! {
            match #lookup {
                ::core::option::Option::Some(value) => ::core::option::Option::Some(value),
                ::core::option::Option::None => #func(),
            }
        },
    };

    quote! { #ident: #init_expr }
}

pub(crate) fn expand_encode(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let info = collect(ast, "EncodeDto")?;
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let bindings = info.fields.iter().map(|f| {
        let ident = &f.ident;
        if f.attrs.skip {
            quote! { #ident: _ }
        } else {
            quote! { #ident }
        }
    });
    let inserts = info.fields.iter().filter(|f| !f.attrs.skip).map(|f| {
        let ident = &f.ident;
        let key = &f.key;
        match (f.is_option, &f.attrs.with) {
            (true, Some(path)) => quote! {
                if let ::core::option::Option::Some(field_value) = #ident {
                    map.insert(#key.to_string(), #path::encode(&field_value));
                }
            },
            (true, None) => quote! {
                if let ::core::option::Option::Some(field_value) = #ident {
                    map.insert(#key.to_string(), ::core::convert::Into::<::dto_model::Document>::into(field_value));
                }
            },
            (false, Some(path)) => quote! {
                map.insert(#key.to_string(), #path::encode(&#ident));
            },
            (false, None) => quote! {
                map.insert(#key.to_string(), ::core::convert::Into::<::dto_model::Document>::into(#ident));
            },
        }
    });

    Ok(quote! {
        impl #impl_generics ::core::convert::From<#name #ty_generics> for ::dto_model::Document #where_clause {
            fn from(value: #name #ty_generics) -> Self {
                let #name { #( #bindings ),* } = value;
                #[allow(unused_mut)]
                let mut map = ::std::collections::HashMap::new();
                #( #inserts )*
                ::dto_model::Document::Map(map)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn decode_uses_remapped_key() {
        let ast: DeriveInput = parse_quote! {
            struct Model {
                #[dto(key = "receiver_id")]
                receiver: i64,
            }
        };
        let out = expand_decode(&ast).unwrap().to_string();
        assert!(out.contains("\"receiver_id\""));
        assert!(!out.contains("\"receiver\""));
    }

    #[test]
    fn decode_defaults_to_field_name() {
        let ast: DeriveInput = parse_quote! {
            struct TestDto { test: String }
        };
        let out = expand_decode(&ast).unwrap().to_string();
        assert!(out.contains("required (map , \"test\")"));
    }

    #[test]
    fn deny_unknown_lists_known_keys() {
        let ast: DeriveInput = parse_quote! {
            #[dto(deny_unknown_fields)]
            struct Strict { a: i32, #[dto(skip)] b: i32 }
        };
        let out = expand_decode(&ast).unwrap().to_string();
        assert!(out.contains("deny_unknown (map , & [\"a\"])"));
    }

    #[test]
    fn encode_ignores_skipped_fields() {
        let ast: DeriveInput = parse_quote! {
            struct Partial { a: i32, #[dto(skip)] cache: Vec<u8> }
        };
        let out = expand_encode(&ast).unwrap().to_string();
        assert!(out.contains("cache : _"));
        assert!(!out.contains("\"cache\""));
    }

    #[test]
    fn enums_are_rejected() {
        let ast: DeriveInput = parse_quote! { enum E { A } };
        assert!(expand_decode(&ast).is_err());
        assert!(expand_encode(&ast).is_err());
    }
}
