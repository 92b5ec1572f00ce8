use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::model::{collect, type_spelling};

pub(crate) fn expand_reflect(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let info = collect(ast, "Reflect")?;
    let name = &ast.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let descriptors = info.fields.iter().map(|f| {
        let field_name = f.name();
        let spelling = type_spelling(&f.ty);
        let key = if f.is_remapped() {
            let key = &f.key;
            quote! { ::core::option::Option::Some(#key) }
        } else {
            quote! { ::core::option::Option::None }
        };
        quote! { ::dto_model::__private::field(#field_name, #spelling, #key) }
    });

    Ok(quote! {
        impl #impl_generics ::dto_model::Reflect for #name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const FIELDS: &'static [::dto_model::FieldDescriptor] = &[ #( #descriptors ),* ];
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn records_spelling_and_keys() {
        let ast: DeriveInput = parse_quote! {
            struct Model {
                #[dto(key = "receiver_id")]
                receiver: Option<i64>,
                name: String,
            }
        };
        let out = expand_reflect(&ast).unwrap().to_string();
        assert!(out.contains("field (\"receiver\" , \"Option<i64>\" , :: core :: option :: Option :: Some (\"receiver_id\"))"));
        assert!(out.contains("field (\"name\" , \"String\" , :: core :: option :: Option :: None)"));
    }
}
