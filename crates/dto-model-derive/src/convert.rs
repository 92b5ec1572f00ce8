use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{DeriveInput, Ident, Path, PathArguments};

use crate::model::{named_fields, type_spelling};

#[derive(Clone, Copy)]
pub(crate) enum Direction {
    ToDomain,
    ToDto,
}

impl Direction {
    fn derive_name(self) -> &'static str {
        match self {
            Direction::ToDomain => "ConvertToDomainModel",
            Direction::ToDto => "ConvertToDtoModel",
        }
    }

    fn attribute(self) -> &'static str {
        match self {
            Direction::ToDomain => "domain_model",
            Direction::ToDto => "dto_model",
        }
    }

    fn names(self) -> (Ident, Ident, Ident) {
        let (tr, assoc, method) = match self {
            Direction::ToDomain => ("ToDomainModel", "DomainModel", "to_domain_model"),
            Direction::ToDto => ("ToDtoModel", "DtoModel", "to_dto_model"),
        };
        (
            Ident::new(tr, Span::call_site()),
            Ident::new(assoc, Span::call_site()),
            Ident::new(method, Span::call_site()),
        )
    }
}

/// The `Target` of `#[domain_model(Target)]` / `#[dto_model(Target)]`.
fn parse_target(ast: &DeriveInput, direction: Direction) -> syn::Result<Path> {
    let attr_name = direction.attribute();
    let mut found: Option<Path> = None;
    for attr in &ast.attrs {
        if !attr.path().is_ident(attr_name) {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                format!("duplicate #[{attr_name}(...)] attribute"),
            ));
        }
        found = Some(attr.parse_args::<Path>()?);
    }
    found.ok_or_else(|| {
        syn::Error::new_spanned(
            &ast.ident,
            format!(
                "{} requires a target type: #[{attr_name}(TargetType)]",
                direction.derive_name()
            ),
        )
    })
}

/// `Foo<T>` as it must be written in expression position (`Foo::<T>`).
fn expression_path(path: &Path) -> Path {
    let mut path = path.clone();
    for segment in &mut path.segments {
        if let PathArguments::AngleBracketed(args) = &mut segment.arguments {
            args.colon2_token = Some(Default::default());
        }
    }
    path
}

pub(crate) fn expand_convert(ast: &DeriveInput, direction: Direction) -> syn::Result<TokenStream> {
    let derive = direction.derive_name();
    let fields = named_fields(ast, derive)?;
    let target = parse_target(ast, direction)?;
    let target_expr = expression_path(&target);
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();
    let (trait_ident, assoc_ident, method_ident) = direction.names();

    let idents: Vec<&Ident> = fields.iter().filter_map(|f| f.ident.as_ref()).collect();

    let message = format!(
        "ShapeMismatch: `{}` and `{}` must declare the same fields with the same types",
        name,
        type_spelling(&target)
    )
    .replace('{', "{{")
    .replace('}', "}}");
    let check = quote! {
        ::core::assert!(
            ::dto_model::__private::shapes_match(
                <#name #ty_generics as ::dto_model::Reflect>::FIELDS,
                <#target as ::dto_model::Reflect>::FIELDS,
            ),
            #message
        )
    };
    // generic sources are checked per instantiation, when the conversion is used
    let (module_check, inline_check) = if ast.generics.params.is_empty() {
        (Some(quote! { const _: () = #check; }), None)
    } else {
        (None, Some(quote! { const { #check }; }))
    };

    Ok(quote! {
        #module_check
        impl #impl_generics ::dto_model::#trait_ident for #name #ty_generics #where_clause {
            type #assoc_ident = #target;
            fn #method_ident(self) -> #target {
                #inline_check
                let #name { #( #idents ),* } = self;
                #target_expr { #( #idents ),* }
            }
        }
        impl #impl_generics ::core::convert::From<#name #ty_generics> for #target #where_clause {
            fn from(value: #name #ty_generics) -> Self {
                ::dto_model::#trait_ident::#method_ident(value)
            }
        }
    })
}
