use quote::ToTokens;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use crate::attrs::{
    ContainerAttributes, FieldAttributes, parse_container_attributes, parse_field_attributes,
};

// Internal representation of a parsed field
pub(crate) struct FieldInfo {
    pub ident: Ident,
    pub ty: Type,
    pub attrs: FieldAttributes,
    pub key: String,
    pub is_option: bool,
}

impl FieldInfo {
    pub fn name(&self) -> String {
        self.ident.to_string()
    }

    /// Whether the document key differs from the field name.
    pub fn is_remapped(&self) -> bool {
        self.key != self.name()
    }
}

pub(crate) struct StructInfo {
    pub container: ContainerAttributes,
    pub fields: Vec<FieldInfo>,
}

/// Named fields of a struct, or an error pointing at the type.
pub(crate) fn named_fields<'a>(
    ast: &'a DeriveInput,
    derive: &str,
) -> syn::Result<&'a syn::punctuated::Punctuated<syn::Field, syn::token::Comma>> {
    match &ast.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(f) => Ok(&f.named),
            _ => Err(syn::Error::new_spanned(
                &ast.ident,
                format!("{derive} only supports structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &ast.ident,
            format!("{derive} only supports structs"),
        )),
    }
}

/// Collects fields and resolves each document key, rejecting keys shared by two
/// fields that are read or written. Skipped fields never touch the document.
pub(crate) fn collect(ast: &DeriveInput, derive: &str) -> syn::Result<StructInfo> {
    let container = parse_container_attributes(&ast.attrs)?;
    let mut fields: Vec<FieldInfo> = Vec::new();

    for field in named_fields(ast, derive)? {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let attrs = parse_field_attributes(&field.attrs)?;
        let key = field_key(&ident, &attrs, &container);
        let collision = if attrs.skip {
            None
        } else {
            fields.iter().find(|f| !f.attrs.skip && f.key == key)
        };
        if let Some(other) = collision {
            return Err(syn::Error::new_spanned(
                &ident,
                format!(
                    "InvalidKey: key `{key}` of field `{ident}` is already used by field `{}`",
                    other.ident
                ),
            ));
        }
        fields.push(FieldInfo {
            is_option: is_type_option(&field.ty),
            ty: field.ty.clone(),
            ident,
            attrs,
            key,
        });
    }

    Ok(StructInfo { container, fields })
}

fn field_key(ident: &Ident, fattrs: &FieldAttributes, cattrs: &ContainerAttributes) -> String {
    if let Some(key) = &fattrs.key {
        key.clone()
    } else if let Some(rule) = cattrs.rename_all {
        rule.apply(&ident.to_string())
    } else {
        ident.to_string()
    }
}

fn is_type_option(ty: &Type) -> bool {
    if let Type::Path(p) = ty
        && p.qself.is_none()
        && let Some(seg) = p.path.segments.last()
    {
        return seg.ident == "Option";
    }
    false
}

/// Source spelling of a type with token spacing removed except between words,
/// so `Option < Vec < u8 > >` and `Option<Vec<u8>>` compare equal.
pub(crate) fn type_spelling(ty: &impl ToTokens) -> String {
    let raw = ty.to_token_stream().to_string();
    let chars: Vec<char> = raw.chars().collect();
    let word = |c: &char| c.is_alphanumeric() || *c == '_';
    let mut out = String::with_capacity(raw.len());
    for (i, c) in chars.iter().enumerate() {
        if c.is_whitespace() {
            let keep = i > 0
                && chars.get(i + 1).is_some_and(word)
                && word(&chars[i - 1]);
            if keep {
                out.push(' ');
            }
            continue;
        }
        out.push(*c);
    }
    out
}
