use syn::{Attribute, Lit};

// Container / field attribute models -----------------------------------------------------------
#[derive(Debug, Clone, Default)]
pub(crate) struct ContainerAttributes {
    pub rename_all: Option<RenameRule>,
    pub deny_unknown_fields: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FieldAttributes {
    pub key: Option<String>,
    pub skip: bool,
    pub default: DefaultType,
    pub with: Option<syn::Path>,
}

#[derive(Debug, Clone, Default)]
pub(crate) enum DefaultType {
    #[default]
    None,
    Default,
    Path(syn::Path),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    Snake,
    Kebab,
    Camel,
    Pascal,
    ScreamingSnake,
    Lower,
    Upper,
}

impl RenameRule {
    fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "snake_case" => RenameRule::Snake,
            "kebab-case" => RenameRule::Kebab,
            "camelCase" => RenameRule::Camel,
            "PascalCase" => RenameRule::Pascal,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "lowercase" => RenameRule::Lower,
            "UPPERCASE" => RenameRule::Upper,
            _ => return None,
        })
    }

    pub fn apply(&self, name: &str) -> String {
        match self {
            RenameRule::Snake => to_snake_case(name),
            RenameRule::Kebab => to_snake_case(name).replace('_', "-"),
            RenameRule::Camel => to_camel_case(name),
            RenameRule::Pascal => to_pascal_case(name),
            RenameRule::ScreamingSnake => to_snake_case(name).to_uppercase(),
            RenameRule::Lower => name.to_lowercase(),
            RenameRule::Upper => name.to_uppercase(),
        }
    }
}

// Parsing -------------------------------------------------------------------------------------
fn parse_str(meta: &syn::meta::ParseNestedMeta) -> syn::Result<syn::LitStr> {
    let value = meta.value()?;
    let lit: Lit = value.parse()?;
    match lit {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), "Expected string literal")),
    }
}

pub(crate) fn parse_container_attributes(attrs: &[Attribute]) -> syn::Result<ContainerAttributes> {
    let mut out = ContainerAttributes::default();
    for attr in attrs {
        if !attr.path().is_ident("dto") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let s = parse_str(&meta)?;
                out.rename_all = Some(
                    RenameRule::parse(&s.value())
                        .ok_or_else(|| syn::Error::new(s.span(), "Invalid rename_all value"))?,
                );
                Ok(())
            } else if meta.path.is_ident("deny_unknown_fields") {
                out.deny_unknown_fields = true;
                Ok(())
            } else {
                Err(meta.error("Unknown container attribute"))
            }
        })?;
    }
    Ok(out)
}

pub(crate) fn parse_field_attributes(attrs: &[Attribute]) -> syn::Result<FieldAttributes> {
    let mut out = FieldAttributes::default();
    for attr in attrs {
        if !attr.path().is_ident("dto") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                let s = parse_str(&meta)?;
                if s.value().is_empty() {
                    return Err(syn::Error::new(
                        s.span(),
                        "InvalidKey: external key must be a non-empty string",
                    ));
                }
                if out.key.is_some() {
                    return Err(meta.error("duplicate `key` attribute"));
                }
                out.key = Some(s.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else if meta.path.is_ident("default") {
                if meta.input.peek(syn::token::Eq) {
                    let value = meta.value()?;
                    let path: syn::Path = value.parse()?;
                    out.default = DefaultType::Path(path);
                } else {
                    out.default = DefaultType::Default;
                }
                Ok(())
            } else if meta.path.is_ident("with") {
                let value = meta.value()?;
                let path: syn::Path = value.parse()?;
                out.with = Some(path);
                Ok(())
            } else {
                Err(meta.error("Unknown field attribute"))
            }
        })?;
    }
    Ok(out)
}

// Case conversion -----------------------------------------------------------------------------
fn to_snake_case(s: &str) -> String {
    let mut out = String::new();
    let mut prev_lower = false;
    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            for l in ch.to_lowercase() {
                out.push(l);
            }
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch != '_';
        }
    }
    out
}

fn to_camel_case(s: &str) -> String {
    let mut out = String::new();
    let mut upper = false;
    for ch in s.chars() {
        if ch == '_' || ch == '-' {
            upper = !out.is_empty();
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else if out.is_empty() {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

fn to_pascal_case(s: &str) -> String {
    let camel = to_camel_case(s);
    let mut chars = camel.chars();
    if let Some(f) = chars.next() {
        f.to_uppercase().collect::<String>() + chars.as_str()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn rename_rules() {
        assert_eq!(RenameRule::Camel.apply("created_at"), "createdAt");
        assert_eq!(RenameRule::Pascal.apply("created_at"), "CreatedAt");
        assert_eq!(RenameRule::Kebab.apply("created_at"), "created-at");
        assert_eq!(RenameRule::ScreamingSnake.apply("created_at"), "CREATED_AT");
        assert_eq!(RenameRule::Snake.apply("receiverID"), "receiver_id");
        assert_eq!(RenameRule::Upper.apply("id"), "ID");
    }

    #[test]
    fn camel_and_pascal_keep_inner_case() {
        assert_eq!(RenameRule::Camel.apply("receiverID"), "receiverID");
        assert_eq!(RenameRule::Camel.apply("user_ID"), "userID");
        assert_eq!(RenameRule::Pascal.apply("createdAt"), "CreatedAt");
        assert_eq!(RenameRule::Pascal.apply("receiver_id"), "ReceiverId");
    }

    #[test]
    fn field_key_is_parsed() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[dto(key = "receiver_id", default)])];
        let parsed = parse_field_attributes(&attrs).unwrap();
        assert_eq!(parsed.key.as_deref(), Some("receiver_id"));
        assert!(matches!(parsed.default, DefaultType::Default));
    }

    #[test]
    fn empty_key_is_invalid() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[dto(key = "")])];
        let err = parse_field_attributes(&attrs).unwrap_err();
        assert!(err.to_string().starts_with("InvalidKey"));
    }

    #[test]
    fn unknown_attributes_are_rejected() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[dto(flatten)])];
        assert!(parse_field_attributes(&attrs).is_err());
        let attrs: Vec<Attribute> = vec![parse_quote!(#[dto(rename_all = "Title Case")])];
        assert!(parse_container_attributes(&attrs).is_err());
    }

    #[test]
    fn foreign_attributes_are_ignored() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(rename = "x")])];
        assert!(parse_field_attributes(&attrs).unwrap().key.is_none());
    }
}
