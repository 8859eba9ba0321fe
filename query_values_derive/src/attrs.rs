//! Parsing of `#[query(...)]` attributes.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, Field, LitStr};

/// How keys are derived from field names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenameRule {
    #[default]
    SnakeCase,
    LowerCase,
    UpperCase,
    CamelCase,
    PascalCase,
    KebabCase,
    ScreamingSnakeCase,
}

impl RenameRule {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "snake_case" => RenameRule::SnakeCase,
            "lowercase" => RenameRule::LowerCase,
            "UPPERCASE" => RenameRule::UpperCase,
            "camelCase" => RenameRule::CamelCase,
            "PascalCase" => RenameRule::PascalCase,
            "kebab-case" => RenameRule::KebabCase,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnakeCase,
            _ => return None,
        })
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            RenameRule::SnakeCase => name.to_snake_case(),
            RenameRule::LowerCase => name.to_ascii_lowercase(),
            RenameRule::UpperCase => name.to_ascii_uppercase(),
            RenameRule::CamelCase => name.to_lower_camel_case(),
            RenameRule::PascalCase => name.to_upper_camel_case(),
            RenameRule::KebabCase => name.to_kebab_case(),
            RenameRule::ScreamingSnakeCase => name.to_shouty_snake_case(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ContainerAttrs {
    pub rename_all: RenameRule,
}

/// Where a field is read from.
#[derive(Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Read from `key` with the field's `Field` implementation.
    Keyed { key: String, text: bool },
    /// Walked in place as part of the enclosing record.
    Flatten,
    Skip,
}

/// Marks a key derived from the field name.
const DERIVE_KEY: &str = "*";
/// Marks a field that is never read.
const SKIP_KEY: &str = "-";

pub fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut result = ContainerAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("query") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: LitStr = meta.value()?.parse()?;
                result.rename_all = RenameRule::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(
                        &value,
                        "invalid rename_all value, expected one of: snake_case, lowercase, UPPERCASE, camelCase, PascalCase, kebab-case, SCREAMING_SNAKE_CASE",
                    )
                })?;
                Ok(())
            } else {
                Err(meta.error("unknown query container attribute"))
            }
        })?;
    }
    Ok(result)
}

#[derive(Default)]
struct RawFieldAttrs {
    rename: Option<LitStr>,
    skip: bool,
    flatten: bool,
    text: bool,
}

impl RawFieldAttrs {
    fn parse_meta(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        let ident = meta.path.get_ident().map(|i| i.to_string());
        match ident.as_deref() {
            Some("rename") => self.rename = Some(meta.value()?.parse()?),
            Some("skip") => self.skip = true,
            Some("flatten") => self.flatten = true,
            Some("text") => self.text = true,
            _ => return Err(meta.error("unknown query field attribute")),
        }
        Ok(())
    }
}

pub fn parse_field_attrs(field: &Field, rename_all: RenameRule) -> syn::Result<FieldKind> {
    let mut raw = RawFieldAttrs::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("query") {
            continue;
        }
        attr.parse_nested_meta(|meta| raw.parse_meta(&meta))?;
    }

    if raw.skip {
        return Ok(FieldKind::Skip);
    }

    if raw.flatten {
        if let Some(rename) = &raw.rename {
            return Err(syn::Error::new_spanned(
                rename,
                "flattened fields take their keys from the embedded record",
            ));
        }
        if raw.text {
            return Err(syn::Error::new_spanned(
                field,
                "`flatten` and `text` cannot be combined",
            ));
        }
        return Ok(FieldKind::Flatten);
    }

    let key = match raw.rename.map(|lit| lit.value()) {
        Some(key) if key.is_empty() || key == SKIP_KEY => return Ok(FieldKind::Skip),
        Some(key) if key != DERIVE_KEY => key,
        _ => {
            let ident = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "query fields must be named"))?;
            let name = ident.to_string();
            rename_all.apply(name.strip_prefix("r#").unwrap_or(&name))
        }
    };
    Ok(FieldKind::Keyed {
        key,
        text: raw.text,
    })
}
