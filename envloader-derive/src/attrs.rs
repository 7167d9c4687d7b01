//! Attribute parsing for `#[tag(...)]` annotations.
//!
//! This module extracts and validates tag attributes from struct fields
//! during macro expansion.

use syn::ext::IdentExt;
use syn::{Field, LitStr};

/// Parsed `#[tag(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// `(tag name, variable name)` pairs in the order they were written.
    ///
    /// The variable name may be empty or `-`, which opts the field out for
    /// that tag name.
    pub tags: Vec<(String, String)>,
}

impl FieldAttrs {
    /// Extract and parse every `#[tag(...)]` attribute on a struct field.
    ///
    /// Unrelated attributes are ignored so other macros can process them.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("tag") {
                continue;
            }

            // Parse #[tag(name = "VAR", ...)] contents
            attr.parse_nested_meta(|meta| {
                let Some(ident) = meta.path.get_ident() else {
                    return Err(meta.error("tag names must be plain identifiers"));
                };
                let key = ident.unraw().to_string();

                if !meta.input.peek(syn::Token![=]) {
                    return Err(meta.error(format!(
                        "expected `{key} = \"VARIABLE_NAME\"`"
                    )));
                }
                let value: LitStr = meta.value()?.parse()?;

                if attrs.tags.iter().any(|(existing, _)| *existing == key) {
                    return Err(meta.error(format!("duplicate tag name `{key}`")));
                }
                attrs.tags.push((key, value.value()));
                Ok(())
            })?;
        }

        Ok(attrs)
    }

    /// Variable name for `tag`, if present.
    #[cfg(test)]
    fn get(&self, tag: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(key, _)| key == tag)
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_single_tag() {
        let field: Field = parse_quote! {
            #[tag(env = "DATABASE_URL")]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.get("env"), Some("DATABASE_URL"));
    }

    #[test]
    fn test_parse_multiple_tags() {
        let field: Field = parse_quote! {
            #[tag(env = "PORT", testTag = "TEST_PORT")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(
            attrs.tags,
            vec![
                ("env".to_string(), "PORT".to_string()),
                ("testTag".to_string(), "TEST_PORT".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_split_attributes() {
        let field: Field = parse_quote! {
            #[tag(env = "PORT")]
            #[serde(default)]
            #[tag(alt = "ALT_PORT")]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.get("env"), Some("PORT"));
        assert_eq!(attrs.get("alt"), Some("ALT_PORT"));
    }

    #[test]
    fn test_parse_opt_out_values() {
        let field: Field = parse_quote! {
            #[tag(env = "-", other = "")]
            pub internal: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.get("env"), Some("-"));
        assert_eq!(attrs.get("other"), Some(""));
    }

    #[test]
    fn test_parse_raw_identifier_key() {
        let field: Field = parse_quote! {
            #[tag(r#type = "KIND")]
            pub kind: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert_eq!(attrs.get("type"), Some("KIND"));
    }

    #[test]
    fn test_no_tag_attributes() {
        let field: Field = parse_quote! {
            pub untagged: String
        };

        let attrs = FieldAttrs::from_field(&field).unwrap();
        assert!(attrs.tags.is_empty());
    }

    #[test]
    fn test_reject_duplicate_tag() {
        let field: Field = parse_quote! {
            #[tag(env = "A", env = "B")]
            pub value: String
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("duplicate tag name `env`"));
    }

    #[test]
    fn test_reject_missing_value() {
        let field: Field = parse_quote! {
            #[tag(env)]
            pub value: String
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("expected `env = \"VARIABLE_NAME\"`"));
    }

    #[test]
    fn test_reject_non_string_value() {
        let field: Field = parse_quote! {
            #[tag(env = 42)]
            pub value: String
        };

        assert!(FieldAttrs::from_field(&field).is_err());
    }

    #[test]
    fn test_reject_path_key() {
        let field: Field = parse_quote! {
            #[tag(a::b = "X")]
            pub value: String
        };

        let err = FieldAttrs::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("plain identifiers"));
    }
}
