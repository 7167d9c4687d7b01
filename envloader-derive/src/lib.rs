//! Derive macro implementation for envloader

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Index, Member};

mod attrs;

use attrs::FieldAttrs;

/// `Record` derive macro
///
/// Implements `envloader::Record` (one visit per field, in declaration
/// order) and `envloader::Target` for the struct, a shared reference to it,
/// and a mutable reference to it.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[tag(env = "VAR")]`: Read the field from `VAR` under the `env` tag
/// - `#[tag(env = "VAR", test = "TEST_VAR")]`: One variable per tag name
/// - `#[tag(env = "-")]` or `#[tag(env = "")]`: Never read under `env`
///
/// Fields whose type also derives `Record` are populated recursively
/// whether or not they carry a tag.
///
/// # Example
///
/// See the `envloader` crate documentation for usage examples.
#[proc_macro_derive(Record, attributes(tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Record can only be derived for structs",
            ));
        }
    };

    // Collect every attribute error instead of stopping at the first
    let mut errors: Option<syn::Error> = None;
    let mut visits = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(err) => {
                match &mut errors {
                    Some(existing) => existing.combine(err),
                    None => errors = Some(err),
                }
                continue;
            }
        };

        let (member, field_name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };
        let field_type = &field.ty;
        let tag_names = attrs.tags.iter().map(|(tag, _)| tag);
        let var_names = attrs.tags.iter().map(|(_, var)| var);

        visits.push(quote! {
            {
                const FIELD: ::envloader::__private::Field = ::envloader::__private::Field {
                    name: #field_name,
                    tags: &[#((#tag_names, #var_names)),*],
                };
                let visit = (&&&::envloader::__private::Probe::<#field_type>::new()).visitor();
                visit(&mut self.#member, &FIELD, scanner);
            }
        });
    }

    if let Some(errors) = errors {
        return Err(errors);
    }

    let rejected = quote! {
        fn as_record(
            &mut self,
        ) -> ::core::result::Result<&mut dyn ::envloader::Record, ::envloader::LoadError> {
            ::core::result::Result::Err(::envloader::LoadError::not_a_pointer::<Self>())
        }
    };

    Ok(quote! {
        impl #impl_generics ::envloader::Record for #struct_name #ty_generics #where_clause {
            #[allow(unused_variables, unused_imports)]
            fn scan(&mut self, scanner: &mut ::envloader::Scanner<'_>) {
                use ::envloader::__private::{ViaOpaque as _, ViaRecord as _, ViaValue as _};
                #(#visits)*
            }
        }

        impl #impl_generics ::envloader::Target for #struct_name #ty_generics #where_clause {
            #rejected
        }

        impl #impl_generics ::envloader::Target for &#struct_name #ty_generics #where_clause {
            #rejected
        }

        impl #impl_generics ::envloader::Target for &mut #struct_name #ty_generics #where_clause {
            fn as_record(
                &mut self,
            ) -> ::core::result::Result<&mut dyn ::envloader::Record, ::envloader::LoadError> {
                ::core::result::Result::Ok(&mut **self)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_rejects_enums() {
        let input: DeriveInput = parse_quote! {
            enum Mode { A, B }
        };

        let err = expand(&input).unwrap_err();
        assert_eq!(err.to_string(), "Record can only be derived for structs");
    }

    #[test]
    fn test_reports_every_bad_field() {
        let input: DeriveInput = parse_quote! {
            struct Config {
                #[tag(env)]
                a: String,
                #[tag(env = "X", env = "Y")]
                b: String,
            }
        };

        let err = expand(&input).unwrap_err();
        assert_eq!(err.into_iter().count(), 2);
    }

    #[test]
    fn test_expands_named_and_tuple_fields() {
        let named: DeriveInput = parse_quote! {
            struct Config {
                #[tag(env = "PORT")]
                r#port: u16,
            }
        };
        let output = expand(&named).unwrap().to_string();
        assert!(output.contains("\"port\""));
        assert!(output.contains("\"PORT\""));

        let tuple: DeriveInput = parse_quote! {
            struct Wrapper(#[tag(env = "NAME")] String);
        };
        let output = expand(&tuple).unwrap().to_string();
        assert!(output.contains("self . 0"));
        assert!(output.contains("\"0\""));
    }
}
