//! `StatusOutcomes` derive macro implementation.

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, LitInt, Variant, parse2};

/// Lowest status code accepted in `#[status(..)]`.
const MIN_STATUS: u16 = 100;
/// Highest status code accepted in `#[status(..)]`.
const MAX_STATUS: u16 = 599;

/// Expand the `#[derive(StatusOutcomes)]` macro.
pub fn expand_status_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let syn::Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input,
            "StatusOutcomes derive only supports enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "StatusOutcomes derive requires at least one variant",
        ));
    }

    let mut seen: BTreeMap<u16, &syn::Ident> = BTreeMap::new();
    let mut statuses = Vec::with_capacity(data.variants.len());
    let mut arms = Vec::with_capacity(data.variants.len());

    for variant in &data.variants {
        let status = parse_variant_status(variant)?;

        if let Some(previous) = seen.insert(status, &variant.ident) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                format!("status {status} is already used by variant `{previous}`"),
            ));
        }

        let variant_name = &variant.ident;
        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) },
            Fields::Unit => quote! { Self::#variant_name },
        };

        arms.push(quote! { #pattern => #status, });
        statuses.push(status);
    }

    Ok(quote! {
        impl #impl_generics ::triage::StatusOutcomes for #name #ty_generics #where_clause {
            const STATUSES: &'static [u16] = &[#(#statuses),*];

            fn status(&self) -> u16 {
                match self {
                    #(#arms)*
                }
            }
        }
    })
}

/// Parse the status code from the variant's `#[status(..)]` attribute.
fn parse_variant_status(variant: &Variant) -> syn::Result<u16> {
    let mut status = None;

    for attr in &variant.attrs {
        if !attr.path().is_ident("status") {
            continue;
        }
        if status.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate `#[status(..)]` attribute",
            ));
        }

        let lit: LitInt = attr.parse_args()?;
        let code: u16 = lit.base10_parse().map_err(|_| {
            syn::Error::new_spanned(&lit, "status code must be an integer between 100 and 599")
        })?;
        if !(MIN_STATUS..=MAX_STATUS).contains(&code) {
            return Err(syn::Error::new_spanned(
                &lit,
                format!("status code {code} is out of range, expected 100..=599"),
            ));
        }
        status = Some(code);
    }

    status.ok_or_else(|| {
        syn::Error::new_spanned(
            &variant.ident,
            format!(
                "variant `{}` is missing a `#[status(..)]` attribute",
                variant.ident
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(input: TokenStream) -> String {
        expand_status_derive(input)
            .expect("expansion should succeed")
            .to_string()
    }

    fn expand_err(input: TokenStream) -> String {
        expand_status_derive(input)
            .expect_err("expansion should fail")
            .to_string()
    }

    #[test]
    fn statuses_follow_declaration_order() {
        let output = expand(quote! {
            enum GetUser {
                #[status(404)]
                Missing,
                #[status(200)]
                Found(User),
            }
        });

        assert!(output.contains("impl :: triage :: StatusOutcomes for GetUser"));
        assert!(output.contains("const STATUSES : & 'static [u16] = & [404u16 , 200u16]"));
    }

    #[test]
    fn match_arms_cover_every_variant_shape() {
        let output = expand(quote! {
            enum Outcome {
                #[status(200)]
                Unit,
                #[status(201)]
                Tuple(String, u32),
                #[status(400)]
                Named { reason: String },
            }
        });

        assert!(output.contains("Self :: Unit => 200u16"));
        assert!(output.contains("Self :: Tuple (..) => 201u16"));
        assert!(output.contains("Self :: Named { .. } => 400u16"));
    }

    #[test]
    fn generics_are_forwarded() {
        let output = expand(quote! {
            enum Page<T: Clone> {
                #[status(200)]
                Items(Vec<T>),
                #[status(204)]
                Empty,
            }
        });

        assert!(output.contains("impl < T : Clone > :: triage :: StatusOutcomes for Page < T >"));
    }

    #[test]
    fn rejects_structs() {
        let err = expand_err(quote! {
            struct User {
                name: String,
            }
        });
        assert_eq!(err, "StatusOutcomes derive only supports enums");
    }

    #[test]
    fn rejects_missing_status() {
        let err = expand_err(quote! {
            enum Outcome {
                #[status(200)]
                Ok,
                Unknown,
            }
        });
        assert_eq!(err, "variant `Unknown` is missing a `#[status(..)]` attribute");
    }

    #[test]
    fn rejects_duplicate_status() {
        let err = expand_err(quote! {
            enum Outcome {
                #[status(200)]
                First,
                #[status(200)]
                Second,
            }
        });
        assert_eq!(err, "status 200 is already used by variant `First`");
    }

    #[test]
    fn rejects_out_of_range_status() {
        let err = expand_err(quote! {
            enum Outcome {
                #[status(99)]
                TooLow,
            }
        });
        assert_eq!(err, "status code 99 is out of range, expected 100..=599");

        let err = expand_err(quote! {
            enum Outcome {
                #[status(600)]
                TooHigh,
            }
        });
        assert_eq!(err, "status code 600 is out of range, expected 100..=599");
    }

    #[test]
    fn rejects_repeated_attribute() {
        let err = expand_err(quote! {
            enum Outcome {
                #[status(200)]
                #[status(201)]
                Twice,
            }
        });
        assert_eq!(err, "duplicate `#[status(..)]` attribute");
    }

    #[test]
    fn rejects_empty_enum() {
        let err = expand_err(quote! {
            enum Never {}
        });
        assert_eq!(err, "StatusOutcomes derive requires at least one variant");
    }
}
