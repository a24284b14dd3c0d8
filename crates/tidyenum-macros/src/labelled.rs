//! `#[derive(LabelledEnum)]` implementation.
//!
//! Reads `#[labelled(...)]` attributes from the enum and its variants and
//! generates the `LabelledEnum` impl plus a `FieldValue` conversion.

use darling::{FromDeriveInput, FromMeta, FromVariant};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

/// Enum-level attributes from `#[labelled(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(labelled), supports(enum_unit))]
pub struct LabelledOpts {
    pub ident: syn::Ident,
    pub data: darling::ast::Data<LabelledVariantOpts, ()>,

    /// The enum name used in qualified member names. Defaults to the ident.
    #[darling(default)]
    pub name: Option<String>,

    /// Path to the `tidyenum_db` crate. Defaults to `::tidyenum_db`.
    #[darling(default, rename = "crate")]
    pub krate: Option<syn::Path>,
}

/// Per-variant attributes from `#[labelled(...)]`.
#[derive(Debug, FromVariant)]
#[darling(attributes(labelled))]
pub struct LabelledVariantOpts {
    pub ident: syn::Ident,

    /// The stored primitive: an integer (optionally negated) or string literal.
    pub value: MemberValue,

    /// Human-readable label. Defaults to the variant ident.
    #[darling(default)]
    pub label: Option<String>,

    /// Member name. Defaults to the ident in SCREAMING_SNAKE_CASE.
    #[darling(default)]
    pub name: Option<String>,
}

/// A variant's stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValue {
    Int(i64),
    Str(String),
}

impl MemberValue {
    const fn kind(&self) -> Kind {
        match self {
            Self::Int(_) => Kind::Integer,
            Self::Str(_) => Kind::Text,
        }
    }
}

impl FromMeta for MemberValue {
    fn from_expr(expr: &syn::Expr) -> darling::Result<Self> {
        match expr {
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Int(int),
                ..
            }) => Ok(Self::Int(int.base10_parse()?)),
            syn::Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(s),
                ..
            }) => Ok(Self::Str(s.value())),
            syn::Expr::Unary(syn::ExprUnary {
                op: syn::UnOp::Neg(_),
                expr: inner,
                ..
            }) => match &**inner {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Int(int),
                    ..
                }) => {
                    // i128 so that `-9223372036854775808` fits before negation.
                    let magnitude: i128 = int.base10_parse()?;
                    i64::try_from(-magnitude).map(Self::Int).map_err(|_| {
                        darling::Error::custom("labelled value does not fit in i64").with_span(expr)
                    })
                }
                _ => Err(unsupported_value(expr)),
            },
            syn::Expr::Group(group) => Self::from_expr(&group.expr),
            _ => Err(unsupported_value(expr)),
        }
    }
}

fn unsupported_value(expr: &syn::Expr) -> darling::Error {
    darling::Error::custom("labelled values must be integer or string literals").with_span(expr)
}

/// Which primitive kind the variant values share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Text,
    Integer,
}

/// Generates the `LabelledEnum` implementation for the enum.
pub fn derive_labelled_enum_impl(input: DeriveInput) -> TokenStream {
    let opts = match LabelledOpts::from_derive_input(&input) {
        Ok(o) => o,
        Err(e) => return e.write_errors(),
    };

    match expand(&opts) {
        Ok(tokens) => tokens,
        Err(e) => e.to_compile_error(),
    }
}

fn expand(opts: &LabelledOpts) -> syn::Result<TokenStream> {
    let enum_ident = &opts.ident;
    let enum_name = opts.name.clone().unwrap_or_else(|| enum_ident.to_string());
    let krate = opts
        .krate
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(::tidyenum_db));

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        darling::ast::Data::Struct(_) => {
            return Err(syn::Error::new_spanned(
                enum_ident,
                "#[derive(LabelledEnum)] only supports enums",
            ))
        }
    };

    let kind = member_kind(variants)?;
    let kind_token = match kind {
        Kind::Text => quote! { #krate::enums::PrimitiveKind::Text },
        Kind::Integer => quote! { #krate::enums::PrimitiveKind::Integer },
    };

    let mut seen_names: Vec<String> = Vec::with_capacity(variants.len());
    let mut idents = Vec::with_capacity(variants.len());
    let mut names = Vec::with_capacity(variants.len());
    let mut labels = Vec::with_capacity(variants.len());
    let mut values = Vec::with_capacity(variants.len());

    for variant in variants {
        let name = variant
            .name
            .clone()
            .unwrap_or_else(|| screaming_snake_case(&variant.ident.to_string()));
        if seen_names.contains(&name) {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                format!("duplicate member name `{name}`"),
            ));
        }
        seen_names.push(name.clone());

        idents.push(&variant.ident);
        labels.push(
            variant
                .label
                .clone()
                .unwrap_or_else(|| variant.ident.to_string()),
        );
        values.push(value_tokens(&krate, &variant.value));
        names.push(name);
    }

    Ok(quote! {
        impl #krate::enums::LabelledEnum for #enum_ident {
            const ENUM_NAME: &'static str = #enum_name;
            const MEMBER_TYPE: #krate::enums::PrimitiveKind = #kind_token;

            fn members() -> &'static [Self] {
                &[#(Self::#idents),*]
            }

            fn name(self) -> &'static str {
                match self {
                    #(Self::#idents => #names,)*
                }
            }

            fn value(self) -> #krate::value::Value {
                match self {
                    #(Self::#idents => #values,)*
                }
            }

            fn label(self) -> &'static str {
                match self {
                    #(Self::#idents => #labels,)*
                }
            }
        }

        impl ::core::convert::From<#enum_ident> for #krate::fields::FieldValue {
            fn from(member: #enum_ident) -> Self {
                Self::Member(#krate::enums::LabelledEnum::member(member))
            }
        }
    })
}

/// Determines the shared primitive kind of all variant values.
fn member_kind(variants: &[LabelledVariantOpts]) -> syn::Result<Kind> {
    let mut kind = None;
    for variant in variants {
        let this = variant.value.kind();
        match kind {
            None => kind = Some(this),
            Some(k) if k != this => {
                return Err(syn::Error::new_spanned(
                    &variant.ident,
                    "all labelled values must share one primitive type",
                ))
            }
            Some(_) => {}
        }
    }
    // An enum without variants stores text.
    Ok(kind.unwrap_or(Kind::Text))
}

fn value_tokens(krate: &syn::Path, value: &MemberValue) -> TokenStream {
    match value {
        MemberValue::Int(n) => quote! { #krate::value::Value::Int(#n) },
        MemberValue::Str(s) => quote! {
            #krate::value::Value::String(::std::string::String::from(#s))
        },
    }
}

/// Converts `InProgress` to `IN_PROGRESS`.
fn screaming_snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let chars: Vec<char> = ident.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev != '_' && (prev.is_lowercase() || prev.is_ascii_digit() || next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(screaming_snake_case("Active"), "ACTIVE");
        assert_eq!(screaming_snake_case("InProgress"), "IN_PROGRESS");
        assert_eq!(screaming_snake_case("HTTPError"), "HTTP_ERROR");
        assert_eq!(screaming_snake_case("Level2Done"), "LEVEL2_DONE");
        assert_eq!(screaming_snake_case("ALREADY_UPPER"), "ALREADY_UPPER");
    }

    #[test]
    fn test_mixed_value_kinds_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Mixed {
                #[labelled(value = 1)]
                One,
                #[labelled(value = "two")]
                Two,
            }
        };
        let tokens = derive_labelled_enum_impl(input).to_string();
        assert!(tokens.contains("all labelled values must share one primitive type"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Dup {
                #[labelled(value = 1, name = "X")]
                One,
                #[labelled(value = 2, name = "X")]
                Two,
            }
        };
        let tokens = derive_labelled_enum_impl(input).to_string();
        assert!(tokens.contains("duplicate member name"));
    }

    #[test]
    fn test_missing_value_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum NoValue {
                One,
            }
        };
        let tokens = derive_labelled_enum_impl(input).to_string();
        assert!(tokens.contains("compile_error"));
    }

    #[test]
    fn test_negative_integer_values() {
        let input: DeriveInput = syn::parse_quote! {
            enum Signed {
                #[labelled(value = -1)]
                Unknown,
                #[labelled(value = 0)]
                Zero,
            }
        };
        let opts = LabelledOpts::from_derive_input(&input).unwrap();
        let darling::ast::Data::Enum(variants) = &opts.data else {
            panic!("expected enum data");
        };
        assert_eq!(variants[0].value, MemberValue::Int(-1));
        let tokens = derive_labelled_enum_impl(input).to_string();
        assert!(!tokens.contains("compile_error"));
        assert!(tokens.contains("PrimitiveKind :: Integer"));
    }

    #[test]
    fn test_i64_bounds() {
        let input: DeriveInput = syn::parse_quote! {
            enum Bounds {
                #[labelled(value = -9223372036854775808)]
                Min,
                #[labelled(value = -9223372036854775809)]
                TooSmall,
            }
        };
        let tokens = derive_labelled_enum_impl(input).to_string();
        assert!(tokens.contains("does not fit in i64"));
    }

    #[test]
    fn test_non_literal_value_rejected() {
        let input: DeriveInput = syn::parse_quote! {
            enum Computed {
                #[labelled(value = 1 + 1)]
                Two,
            }
        };
        let tokens = derive_labelled_enum_impl(input).to_string();
        assert!(tokens.contains("integer or string literals"));
    }

    #[test]
    fn test_generates_impl() {
        let input: DeriveInput = syn::parse_quote! {
            #[labelled(name = "Status")]
            enum Status {
                #[labelled(value = 1, label = "Active")]
                Active,
            }
        };
        let tokens = derive_labelled_enum_impl(input).to_string();
        assert!(tokens.contains("LabelledEnum for Status"));
        assert!(tokens.contains("\"ACTIVE\""));
        assert!(tokens.contains("PrimitiveKind :: Integer"));
    }
}
