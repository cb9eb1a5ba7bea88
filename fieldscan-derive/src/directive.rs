//! Parsing of `#[secret(...)]` field attributes.
//!
//! This module maps attribute syntax to masking directives and produces
//! structured errors for invalid forms. Directives are resolved here, at
//! record-definition time, and emitted as constants in the shape descriptor.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, Attribute, Expr, ExprLit, ExprUnary, Lit, Meta, Result, UnOp};

/// Masking directive declared on a field.
///
/// ## Directive Mapping
///
/// | Attribute | Directive |
/// |-----------|-----------|
/// | `#[secret]`, `#[secret(redact)]` | `Redact` |
/// | `#[secret(mask = N)]` | `MaskLeft(N)` |
/// | `#[secret(mask)]` | `MaskLeft(0)` |
/// | `#[secret = "name=param"]` | tag grammar, see [`Directive::from_tag`] |
/// | `#[secret(other)]` | `Unrecognized("other")` |
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Directive {
    Redact,
    MaskLeft(usize),
    Unrecognized(String),
}

impl Directive {
    /// Parses the `name[=param]` tag grammar.
    ///
    /// An empty name means `redact`. A missing or unparsable mask parameter is `0`.
    pub(crate) fn from_tag(tag: &str) -> Self {
        let (name, param) = tag.split_once('=').unwrap_or((tag, ""));
        Self::from_parts(name, Some(param))
    }

    fn from_parts(name: &str, param: Option<&str>) -> Self {
        match name {
            "" | "redact" => Self::Redact,
            "mask" => Self::MaskLeft(param.and_then(|p| p.parse().ok()).unwrap_or(0)),
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub(crate) fn to_tokens(&self, crate_root: &TokenStream) -> TokenStream {
        match self {
            Self::Redact => quote! { #crate_root::MaskDirective::Redact },
            Self::MaskLeft(keep) => quote! { #crate_root::MaskDirective::MaskLeft(#keep) },
            Self::Unrecognized(name) => {
                quote! { #crate_root::MaskDirective::Unrecognized(#name) }
            }
        }
    }
}

fn set_directive(target: &mut Option<Directive>, next: Directive, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[secret] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

/// Reads a directive parameter: an integer, a negated integer or a string.
///
/// Parameters are kept as text so they go through the same `name=param`
/// fallback as the tag form; a negative mask becomes `0` there.
fn expr_param(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => Ok(int.base10_digits().to_string()),
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => expr_param(inner).map(|digits| format!("-{digits}")),
        other => Err(syn::Error::new(
            other.span(),
            "expected an integer or string directive parameter",
        )),
    }
}

pub(crate) fn parse_field_directive(attrs: &[Attribute]) -> Result<Option<Directive>> {
    let mut directive: Option<Directive> = None;
    for attr in attrs {
        if !attr.path().is_ident("secret") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[secret] - full redaction
                set_directive(&mut directive, Directive::Redact, attr.span())?;
            }
            Meta::List(list) => {
                let mut parsed: Option<Directive> = None;
                list.parse_nested_meta(|meta| {
                    if parsed.is_some() {
                        return Err(meta.error("expected a single masking directive"));
                    }
                    let name = meta
                        .path
                        .get_ident()
                        .map(ToString::to_string)
                        .ok_or_else(|| meta.error("expected a directive name"))?;
                    let param = if meta.input.peek(syn::Token![=]) {
                        let expr: Expr = meta.value()?.parse()?;
                        Some(expr_param(&expr)?)
                    } else {
                        None
                    };
                    parsed = Some(Directive::from_parts(&name, param.as_deref()));
                    Ok(())
                })?;
                let parsed = parsed.ok_or_else(|| {
                    syn::Error::new(attr.span(), "expected a masking directive, e.g. #[secret(mask = 4)]")
                })?;
                set_directive(&mut directive, parsed, attr.span())?;
            }
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(tag) => {
                        set_directive(&mut directive, Directive::from_tag(&tag.value()), attr.span())?;
                    }
                    _ => {
                        return Err(syn::Error::new(
                            nv.value.span(),
                            "expected a string tag, e.g. #[secret = \"mask=4\"]",
                        ));
                    }
                },
                _ => {
                    return Err(syn::Error::new(
                        nv.value.span(),
                        "expected a string tag, e.g. #[secret = \"mask=4\"]",
                    ));
                }
            },
        }
    }

    Ok(directive)
}
