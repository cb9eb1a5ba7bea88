//! Derive macros for `fieldscan`.
//!
//! This crate generates the static shape descriptor behind `#[derive(Scan)]`. It:
//! - reads `#[secret(...)]` masking directives and `#[scan(...)]` options
//! - marks `pub` fields readable and every other field hidden
//! - emits `Record` and `Render` implementations that call into `fieldscan`
//!
//! It does **not** render anything itself. Rendering rules and masking live in
//! the main `fieldscan` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

#[cfg(feature = "slog")]
use proc_macro2::Span;
use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, parse_quote, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_struct;
mod directive;
mod field;
mod generics;
use container::{parse_container_options, ContainerOptions};
use derive_struct::derive_struct;
use generics::add_render_bounds;

/// Derives `fieldscan::Record` and `fieldscan::Render` for structs.
///
/// # Container Attributes
///
/// - `#[scan(display)]` - Render the type through its `Display` impl, wrapped in
///   braces, instead of walking its fields. This is the only form accepted on enums.
///
/// # Field Visibility
///
/// Only `pub` fields are rendered. Every other field is recorded as hidden in the
/// shape descriptor and silently skipped, so its type needs no `Render` impl.
/// `#[scan(skip)]` hides a `pub` field as well.
///
/// # Masking Directives
///
/// - `#[secret]` or `#[secret(redact)]`: the rendered value is replaced by `REDACTED`.
/// - `#[secret(mask = N)]`: all but the last `N` characters are replaced with `X`.
///   `#[secret(mask)]` masks everything.
/// - `#[secret = "mask=4"]`: the same grammar written as a single tag string.
/// - Any other directive name is kept as `MaskDirective::Unrecognized` and leaves the
///   value unmasked.
///
/// Unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `slog::Value` (behind `cfg(feature = "slog")`): emits the scanned string. The derive
///   first looks for a top-level `slog` crate; if not found, it checks the
///   `FIELDSCAN_SLOG_CRATE` env var for an alternate path (e.g., `my_log::slog`).
#[proc_macro_derive(Scan, attributes(scan, secret))]
pub fn derive_scan(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the fieldscan crate root.
///
/// Handles crate renaming (e.g., `my_scan = { package = "fieldscan", ... }`)
/// and internal usage (when derive is used inside the fieldscan crate itself).
fn crate_root() -> TokenStream {
    match crate_name("fieldscan") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::fieldscan },
    }
}

/// Returns the token stream to reference the slog crate root.
///
/// If the top-level `slog` crate is not available, falls back to the
/// `FIELDSCAN_SLOG_CRATE` env var, which should be a path like `my_log::slog`.
#[cfg(feature = "slog")]
fn slog_crate() -> Result<TokenStream> {
    match crate_name("slog") {
        Ok(FoundCrate::Itself) => Ok(quote! { crate }),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            Ok(quote! { ::#ident })
        }
        Err(_) => {
            let env_value = std::env::var("FIELDSCAN_SLOG_CRATE").map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    "slog support is enabled, but no top-level `slog` crate was found. \
Set the FIELDSCAN_SLOG_CRATE env var to a path (e.g., `my_log::slog`) or add \
`slog` as a direct dependency.",
                )
            })?;
            let path = syn::parse_str::<syn::Path>(&env_value).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!("FIELDSCAN_SLOG_CRATE must be a valid Rust path (got `{env_value}`)"),
                )
            })?;
            Ok(quote! { #path })
        }
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { display } = parse_container_options(&attrs)?;
    let crate_root = crate_root();

    let (impls, emit, value_generics) = if display {
        if let Data::Union(u) = &data {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Scan` cannot be derived for unions",
            ));
        }
        let mut display_generics = generics.clone();
        let self_ty: syn::Type = {
            let (_, ty_generics, _) = generics.split_for_impl();
            parse_quote!(#ident #ty_generics)
        };
        display_generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#self_ty: ::core::fmt::Display));
        let (impl_generics, ty_generics, where_clause) = display_generics.split_for_impl();
        let impls = quote! {
            impl #impl_generics #crate_root::Render for #ident #ty_generics #where_clause {
                fn render(&self) -> ::std::string::String {
                    #crate_root::render_display(self)
                }
            }
        };
        let emit = quote! { #crate_root::Render::render(self) };
        (impls, emit, display_generics)
    } else {
        let data = match data {
            Data::Struct(data) => data,
            Data::Enum(e) => {
                return Err(syn::Error::new(
                    e.enum_token.span(),
                    "`Scan` on enums requires `#[scan(display)]`",
                ));
            }
            Data::Union(u) => {
                return Err(syn::Error::new(
                    u.union_token.span(),
                    "`Scan` cannot be derived for unions",
                ));
            }
        };

        let output = derive_struct(data, &generics, &crate_root)?;
        let bounded = add_render_bounds(generics.clone(), &output.used_generics, &crate_root);
        let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
        let fields_body = &output.fields_body;
        let impls = quote! {
            impl #impl_generics #crate_root::Record for #ident #ty_generics #where_clause {
                fn fields(&self) -> ::std::vec::Vec<#crate_root::Field<'_>> {
                    #fields_body
                }
            }

            impl #impl_generics #crate_root::Render for #ident #ty_generics #where_clause {
                fn render(&self) -> ::std::string::String {
                    #crate_root::render_record(self)
                }
            }
        };
        let emit = quote! { #crate_root::scan(self) };
        (impls, emit, bounded)
    };

    // Only generate slog impl when the slog feature is enabled on fieldscan-derive.
    // It carries the same bounds as the `Render`/`Record` impls above.
    #[cfg(feature = "slog")]
    let slog_impl = {
        let slog_crate = slog_crate()?;
        let (slog_impl_generics, slog_ty_generics, slog_where_clause) =
            value_generics.split_for_impl();
        quote! {
            impl #slog_impl_generics #slog_crate::Value for #ident #slog_ty_generics #slog_where_clause {
                fn serialize(
                    &self,
                    _record: &#slog_crate::Record<'_>,
                    key: #slog_crate::Key,
                    serializer: &mut dyn #slog_crate::Serializer,
                ) -> #slog_crate::Result {
                    serializer.emit_str(key, &#emit)
                }
            }
        }
    };

    #[cfg(not(feature = "slog"))]
    let slog_impl = {
        let _ = (emit, value_generics);
        quote! {}
    };

    Ok(quote! {
        #impls

        #slog_impl
    })
}
