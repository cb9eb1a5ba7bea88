//! Helpers for loading and displaying configuration values.
//!
//! This crate provides two independent facilities:
//! - **Decoding**: [`decode`] turns a text token into a [`ByteContent`] by trying,
//!   in order, a filesystem path, standard base64, and finally the raw text.
//!   [`X509Cert`] builds on it to read a PEM certificate from any of those forms.
//! - **Rendering**: [`scan`] turns a [`Record`] into a single line of
//!   `Name=value` pairs, applying the [`MaskDirective`] declared on each field.
//!
//! Key rules:
//! - Use `#[derive(Scan)]` on configuration structs. Only `pub` fields are rendered.
//! - Use `#[secret]` to redact a field and `#[secret(mask = N)]` to keep only the
//!   last `N` characters visible.
//! - Non-empty byte sequences always render as `<binary data>`, masked or not.
//! - Absent optional values render as `nil`.
//!
//! What this crate does not do:
//! - parse rendered text back into values
//! - treat masking as a security boundary; it only affects the printed form
//! - optimize rendering for hot paths; it is meant for startup logs and diagnostics
//!
//! The `Scan` derive macro lives in `fieldscan-derive` and is re-exported when
//! the `derive` feature is enabled.

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
    clippy::option_if_let_else,
    clippy::cast_possible_wrap
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[cfg(feature = "derive")]
pub use fieldscan_derive::Scan;

// Module declarations
#[cfg(feature = "decode")]
mod content;
mod render;
#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "x509")]
mod x509;

// Re-exports
#[cfg(feature = "decode")]
pub use content::{decode, decode_with_source, ByteContent, Source};
pub use render::{
    fmt_duration, render_display, render_record, scan, Field, FieldShape, MaskDirective, Record,
    Render, Visibility, BINARY_PLACEHOLDER, ENTRY_DELIMITER, MASK_CHAR, NIL, RECORD_DELIMITER,
    REDACTED_PLACEHOLDER,
};
#[cfg(feature = "x509")]
pub use x509::{parse_certificate, CertError, PublicKeyAlgorithm, X509Cert};
