//! Adapters for emitting rendered values through `slog`.
//!
//! Types deriving `Scan` already implement `slog::Value` when the `slog` feature
//! is on. This module covers the rest:
//! - records with a hand-written [`Record`] impl, through [`AsScanned`]
//! - any other [`Render`] value (collections, options, time types), through
//!   [`AsRendered`]
//! - [`ByteContent`](crate::ByteContent) and [`X509Cert`](crate::X509Cert)
//!
//! Every adapter emits a single string built by the renderer, so masking
//! directives apply to logged values exactly as they do to printed ones.
//! Nothing here configures `slog` or installs a drain.

use slog::{Key, Record as SlogRecord, Result as SlogResult, Serializer, Value as SlogValue};

use crate::render::{scan, Record, Render};

/// A `slog::Value` that emits a record's [`scan`] line.
pub struct Scanned<'a, R: ?Sized>(&'a R);

impl<R> SlogValue for Scanned<'_, R>
where
    R: Record + ?Sized,
{
    fn serialize(
        &self,
        _record: &SlogRecord<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &scan(self.0))
    }
}

/// A `slog::Value` that emits a value's [`Render`] output.
pub struct Rendered<'a, T: ?Sized>(&'a T);

impl<T> SlogValue for Rendered<'_, T>
where
    T: Render + ?Sized,
{
    fn serialize(
        &self,
        _record: &SlogRecord<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.0.render())
    }
}

/// Borrows a record as a `slog::Value`.
///
/// ## Example
/// ```ignore
/// use fieldscan::slog::AsScanned;
///
/// info!(logger, "loaded config"; "config" => config.as_scanned());
/// ```
pub trait AsScanned: Record {
    fn as_scanned(&self) -> Scanned<'_, Self> {
        Scanned(self)
    }
}

impl<R> AsScanned for R where R: Record + ?Sized {}

/// Borrows any renderable value as a `slog::Value`.
pub trait AsRendered: Render {
    fn as_rendered(&self) -> Rendered<'_, Self> {
        Rendered(self)
    }
}

impl<T> AsRendered for T where T: Render + ?Sized {}

#[cfg(feature = "decode")]
impl SlogValue for crate::ByteContent {
    fn serialize(
        &self,
        _record: &SlogRecord<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.render())
    }
}

#[cfg(feature = "x509")]
impl SlogValue for crate::X509Cert {
    fn serialize(
        &self,
        _record: &SlogRecord<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.render())
    }
}
