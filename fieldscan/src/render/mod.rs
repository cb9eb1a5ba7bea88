//! Rendering of arbitrary values into one line of text.
//!
//! This module ties the pieces together:
//!
//! - **`record`**: Shape layer - which fields a record has (`Record`, `FieldShape`)
//! - **`mask`**: Policy layer - how a field is obscured (`MaskDirective`)
//! - **`value`**: Value layer - how each kind of value is written (`Render` impls)
//! - **`duration`**: unit-scaled duration formatting
//!
//! ## Value Rules
//!
//! Every renderable type implements [`Render`] exactly once, so each type maps to
//! a single rule:
//!
//! | Kind | Output |
//! |------|--------|
//! | Timestamp (`DateTime`, `SystemTime`) | RFC 3339, whole seconds |
//! | Duration (`Duration`, `TimeDelta`) | [`fmt_duration`] |
//! | Stringable (opt-in `Display`) | `{text}` |
//! | `Option`, `Box`, `Rc`, `Arc`, `&T` | `nil` or the inner value |
//! | Record | `{A=1 \| B=2}` |
//! | Map | `[k=v, k=v]` |
//! | Non-empty bytes | `<binary data>` |
//! | Other sequences | `[a, b]` |
//! | Primitives | natural literal |

mod duration;
mod mask;
mod record;
mod value;

use std::fmt::Display;

pub use duration::fmt_duration;
pub use mask::{MaskDirective, MASK_CHAR, REDACTED_PLACEHOLDER};
pub use record::{scan, Field, FieldShape, Record, Visibility};

/// Separator between record fields.
pub const RECORD_DELIMITER: &str = " | ";

/// Separator between sequence elements and map entries.
pub const ENTRY_DELIMITER: &str = ", ";

/// Rendered form of an absent value.
pub const NIL: &str = "nil";

/// Rendered form of a non-empty byte sequence.
pub const BINARY_PLACEHOLDER: &str = "<binary data>";

/// A value that can be written as a single line of text.
///
/// Rendering never fails and never mutates the value. Implementations exist for
/// primitives, strings, standard containers, smart pointers, maps, and time
/// types; records get theirs from `#[derive(Scan)]`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be rendered by fieldscan",
    label = "this type does not implement `Render`",
    note = "use `#[derive(Scan)]` on structs, or `#[scan(display)]` for types with a `Display` impl",
    note = "fields that should not be rendered can be made non-`pub` or marked `#[scan(skip)]`"
)]
pub trait Render {
    /// Renders the value.
    fn render(&self) -> String;

    /// Renders the elements of a sequence of this type.
    ///
    /// Overridden by `u8` so byte buffers render as [`BINARY_PLACEHOLDER`].
    #[doc(hidden)]
    fn render_elements<'a, I>(items: I) -> String
    where
        Self: Sized + 'a,
        I: ExactSizeIterator<Item = &'a Self>,
    {
        sequence(items.map(Render::render))
    }
}

/// Renders a value through its `Display` impl, wrapped in braces.
///
/// This is the rule for types that supply their own textual representation.
pub fn render_display<T>(value: &T) -> String
where
    T: Display + ?Sized,
{
    format!("{{{value}}}")
}

/// Renders a nested record: its scanned fields wrapped in braces.
pub fn render_record<R>(record: &R) -> String
where
    R: Record + ?Sized,
{
    format!("{{{}}}", scan(record))
}

/// Joins rendered elements as `[a, b]`.
pub(crate) fn sequence<I>(items: I) -> String
where
    I: IntoIterator<Item = String>,
{
    format!("[{}]", items.into_iter().collect::<Vec<_>>().join(ENTRY_DELIMITER))
}

/// Joins rendered entries as `[k=v, k=v]`.
pub(crate) fn mapping<'a, K, V, I>(entries: I) -> String
where
    K: Render + ?Sized + 'a,
    V: Render + ?Sized + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    sequence(
        entries
            .into_iter()
            .map(|(key, value)| format!("{}={}", key.render(), value.render())),
    )
}
