//! Masking directives for rendered field values.
//!
//! Directives are pure string transformations applied after a field's value
//! has been rendered. They do not traverse structures or decide what is
//! sensitive; that is declared per field on the record type.

use std::fmt;

/// Text that replaces a redacted value.
pub const REDACTED_PLACEHOLDER: &str = "REDACTED";

/// Character that replaces masked characters.
pub const MASK_CHAR: char = 'X';

/// A per-field rule controlling how a rendered value is obscured.
///
/// Directives are declared statically on record fields, either through the
/// `#[secret]` derive attribute or by [`MaskDirective::parse`] on a tag string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskDirective {
    /// Replace the entire value with [`REDACTED_PLACEHOLDER`].
    Redact,
    /// Keep the last `n` characters and replace every preceding one with [`MASK_CHAR`].
    MaskLeft(usize),
    /// A directive name with no defined masking. The value is left unmasked.
    ///
    /// Unknown names are kept rather than mapped to a default so callers can
    /// audit them with [`MaskDirective::is_recognized`].
    Unrecognized(&'static str),
}

impl MaskDirective {
    /// Parses the `name[=param]` tag grammar.
    ///
    /// - `""` and `"redact"` yield [`MaskDirective::Redact`]; any parameter is ignored.
    /// - `"mask=N"` yields [`MaskDirective::MaskLeft`]. A missing or unparsable `N` is `0`.
    /// - Any other name yields [`MaskDirective::Unrecognized`].
    ///
    /// ```rust
    /// use fieldscan::MaskDirective;
    ///
    /// assert_eq!(MaskDirective::parse("mask=4"), MaskDirective::MaskLeft(4));
    /// assert_eq!(MaskDirective::parse(""), MaskDirective::Redact);
    /// ```
    #[must_use]
    pub fn parse(tag: &'static str) -> Self {
        let (name, param) = tag.split_once('=').unwrap_or((tag, ""));
        match name {
            "" | "redact" => Self::Redact,
            "mask" => Self::MaskLeft(param.parse().unwrap_or(0)),
            other => Self::Unrecognized(other),
        }
    }

    /// Returns false for [`MaskDirective::Unrecognized`].
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    /// Applies the directive to an already rendered value.
    ///
    /// This method is total (it does not return errors).
    #[must_use]
    pub fn apply_to(&self, value: &str) -> String {
        match self {
            Self::Redact => REDACTED_PLACEHOLDER.to_string(),
            Self::MaskLeft(keep) => mask_left(value, *keep),
            Self::Unrecognized(_) => value.to_string(),
        }
    }
}

impl fmt::Display for MaskDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redact => f.write_str("redact"),
            Self::MaskLeft(keep) => write!(f, "mask={keep}"),
            Self::Unrecognized(name) => f.write_str(name),
        }
    }
}

/// Replaces all but the last `keep` Unicode scalar values with [`MASK_CHAR`].
///
/// If `keep` covers the whole value, the output is unchanged.
fn mask_left(value: &str, keep: usize) -> String {
    let total = value.chars().count();
    let masked = total.saturating_sub(keep);
    value
        .chars()
        .enumerate()
        .map(|(index, ch)| if index < masked { MASK_CHAR } else { ch })
        .collect()
}
