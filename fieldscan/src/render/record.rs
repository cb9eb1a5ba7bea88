//! Record shapes: the static per-field descriptors the renderer walks.
//!
//! A record exposes its fields as an ordered list of [`Field`]s, each pairing a
//! `'static` [`FieldShape`] with a borrowed value. The shape carries the field
//! name, its masking directive and whether the field may be read at all.
//!
//! ## Visibility
//!
//! Only [`Visibility::Readable`] fields are rendered. Hidden fields are part of
//! the shape so the declaration order stays complete, but they carry no value
//! and are skipped without error. The derive marks `pub` fields readable and
//! everything else hidden.

use super::{mask::MaskDirective, Render, RECORD_DELIMITER};

/// Whether a field takes part in rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The field is rendered.
    Readable,
    /// The field is silently skipped.
    Hidden,
}

/// Static description of one record field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldShape {
    name: &'static str,
    directive: Option<MaskDirective>,
    visibility: Visibility,
}

impl FieldShape {
    /// A readable field without a masking directive.
    #[must_use]
    pub const fn readable(name: &'static str) -> Self {
        Self {
            name,
            directive: None,
            visibility: Visibility::Readable,
        }
    }

    /// A field that is never rendered.
    #[must_use]
    pub const fn hidden(name: &'static str) -> Self {
        Self {
            name,
            directive: None,
            visibility: Visibility::Hidden,
        }
    }

    /// Attaches a masking directive.
    #[must_use]
    pub const fn with_directive(mut self, directive: MaskDirective) -> Self {
        self.directive = Some(directive);
        self
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn directive(&self) -> Option<MaskDirective> {
        self.directive
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }
}

/// A field of a record instance: its shape plus a reference to its value.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    shape: &'a FieldShape,
    value: Option<&'a dyn Render>,
}

impl<'a> Field<'a> {
    /// A field whose value may be rendered, subject to the shape's visibility.
    pub fn new(shape: &'a FieldShape, value: &'a dyn Render) -> Self {
        Self {
            shape,
            value: Some(value),
        }
    }

    /// A field with no readable value.
    pub const fn hidden(shape: &'a FieldShape) -> Self {
        Self { shape, value: None }
    }

    pub const fn shape(&self) -> &'a FieldShape {
        self.shape
    }

    /// Renders the field as `Name=value` with its directive applied.
    ///
    /// Returns `None` for hidden fields.
    pub fn render_entry(&self) -> Option<String> {
        if self.shape.visibility == Visibility::Hidden {
            return None;
        }
        let value = self.value?;
        let rendered = value.render();
        let rendered = match self.shape.directive {
            Some(directive) => directive.apply_to(&rendered),
            None => rendered,
        };
        Some(format!("{}={rendered}", self.shape.name))
    }
}

/// A structured value with named fields in declaration order.
///
/// Usually implemented by `#[derive(Scan)]`. A manual implementation lists
/// every field, including hidden ones:
///
/// ```rust
/// use fieldscan::{Field, FieldShape, MaskDirective, Record};
///
/// struct Login {
///     user: String,
///     password: String,
/// }
///
/// impl Record for Login {
///     fn fields(&self) -> Vec<Field<'_>> {
///         const SHAPE: &[FieldShape] = &[
///             FieldShape::readable("User"),
///             FieldShape::readable("Password").with_directive(MaskDirective::Redact),
///         ];
///         vec![
///             Field::new(&SHAPE[0], &self.user),
///             Field::new(&SHAPE[1], &self.password),
///         ]
///     }
/// }
///
/// let login = Login { user: "admin".into(), password: "hunter2".into() };
/// assert_eq!(login.scan(), "User=admin | Password=REDACTED");
/// ```
pub trait Record {
    /// Returns the record's fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Renders the record as a single line. See [`scan`].
    fn scan(&self) -> String {
        scan(self)
    }
}

/// Renders a record's readable fields as `Name=value` joined by `" | "`.
///
/// The output has no surrounding braces and no trailing separator. Nested
/// records are rendered through their [`Render`] impl and so appear in braces.
pub fn scan<R>(record: &R) -> String
where
    R: Record + ?Sized,
{
    record
        .fields()
        .iter()
        .filter_map(Field::render_entry)
        .collect::<Vec<_>>()
        .join(RECORD_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::{scan, Field, FieldShape, Record, Visibility};
    use crate::MaskDirective;

    struct Credentials {
        user: String,
        token: String,
        internal: u32,
    }

    impl Record for Credentials {
        fn fields(&self) -> Vec<Field<'_>> {
            const SHAPE: &[FieldShape] = &[
                FieldShape::readable("User"),
                FieldShape::readable("Token").with_directive(MaskDirective::MaskLeft(4)),
                FieldShape::hidden("internal"),
            ];
            vec![
                Field::new(&SHAPE[0], &self.user),
                Field::new(&SHAPE[1], &self.token),
                Field::hidden(&SHAPE[2]),
            ]
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            user: "svc".to_string(),
            token: "tok_12345678".to_string(),
            internal: 7,
        }
    }

    #[test]
    fn scan_joins_readable_fields() {
        let creds = credentials();
        assert_eq!(scan(&creds), "User=svc | Token=XXXXXXXX5678");
        assert_eq!(creds.internal, 7);
    }

    #[test]
    fn hidden_shape_skips_even_with_value() {
        static SHAPE: FieldShape = FieldShape::hidden("Secret");
        let value = "visible?".to_string();
        assert_eq!(Field::new(&SHAPE, &value).render_entry(), None);
    }

    #[test]
    fn shape_accessors() {
        const SHAPE: FieldShape =
            FieldShape::readable("Password").with_directive(MaskDirective::Redact);
        assert_eq!(SHAPE.name(), "Password");
        assert_eq!(SHAPE.directive(), Some(MaskDirective::Redact));
        assert_eq!(SHAPE.visibility(), Visibility::Readable);
    }

    #[test]
    fn record_with_only_hidden_fields_is_empty() {
        struct Opaque;
        impl Record for Opaque {
            fn fields(&self) -> Vec<Field<'_>> {
                const SHAPE: &[FieldShape] = &[FieldShape::hidden("inner")];
                vec![Field::hidden(&SHAPE[0])]
            }
        }
        assert_eq!(Opaque.scan(), "");
    }

    #[test]
    fn scan_is_repeatable() {
        let creds = credentials();
        assert_eq!(scan(&creds), scan(&creds));
    }
}
