//! Layered decoding of configuration tokens into byte payloads.
//!
//! A token is an arbitrary short string: an environment variable value, a
//! config-file string or a CLI flag. [`decode`] resolves it with three ordered
//! strategies and the first that applies wins:
//!
//! 1. **Path**: the token names a readable file; its bytes are the content.
//! 2. **Base64**: the token is standard base64 (padded); the decoded bytes are
//!    the content. CR and LF are ignored so wrapped values decode too.
//! 3. **Plaintext**: the token's own bytes are the content.
//!
//! Decoding is total. The ordering matters: a token that happens to be an
//! existing path is always read from disk, even if it is also valid base64.

use std::{convert::Infallible, fmt, ops::Deref, str::FromStr};

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

use crate::render::Render;

/// Standard alphabet with required padding. Non-zero trailing bits are accepted.
const STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical)
        .with_decode_allow_trailing_bits(true),
);

/// Which strategy produced a [`ByteContent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// The token was a path to a readable file.
    Path,
    /// The token was standard base64.
    Base64,
    /// The token was used as-is.
    Plaintext,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Path => "path",
            Self::Base64 => "base64",
            Self::Plaintext => "plaintext",
        })
    }
}

/// Bytes read from a file path, a base64 string or plain text.
///
/// Content is immutable once decoded. It renders as `<binary data>` when
/// non-empty, so printing a configuration never leaks the payload.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteContent(Vec<u8>);

impl ByteContent {
    /// Decodes a token. See [`decode`].
    #[must_use]
    pub fn from_token(token: impl AsRef<[u8]>) -> Self {
        decode(token)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for ByteContent {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for ByteContent {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<ByteContent> for Vec<u8> {
    fn from(content: ByteContent) -> Self {
        content.0
    }
}

impl fmt::Debug for ByteContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByteContent").field(&self.render()).finish()
    }
}

impl Render for ByteContent {
    fn render(&self) -> String {
        self.0.render()
    }
}

impl FromStr for ByteContent {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode(s))
    }
}

/// Decodes a token into content using the path, base64, plaintext order.
///
/// This never fails: the plaintext strategy accepts every input.
///
/// ```rust
/// use fieldscan::decode;
///
/// assert_eq!(decode("aGVsbG8=").as_bytes(), b"hello");
/// assert_eq!(decode("not base64!").as_bytes(), b"not base64!");
/// ```
pub fn decode(token: impl AsRef<[u8]>) -> ByteContent {
    decode_with_source(token).0
}

/// Like [`decode`], also reporting which strategy applied.
pub fn decode_with_source(token: impl AsRef<[u8]>) -> (ByteContent, Source) {
    let token = token.as_ref();
    if let Some(bytes) = read_path(token) {
        return (ByteContent(bytes), Source::Path);
    }
    if let Some(bytes) = decode_base64(token) {
        return (ByteContent(bytes), Source::Base64);
    }
    (ByteContent(token.to_vec()), Source::Plaintext)
}

/// Any I/O failure means the token is not a usable path.
fn read_path(token: &[u8]) -> Option<Vec<u8>> {
    #[cfg(unix)]
    let path = {
        use std::os::unix::ffi::OsStrExt;
        std::path::Path::new(std::ffi::OsStr::from_bytes(token))
    };
    #[cfg(not(unix))]
    let path = std::path::Path::new(std::str::from_utf8(token).ok()?);

    std::fs::read(path).ok()
}

fn decode_base64(token: &[u8]) -> Option<Vec<u8>> {
    if token.contains(&b'\r') || token.contains(&b'\n') {
        let joined: Vec<u8> = token
            .iter()
            .copied()
            .filter(|b| !matches!(b, b'\r' | b'\n'))
            .collect();
        return STANDARD.decode(joined).ok();
    }
    STANDARD.decode(token).ok()
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{self, Deserialize, Deserializer, Visitor};

    use super::{decode, ByteContent};

    struct TokenVisitor;

    impl Visitor<'_> for TokenVisitor {
        type Value = ByteContent;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a file path, base64 string or plain text")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(decode(v))
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
            Ok(decode(v))
        }
    }

    impl<'de> Deserialize<'de> for ByteContent {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(TokenVisitor)
        }
    }
}
