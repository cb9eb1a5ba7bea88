//! X.509 certificates read through the layered decoder.
//!
//! A certificate token goes through [`crate::decode`] first, so it may be a
//! path to a PEM file, base64 of PEM text, or the PEM text itself. The first
//! PEM block in the resulting content is parsed as a DER certificate.
//!
//! Reference: `x509-parser` crate (rusticata, MIT/Apache-2.0)

use std::{fmt, str::FromStr};

use chrono::{DateTime, TimeDelta, Utc};
use x509_parser::{
    certificate::X509Certificate,
    der_parser::asn1_rs::Tag,
    error::X509Error,
    extensions::GeneralName,
    nom,
    pem::parse_x509_pem,
    prelude::FromDer,
    x509::{AttributeTypeAndValue, X509Name},
};

use crate::{
    content::decode,
    render::{render_display, Render},
};

const OID_RSA: &str = "1.2.840.113549.1.1.1";
const OID_DSA: &str = "1.2.840.10040.4.1";
const OID_EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
const OID_ED25519: &str = "1.3.101.112";
const OID_ED448: &str = "1.3.101.113";

/// Errors from reading a certificate.
///
/// Neither is retryable: the caller has to supply different input.
#[derive(Debug, thiserror::Error)]
pub enum CertError {
    /// No PEM block was found, the block was malformed, or its payload was empty.
    #[error("certificate: no PEM data found")]
    NoPemData,
    /// The PEM payload is not a well-formed DER certificate.
    #[error("certificate: error while parsing: {0}")]
    CertificateParse(#[from] X509Error),
}

/// Algorithm of a certificate's subject public key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PublicKeyAlgorithm {
    Rsa,
    Dsa,
    Ecdsa,
    Ed25519,
    Ed448,
    /// Any other algorithm, by dotted OID.
    Unknown(String),
}

impl PublicKeyAlgorithm {
    fn from_oid(oid: String) -> Self {
        match oid.as_str() {
            OID_RSA => Self::Rsa,
            OID_DSA => Self::Dsa,
            OID_EC_PUBLIC_KEY => Self::Ecdsa,
            OID_ED25519 => Self::Ed25519,
            OID_ED448 => Self::Ed448,
            _ => Self::Unknown(oid),
        }
    }
}

impl fmt::Display for PublicKeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rsa => "RSA",
            Self::Dsa => "DSA",
            Self::Ecdsa => "ECDSA",
            Self::Ed25519 => "Ed25519",
            Self::Ed448 => "Ed448",
            Self::Unknown(oid) => oid,
        })
    }
}

/// A parsed X.509 certificate.
///
/// Only constructed from a certificate that parsed completely. Renders as its
/// [`X509Cert::summary`] in braces.
#[derive(Clone, PartialEq, Eq)]
pub struct X509Cert {
    subject_common_name: String,
    subject: String,
    issuer_common_name: String,
    issuer: String,
    dns_names: Vec<String>,
    public_key_algorithm: PublicKeyAlgorithm,
    signature_algorithm: String,
    serial: Vec<u8>,
    version: u32,
    not_before: DateTime<Utc>,
    not_after: DateTime<Utc>,
    der: Vec<u8>,
}

/// Parses the first PEM block of `content` as an X.509 certificate.
///
/// Text before the `-----BEGIN` line is skipped.
pub fn parse_certificate(content: &[u8]) -> Result<X509Cert, CertError> {
    let (_, pem) = parse_x509_pem(content).map_err(|_| CertError::NoPemData)?;
    if pem.contents.is_empty() {
        return Err(CertError::NoPemData);
    }
    X509Cert::from_der(&pem.contents)
}

impl X509Cert {
    /// Decodes a token (path, base64 or plaintext) and parses the certificate in it.
    pub fn from_token(token: impl AsRef<[u8]>) -> Result<Self, CertError> {
        parse_certificate(&decode(token))
    }

    /// Parses DER certificate bytes. Trailing bytes after the certificate are rejected.
    pub fn from_der(der: &[u8]) -> Result<Self, CertError> {
        let (rest, cert) = X509Certificate::from_der(der).map_err(parse_error)?;
        if !rest.is_empty() {
            return Err(X509Error::InvalidCertificate.into());
        }

        let dns_names = cert
            .subject_alternative_name()?
            .map(|ext| {
                ext.value
                    .general_names
                    .iter()
                    .filter_map(|name| match name {
                        GeneralName::DNSName(dns) => Some((*dns).to_string()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            subject_common_name: common_name(cert.subject()),
            subject: cert.subject().to_string(),
            issuer_common_name: common_name(cert.issuer()),
            issuer: cert.issuer().to_string(),
            dns_names,
            public_key_algorithm: PublicKeyAlgorithm::from_oid(
                cert.public_key().algorithm.algorithm.to_id_string(),
            ),
            signature_algorithm: cert.signature_algorithm.algorithm.to_id_string(),
            serial: cert.raw_serial().to_vec(),
            version: cert.version().0 + 1,
            not_before: instant(cert.validity().not_before.timestamp())?,
            not_after: instant(cert.validity().not_after.timestamp())?,
            der: der.to_vec(),
        })
    }

    pub fn subject_common_name(&self) -> &str {
        &self.subject_common_name
    }

    /// The full subject distinguished name.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer_common_name(&self) -> &str {
        &self.issuer_common_name
    }

    /// The full issuer distinguished name.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// DNS subject-alternative names, in certificate order.
    pub fn dns_names(&self) -> &[String] {
        &self.dns_names
    }

    pub fn public_key_algorithm(&self) -> &PublicKeyAlgorithm {
        &self.public_key_algorithm
    }

    /// Dotted OID of the signature algorithm.
    pub fn signature_algorithm(&self) -> &str {
        &self.signature_algorithm
    }

    /// Serial number as big-endian bytes.
    pub fn serial(&self) -> &[u8] {
        &self.serial
    }

    /// Serial number as lowercase hex.
    pub fn serial_hex(&self) -> String {
        self.serial.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// X.509 version number (3 for v3 certificates).
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn not_before(&self) -> DateTime<Utc> {
        self.not_before
    }

    pub fn not_after(&self) -> DateTime<Utc> {
        self.not_after
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Time left until expiry; negative once expired.
    pub fn valid_for(&self) -> TimeDelta {
        self.valid_for_at(Utc::now())
    }

    fn valid_for_at(&self, now: DateTime<Utc>) -> TimeDelta {
        self.not_after - now
    }

    /// One-line summary: subject CN, DNS names, issuer CN, key algorithm and
    /// remaining validity.
    ///
    /// The remaining validity is computed against the current time, so the
    /// output changes between calls.
    pub fn summary(&self) -> String {
        self.summary_at(Utc::now())
    }

    /// [`X509Cert::summary`] with validity computed against `now`.
    pub fn summary_at(&self, now: DateTime<Utc>) -> String {
        format!(
            "Subject={} | SAN={} | Issuer={} | Algorithm={} | ValidFor={}",
            self.subject_common_name,
            self.dns_names.render(),
            self.issuer_common_name,
            self.public_key_algorithm,
            self.valid_for_at(now).render(),
        )
    }
}

impl fmt::Display for X509Cert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl fmt::Debug for X509Cert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X509Cert")
            .field("subject", &self.subject)
            .field("issuer", &self.issuer)
            .field("dns_names", &self.dns_names)
            .field("serial", &self.serial_hex())
            .field("not_after", &self.not_after)
            .finish_non_exhaustive()
    }
}

impl Render for X509Cert {
    fn render(&self) -> String {
        render_display(self)
    }
}

impl FromStr for X509Cert {
    type Err = CertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s)
    }
}

fn common_name(name: &X509Name<'_>) -> String {
    name.iter_common_name()
        .next()
        .map(attribute_text)
        .unwrap_or_default()
}

/// Text of a name attribute. `as_str` covers the single-byte string types;
/// BMPString (UTF-16BE) and UniversalString (UTF-32BE) are decoded here,
/// TeletexString as Latin-1.
fn attribute_text(attr: &AttributeTypeAndValue<'_>) -> String {
    if let Ok(text) = attr.as_str() {
        return text.to_string();
    }
    let value = attr.attr_value();
    match value.tag() {
        Tag::BmpString => char::decode_utf16(
            value
                .data
                .chunks_exact(2)
                .map(|unit| u16::from_be_bytes([unit[0], unit[1]])),
        )
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect(),
        Tag::UniversalString => value
            .data
            .chunks_exact(4)
            .map(|unit| {
                char::from_u32(u32::from_be_bytes([unit[0], unit[1], unit[2], unit[3]]))
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect(),
        Tag::T61String => value.data.iter().map(|&b| char::from(b)).collect(),
        _ => String::new(),
    }
}

fn instant(timestamp: i64) -> Result<DateTime<Utc>, CertError> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or(CertError::CertificateParse(X509Error::InvalidCertificate))
}

fn parse_error(err: nom::Err<X509Error>) -> CertError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => CertError::CertificateParse(e),
        nom::Err::Incomplete(_) => CertError::CertificateParse(X509Error::InvalidCertificate),
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::de::{self, Deserialize, Deserializer};

    use super::X509Cert;

    impl<'de> Deserialize<'de> for X509Cert {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let token = String::deserialize(deserializer)?;
            X509Cert::from_token(token).map_err(de::Error::custom)
        }
    }
}
