//! Integration tests for certificate decoding.
//!
//! Certificates are minted with `rcgen` and fed through every token form the
//! decoder accepts: PEM text, base64 of PEM, and a path to a PEM file.

#![cfg(feature = "x509")]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{TimeZone, Utc};
use fieldscan::{parse_certificate, CertError, PublicKeyAlgorithm, Render, X509Cert};
use rcgen::{
    BasicConstraints, BmpString, Certificate, CertificateParams, DnType, DnValue, IsCa, KeyPair,
    SerialNumber, UniversalString,
};

struct Issued {
    pem: String,
    der: Vec<u8>,
}

fn ca() -> (Certificate, KeyPair) {
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    params
        .distinguished_name
        .push(DnType::CommonName, "Fieldscan Test CA");
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let key = KeyPair::generate().unwrap();
    let cert = params.self_signed(&key).unwrap();
    (cert, key)
}

fn leaf(names: &[&str]) -> Issued {
    let (ca_cert, ca_key) = ca();
    let names: Vec<String> = names.iter().map(ToString::to_string).collect();
    let mut params = CertificateParams::new(names).unwrap();
    params
        .distinguished_name
        .push(DnType::CommonName, "service.example.com");
    params.serial_number = Some(SerialNumber::from_slice(&[123]));
    params.not_before = rcgen::date_time_ymd(2024, 1, 1);
    params.not_after = rcgen::date_time_ymd(2030, 1, 1);
    let key = KeyPair::generate().unwrap();
    let cert = params.signed_by(&key, &ca_cert, &ca_key).unwrap();
    Issued {
        pem: cert.pem(),
        der: cert.der().to_vec(),
    }
}

#[test]
fn test_pem_text_is_parsed() {
    let issued = leaf(&["service.example.com", "api.example.com"]);
    let cert = X509Cert::from_token(&issued.pem).unwrap();

    assert_eq!(cert.subject_common_name(), "service.example.com");
    assert_eq!(cert.issuer_common_name(), "Fieldscan Test CA");
    assert_eq!(cert.dns_names(), ["service.example.com", "api.example.com"]);
    assert_eq!(cert.public_key_algorithm(), &PublicKeyAlgorithm::Ecdsa);
    assert_eq!(cert.serial_hex(), "7b");
    assert_eq!(cert.version(), 3);
    assert_eq!(cert.der(), issued.der.as_slice());
    assert_eq!(
        cert.not_after(),
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
    );
    assert!(cert.subject().contains("CN=service.example.com"));
}

#[test]
fn test_base64_of_pem_is_parsed() {
    let issued = leaf(&["b64.example.com"]);
    let token = STANDARD.encode(&issued.pem);
    let cert: X509Cert = token.parse().unwrap();
    assert_eq!(cert.dns_names(), ["b64.example.com"]);
}

#[test]
fn test_pem_file_is_parsed() {
    let issued = leaf(&["file.example.com"]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cert.pem");
    std::fs::write(&path, &issued.pem).unwrap();

    let cert = X509Cert::from_token(path.to_str().unwrap()).unwrap();
    assert_eq!(cert.subject_common_name(), "service.example.com");
}

#[test]
fn test_leading_text_before_pem_is_skipped() {
    let issued = leaf(&["bundle.example.com"]);
    let bundle = format!("subject=service.example.com\n{}", issued.pem);
    let cert = parse_certificate(bundle.as_bytes()).unwrap();
    assert_eq!(cert.dns_names(), ["bundle.example.com"]);
}

#[test]
fn test_summary_format() {
    let issued = leaf(&["service.example.com", "api.example.com"]);
    let cert = X509Cert::from_token(&issued.pem).unwrap();

    let now = Utc.with_ymd_and_hms(2029, 12, 30, 21, 0, 0).unwrap();
    assert_eq!(
        cert.summary_at(now),
        "Subject=service.example.com | SAN=[service.example.com, api.example.com] | \
         Issuer=Fieldscan Test CA | Algorithm=ECDSA | ValidFor=1d3h"
    );

    let summary = cert.summary();
    assert!(summary.contains("Subject=service.example.com"));
    assert!(summary.contains("Issuer=Fieldscan Test CA"));
    assert!(summary.contains("api.example.com"));

    let rendered = cert.render();
    assert!(rendered.starts_with("{Subject=service.example.com | SAN="));
    assert!(rendered.ends_with('}'));
}

#[test]
fn test_expired_certificate_has_negative_validity() {
    let issued = leaf(&["old.example.com"]);
    let cert = X509Cert::from_token(&issued.pem).unwrap();

    let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 1, 30).unwrap();
    assert!(cert.summary_at(now).ends_with("ValidFor=-1m30s"));
}

#[test]
fn test_certificate_without_san() {
    let (ca_cert, _) = ca();
    let cert = X509Cert::from_token(ca_cert.pem()).unwrap();
    assert!(cert.dns_names().is_empty());
    assert_eq!(cert.issuer_common_name(), "Fieldscan Test CA");
    assert!(cert.summary().contains("SAN=[] | "));
}

#[test]
fn test_ed25519_key_is_named() {
    let mut params = CertificateParams::new(vec!["ed.example.com".to_string()]).unwrap();
    params
        .distinguished_name
        .push(DnType::CommonName, "ed.example.com");
    let key = KeyPair::generate_for(&rcgen::PKCS_ED25519).unwrap();
    let cert = params.self_signed(&key).unwrap();

    let parsed = X509Cert::from_token(cert.pem()).unwrap();
    assert_eq!(parsed.public_key_algorithm(), &PublicKeyAlgorithm::Ed25519);
    assert!(parsed.summary().contains("Algorithm=Ed25519"));
}

#[test]
fn test_wide_string_common_names_are_decoded() {
    let mut ca_params = CertificateParams::new(Vec::<String>::new()).unwrap();
    ca_params.distinguished_name.push(
        DnType::CommonName,
        DnValue::UniversalString(UniversalString::try_from("Zertifizierungsstelle Ü").unwrap()),
    );
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let ca_key = KeyPair::generate().unwrap();
    let ca_cert = ca_params.self_signed(&ca_key).unwrap();

    let mut params = CertificateParams::new(vec!["wide.example.com".to_string()]).unwrap();
    params.distinguished_name.push(
        DnType::CommonName,
        DnValue::BmpString(BmpString::try_from("dienst-ä.example.com").unwrap()),
    );
    let key = KeyPair::generate().unwrap();
    let cert = params.signed_by(&key, &ca_cert, &ca_key).unwrap();

    let parsed = X509Cert::from_token(cert.pem()).unwrap();
    assert_eq!(parsed.subject_common_name(), "dienst-ä.example.com");
    assert_eq!(parsed.issuer_common_name(), "Zertifizierungsstelle Ü");
    assert!(parsed.summary().starts_with(
        "Subject=dienst-ä.example.com | SAN=[wide.example.com] | \
         Issuer=Zertifizierungsstelle Ü | "
    ));
}

#[test]
fn test_plain_text_has_no_pem_data() {
    let err = X509Cert::from_token("example file content").unwrap_err();
    assert!(matches!(err, CertError::NoPemData));
    assert_eq!(err.to_string(), "certificate: no PEM data found");
}

#[test]
fn test_trailing_der_bytes_are_rejected() {
    let issued = leaf(&["trailing.example.com"]);
    let mut der = issued.der;
    der.extend_from_slice(&[0, 0]);
    let pem = format!(
        "-----BEGIN CERTIFICATE-----\n{}\n-----END CERTIFICATE-----\n",
        STANDARD.encode(&der)
    );

    let err = parse_certificate(pem.as_bytes()).unwrap_err();
    assert!(matches!(err, CertError::CertificateParse(_)));
}

#[test]
fn test_only_first_block_is_used() {
    let first = leaf(&["first.example.com"]);
    let second = leaf(&["second.example.com"]);
    let chain = format!("{}{}", first.pem, second.pem);

    let cert = parse_certificate(chain.as_bytes()).unwrap();
    assert_eq!(cert.dns_names(), ["first.example.com"]);
}

#[cfg(feature = "serde")]
#[test]
fn test_certificate_deserializes_from_token() {
    #[derive(serde::Deserialize)]
    struct Tls {
        cert: X509Cert,
    }

    let issued = leaf(&["serde.example.com"]);
    let json = serde_json::json!({ "cert": STANDARD.encode(&issued.pem) });
    let tls: Tls = serde_json::from_value(json).unwrap();
    assert_eq!(tls.cert.dns_names(), ["serde.example.com"]);

    let bad = serde_json::json!({ "cert": "not a certificate" });
    let err = serde_json::from_value::<Tls>(bad).err().unwrap();
    assert!(err.to_string().contains("no PEM data found"));
}
