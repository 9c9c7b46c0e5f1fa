//! Test fixtures: freshly generated CA material written out as the
//! `.crt`/`.p12` folder layout the crate consumes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkcs12::Pkcs12;
use openssl::pkey::{PKey, Private};
use openssl::x509::extension::BasicConstraints;
use openssl::x509::{X509, X509Name};

const X509_VERSION_3: i32 = 2; // X509 version 3 is represented by 2
const TEST_KEY_BITS: u32 = 2048;

pub struct CaMaterial {
    pub key: PKey<Private>,
    pub cert: X509,
}

/// Generate a self-signed root CA.
pub fn root_ca(common_name: &str) -> Result<CaMaterial> {
    certificate(common_name, true, None)
}

/// Generate a certificate signed by `signer`.
pub fn issued_by(signer: &CaMaterial, common_name: &str) -> Result<CaMaterial> {
    certificate(common_name, false, Some(signer))
}

fn certificate(common_name: &str, ca: bool, signer: Option<&CaMaterial>) -> Result<CaMaterial> {
    let rsa = openssl::rsa::Rsa::generate(TEST_KEY_BITS)?;
    let key = PKey::from_rsa(rsa)?;

    let mut name_builder = X509Name::builder()?;
    name_builder.append_entry_by_nid(Nid::COMMONNAME, common_name)?;
    name_builder.append_entry_by_nid(Nid::ORGANIZATIONNAME, "Acme Networks")?;
    name_builder.append_entry_by_nid(Nid::ORGANIZATIONALUNITNAME, "Infrastructure")?;
    name_builder.append_entry_by_nid(Nid::COUNTRYNAME, "US")?;
    let name = name_builder.build();

    let mut builder = X509::builder()?;
    builder.set_version(X509_VERSION_3)?;

    let mut serial = BigNum::new()?;
    serial.rand(128, MsbOption::MAYBE_ZERO, false)?;
    let serial_int = serial.to_asn1_integer()?;
    builder.set_serial_number(&serial_int)?;

    builder.set_subject_name(&name)?;
    match signer {
        Some(signer) => builder.set_issuer_name(signer.cert.subject_name())?,
        None => builder.set_issuer_name(&name)?,
    }

    let not_before = Asn1Time::days_from_now(0)?;
    let not_after = Asn1Time::days_from_now(30)?;
    builder.set_not_before(&not_before)?;
    builder.set_not_after(&not_after)?;
    builder.set_pubkey(&key)?;

    if ca {
        let mut bc = BasicConstraints::new();
        bc.critical().ca();
        builder.append_extension(bc.build()?)?;
    }

    match signer {
        Some(signer) => builder.sign(&signer.key, MessageDigest::sha256())?,
        None => builder.sign(&key, MessageDigest::sha256())?,
    }

    Ok(CaMaterial {
        key,
        cert: builder.build(),
    })
}

/// Write `material` into `folder` as the standard pair layout:
/// `<name>.crt` (PEM) and `<name>.p12` (PKCS#12, empty password).
pub fn write_pair(folder: &Path, name: &str, material: &CaMaterial) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(folder)?;

    let crt_path = folder.join(format!("{}.crt", name));
    fs::write(&crt_path, material.cert.to_pem()?)?;

    let mut p12_builder = Pkcs12::builder();
    p12_builder.name(name);
    p12_builder.pkey(&material.key);
    p12_builder.cert(&material.cert);
    let p12 = p12_builder.build2("")?;

    let p12_path = folder.join(format!("{}.p12", name));
    fs::write(&p12_path, p12.to_der()?)?;

    Ok((crt_path, p12_path))
}
