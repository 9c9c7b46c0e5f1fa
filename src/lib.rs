//! certkit - File-backed X.509 certificates and issuer resolution
//!
//! Models certificates stored on disk as `.crt`/`.p12` file pairs and
//! resolves which certificate issued which by comparing distinguished names
//! against directories of candidate authorities.
//!
//! # Overview
//!
//! Certificate authority material lives in a folder-per-certificate layout:
//!
//! ```text
//! authorities/
//!   root-ca/
//!     root-ca.crt          (public certificate)
//!     root-ca.p12          (private bundle)
//!   issuing-ca/
//!     issuing-ca.crt
//!     issuing-ca.p12
//! ```
//!
//! Given a certificate, [`Certificate::find_issuer`] scans such directories
//! and returns the certificate whose subject matches this certificate's
//! issuer. Nothing here validates signatures, expiry or revocation; the
//! crate establishes structural issuer/subject correspondence only.
//!
//! # Quick Start
//!
//! ```no_run
//! use certkit::{Certificate, CertificateFile};
//! use std::path::PathBuf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let certificate = CertificateFile::new(
//!         "certificates/signed/opensearch/opensearch.crt",
//!         "certificates/signed/opensearch/opensearch.p12",
//!     );
//!
//!     println!("subject: {}", certificate.subject()?);
//!     println!("issuer:  {}", certificate.issuer()?);
//!
//!     if !certificate.is_self_signed()? {
//!         let issuer = certificate.find_issuer(&[PathBuf::from("certificates/authorities")])?;
//!         println!("issued by {}", issuer.crt_path().display());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! ## [`distinguished_name`]
//!
//! The [`DistinguishedName`] value type: parses `CN=..., O=..., OU=...`
//! strings (either `,` or `;` between entries), exposes the typed attributes,
//! and builds canonical names from parts.
//!
//! ```
//! use certkit::DistinguishedName;
//!
//! let dn = DistinguishedName::new("CN=My Root CA, O=Skyline Communications, C=BE");
//! assert_eq!(dn.common_name(), "My Root CA");
//! assert_eq!(dn.country_name(), "BE");
//! ```
//!
//! ## [`certificate`]
//!
//! The [`Certificate`] contract and its file-backed implementation
//! [`CertificateFile`]. Certificate bytes are loaded lazily on first subject
//! or issuer access and released when the value is dropped.
//!
//! ## [`store`]
//!
//! The folder-per-certificate layout contract ([`find_certificate_pair`])
//! and [`CertificateStore`], which enumerates a signed-certificates tree and
//! resolves issuers against configured authority directories.
//!
//! ## [`config`]
//!
//! TOML-backed [`StoreConfig`] naming the signed-certificates root and the
//! ordered authority directories.
//!
//! # Equality policy
//!
//! Distinguished names compare by raw string identity: `==` is true only for
//! character-for-character equal names, and issuer resolution matches on
//! that basis. [`DistinguishedName::semantically_eq`] is available when
//! entry order and spacing should not matter.

pub mod certificate;
pub mod config;
pub mod distinguished_name;
pub mod error;
pub mod store;

pub use certificate::{Certificate, CertificateFile};
pub use config::StoreConfig;
pub use distinguished_name::{DistinguishedName, DistinguishedNameBuilder};
pub use error::{Error, Result};
pub use store::{find_certificate_pair, CertificateStore, CRT_EXTENSION, P12_EXTENSION};
