//! File-backed certificates and issuer resolution.
//!
//! A certificate on disk is a pair of files: the public certificate (`.crt`)
//! and the private bundle (`.p12`). [`CertificateFile`] wraps such a pair and
//! exposes the subject and issuer distinguished names, loading and decoding
//! the certificate bytes only when one of them is first asked for.
//!
//! Issuer resolution walks a set of candidate authority directories laid out
//! folder-per-certificate:
//!
//! ```text
//! authorities/
//!   root-ca/
//!     root-ca.crt
//!     root-ca.p12
//!   issuing-ca/
//!     issuing-ca.crt
//!     issuing-ca.p12
//! ```
//!
//! and returns the first candidate whose subject matches this certificate's
//! issuer.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use openssl::error::ErrorStack;
use openssl::x509::{X509, X509NameRef};
use tracing::{debug, trace};

use crate::distinguished_name::DistinguishedName;
use crate::error::{Error, Result};
use crate::store;

/// The capability set of a certificate backed by a file pair.
///
/// One concrete implementor exists, [`CertificateFile`]; the trait is the
/// public contract so callers can hold certificates without naming the
/// backing type.
pub trait Certificate {
    /// Full path of the public certificate file.
    fn crt_path(&self) -> &Path;

    /// Full path of the private bundle file.
    fn p12_path(&self) -> &Path;

    /// The distinguished name this certificate was issued to.
    fn subject(&self) -> Result<&DistinguishedName>;

    /// The distinguished name of the authority that signed this certificate.
    fn issuer(&self) -> Result<&DistinguishedName>;

    /// Whether the certificate signed itself (issuer equals subject).
    fn is_self_signed(&self) -> Result<bool> {
        Ok(self.issuer()? == self.subject()?)
    }

    /// Locate the certificate of this certificate's issuer.
    ///
    /// Searches `authority_dirs` in the order given; within a directory its
    /// immediate subfolders are visited in filesystem enumeration order.
    /// A subfolder qualifies only when it holds exactly one `.crt` and
    /// exactly one `.p12` file; anything else is skipped. The first
    /// candidate whose subject equals this certificate's issuer wins.
    ///
    /// Should only be called on certificates that are not
    /// [self-signed](Certificate::is_self_signed): a self-signed certificate
    /// names itself as issuer, so the search only succeeds if its own folder
    /// happens to be among the candidates.
    ///
    /// # Errors
    /// - [`Error::IssuerNotFound`] when every candidate directory is
    ///   exhausted without a match; carries the issuer name sought.
    /// - [`Error::Io`] when a candidate directory itself cannot be read.
    ///   A missing directory is an error, not an empty result.
    /// - [`Error::CertificateParse`] when a candidate pair exists but its
    ///   certificate cannot be decoded.
    fn find_issuer(&self, authority_dirs: &[PathBuf]) -> Result<Box<dyn Certificate>>;
}

/// A certificate stored as a `.crt`/`.p12` file pair.
///
/// Construction records the paths and touches nothing; the certificate bytes
/// are read and decoded once, on first subject or issuer access, and the
/// decoded handle stays owned by this value until it is dropped.
pub struct CertificateFile {
    crt_path: PathBuf,
    p12_path: PathBuf,
    x509: OnceCell<X509>,
    subject: OnceCell<DistinguishedName>,
    issuer: OnceCell<DistinguishedName>,
}

impl CertificateFile {
    /// Wrap an on-disk certificate pair. Does not read the files.
    pub fn new(crt_path: impl Into<PathBuf>, p12_path: impl Into<PathBuf>) -> Self {
        Self {
            crt_path: crt_path.into(),
            p12_path: p12_path.into(),
            x509: OnceCell::new(),
            subject: OnceCell::new(),
            issuer: OnceCell::new(),
        }
    }

    // Loads and decodes the certificate at most once. The .crt file may be
    // PEM or DER encoded.
    fn x509(&self) -> Result<&X509> {
        self.x509.get_or_try_init(|| {
            let bytes = fs::read(&self.crt_path).map_err(|source| Error::Io {
                path: self.crt_path.clone(),
                source,
            })?;
            X509::from_pem(&bytes)
                .or_else(|_| X509::from_der(&bytes))
                .map_err(|source| Error::CertificateParse {
                    path: self.crt_path.clone(),
                    source,
                })
        })
    }

    fn parsed_name<'a>(
        &'a self,
        cell: &'a OnceCell<DistinguishedName>,
        pick: fn(&X509) -> &X509NameRef,
    ) -> Result<&'a DistinguishedName> {
        cell.get_or_try_init(|| {
            let raw = render_name(pick(self.x509()?)).map_err(|source| Error::CertificateParse {
                path: self.crt_path.clone(),
                source,
            })?;
            Ok(DistinguishedName::new(raw))
        })
    }
}

impl Certificate for CertificateFile {
    fn crt_path(&self) -> &Path {
        &self.crt_path
    }

    fn p12_path(&self) -> &Path {
        &self.p12_path
    }

    fn subject(&self) -> Result<&DistinguishedName> {
        self.parsed_name(&self.subject, |x509| x509.subject_name())
    }

    fn issuer(&self) -> Result<&DistinguishedName> {
        self.parsed_name(&self.issuer, |x509| x509.issuer_name())
    }

    fn find_issuer(&self, authority_dirs: &[PathBuf]) -> Result<Box<dyn Certificate>> {
        let issuer = self.issuer()?;
        debug!(issuer = %issuer, "searching authority directories for issuer certificate");

        for dir in authority_dirs {
            for folder in store::subdirectories(dir)? {
                let Some((crt, p12)) = store::find_certificate_pair(&folder)? else {
                    trace!(folder = %folder.display(), "no complete certificate pair, skipping");
                    continue;
                };

                let candidate = CertificateFile::new(crt, p12);
                if candidate.subject()? == issuer {
                    debug!(crt = %candidate.crt_path.display(), "issuer certificate found");
                    return Ok(Box::new(candidate));
                }
            }
        }

        Err(Error::IssuerNotFound {
            issuer: issuer.value().to_string(),
        })
    }
}

// Renders an X.509 name the same way it is parsed back: KEY=value entries in
// certificate order, joined with ", ".
fn render_name(name: &X509NameRef) -> Result<String, ErrorStack> {
    let mut parts = Vec::new();
    for entry in name.entries() {
        let key = entry.object().nid().short_name()?;
        let value = entry.data().as_utf8()?;
        parts.push(format!("{}={}", key, &*value));
    }
    Ok(parts.join(", "))
}
