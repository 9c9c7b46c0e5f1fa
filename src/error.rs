use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by certificate and distinguished-name operations.
///
/// Every variant is deterministic for a given input; nothing in this crate
/// retries. `IssuerNotFound` is the expected outcome of searching an
/// incomplete authority tree and carries the issuer name that was sought so
/// the caller can report which authority is missing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("at least one distinguished name field has to be provided")]
    EmptyDistinguishedName,

    #[error("failed to load certificate {}", .path.display())]
    CertificateParse {
        path: PathBuf,
        #[source]
        source: openssl::error::ErrorStack,
    },

    #[error("no certificate found for issuer {issuer}")]
    IssuerNotFound { issuer: String },

    #[error("no .crt/.p12 certificate pair found in {}", .dir.display())]
    PairNotFound { dir: PathBuf },

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
