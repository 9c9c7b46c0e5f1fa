use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Store layout configuration.
///
/// Read from a TOML file; every key is optional:
///
/// ```toml
/// signed_certificates_path = "certificates/signed"
/// certificate_authorities = [
///     "certificates/authorities",
///     "certificates/legacy-authorities",
/// ]
/// ```
///
/// The order of `certificate_authorities` is significant: issuer resolution
/// searches each directory completely before moving to the next.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_signed_certificates_path")]
    pub signed_certificates_path: PathBuf,
    #[serde(default = "default_certificate_authorities")]
    pub certificate_authorities: Vec<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            signed_certificates_path: default_signed_certificates_path(),
            certificate_authorities: default_certificate_authorities(),
        }
    }
}

fn default_signed_certificates_path() -> PathBuf {
    PathBuf::from("certificates/signed")
}

fn default_certificate_authorities() -> Vec<PathBuf> {
    vec![PathBuf::from("certificates/authorities")]
}

impl StoreConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let config_str = fs::read_to_string(path).map_err(|source| Error::Io {
            path: PathBuf::from(path),
            source,
        })?;

        let config = toml::from_str(&config_str).map_err(|source| Error::InvalidConfig {
            path: PathBuf::from(path),
            source,
        })?;

        Ok(config)
    }

    /// Load configuration from the default path (certkit.toml).
    pub fn load() -> Result<Self> {
        Self::from_file("certkit.toml")
    }
}
