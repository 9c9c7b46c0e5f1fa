//! Certificate folder scanning and the configured certificate store.
//!
//! The on-disk layout contract is a folder per certificate, each folder
//! holding exactly one public certificate (`.crt`) and exactly one private
//! bundle (`.p12`). [`CertificateStore`] applies that contract to a
//! configured tree: a root of signed certificates plus an ordered list of
//! authority directories to resolve issuers against.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::certificate::{Certificate, CertificateFile};
use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// File extension of the public certificate in a certificate folder.
pub const CRT_EXTENSION: &str = "crt";

/// File extension of the private bundle in a certificate folder.
pub const P12_EXTENSION: &str = "p12";

/// Locate the certificate pair in a folder, if the folder holds one.
///
/// A folder qualifies iff it contains exactly one `.crt` file and exactly
/// one `.p12` file. An incomplete folder (either file missing, or more than
/// one of either) yields `Ok(None)` so directory scans can pass it over;
/// only a folder that cannot be read at all is an error.
pub fn find_certificate_pair(dir: &Path) -> Result<Option<(PathBuf, PathBuf)>> {
    let mut crt_files = Vec::new();
    let mut p12_files = Vec::new();

    for file in files(dir)? {
        match file.extension().and_then(OsStr::to_str) {
            Some(CRT_EXTENSION) => crt_files.push(file),
            Some(P12_EXTENSION) => p12_files.push(file),
            _ => {}
        }
    }

    if crt_files.len() == 1 && p12_files.len() == 1 {
        Ok(Some((crt_files.remove(0), p12_files.remove(0))))
    } else {
        Ok(None)
    }
}

/// Like [`find_certificate_pair`], but an incomplete folder is an error.
///
/// # Errors
/// [`Error::PairNotFound`] when the folder is readable but does not hold
/// exactly one `.crt` and one `.p12` file.
pub fn certificate_pair(dir: &Path) -> Result<(PathBuf, PathBuf)> {
    find_certificate_pair(dir)?.ok_or_else(|| Error::PairNotFound {
        dir: dir.to_path_buf(),
    })
}

// Immediate subdirectories in filesystem enumeration order. No re-sort: the
// order certificates are visited in is whatever the filesystem reports.
pub(crate) fn subdirectories(path: &Path) -> Result<Vec<PathBuf>> {
    read_entries(path, |p| p.is_dir())
}

fn files(path: &Path) -> Result<Vec<PathBuf>> {
    read_entries(path, |p| p.is_file())
}

fn read_entries(path: &Path, keep: fn(&Path) -> bool) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entry_path = entry.path();
        if keep(&entry_path) {
            paths.push(entry_path);
        }
    }
    Ok(paths)
}

/// A configured tree of signed certificates and authority directories.
pub struct CertificateStore {
    config: StoreConfig,
}

impl CertificateStore {
    /// Create a store over the given configuration.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Create a store from a TOML configuration file.
    pub fn from_config_file(path: &str) -> Result<Self> {
        Ok(Self::new(StoreConfig::from_file(path)?))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Every certificate stored under the signed-certificates root.
    ///
    /// Visits each immediate subfolder of the root and wraps the ones that
    /// hold a complete pair; incomplete folders are skipped.
    pub fn certificates(&self) -> Result<Vec<CertificateFile>> {
        let mut certificates = Vec::new();
        for folder in subdirectories(&self.config.signed_certificates_path)? {
            match find_certificate_pair(&folder)? {
                Some((crt, p12)) => certificates.push(CertificateFile::new(crt, p12)),
                None => debug!(folder = %folder.display(), "no complete certificate pair, skipping"),
            }
        }
        Ok(certificates)
    }

    /// The certificate stored in the named folder under the root.
    ///
    /// # Errors
    /// [`Error::PairNotFound`] if the folder does not hold a complete pair,
    /// [`Error::Io`] if it cannot be read.
    pub fn certificate(&self, folder_name: &str) -> Result<CertificateFile> {
        let folder = self.config.signed_certificates_path.join(folder_name);
        let (crt, p12) = certificate_pair(&folder)?;
        Ok(CertificateFile::new(crt, p12))
    }

    /// Resolve a certificate's issuer against the configured authority
    /// directories, in their configured order.
    pub fn find_issuer_of(&self, certificate: &dyn Certificate) -> Result<Box<dyn Certificate>> {
        certificate.find_issuer(&self.config.certificate_authorities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs::File;

    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn detects_a_complete_certificate_pair() {
        let dir = TempDir::new().unwrap();
        let crt = touch(dir.path(), "server.crt");
        let p12 = touch(dir.path(), "server.p12");
        touch(dir.path(), "notes.txt");

        let pair = find_certificate_pair(dir.path()).unwrap();
        assert_eq!(pair, Some((crt, p12)));
    }

    #[test]
    fn folder_without_a_bundle_is_not_a_pair() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "server.crt");

        assert_eq!(find_certificate_pair(dir.path()).unwrap(), None);
    }

    #[test]
    fn folder_without_a_certificate_is_not_a_pair() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "server.p12");

        assert_eq!(find_certificate_pair(dir.path()).unwrap(), None);
    }

    #[test]
    fn more_than_one_certificate_disqualifies_the_folder() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "old.crt");
        touch(dir.path(), "new.crt");
        touch(dir.path(), "server.p12");

        assert_eq!(find_certificate_pair(dir.path()).unwrap(), None);
    }

    #[test]
    fn unreadable_folder_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = find_certificate_pair(&missing);
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn strict_lookup_reports_the_incomplete_folder() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "server.crt");

        match certificate_pair(dir.path()) {
            Err(Error::PairNotFound { dir: reported }) => assert_eq!(reported, dir.path()),
            other => panic!("expected PairNotFound, got {:?}", other.map(|_| ())),
        }
    }
}
