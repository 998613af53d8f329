// hbin-core/src/paths.rs
use std::path::{Path, PathBuf};

use hbin_aio::fs::create_dir_all;
use hbin_common::config::Config;
use hbin_common::error::Result;

/// Per-product install locations derived from [`Config`].
#[derive(Debug, Clone)]
pub struct InstallPaths {
    config: Config,
}

impl InstallPaths {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Directory holding every installed version of `product`, created if
    /// missing.
    pub fn bin_dir(&self, product: &str) -> Result<PathBuf> {
        let dir = self.config.product_dir(product);
        if !dir.is_dir() {
            create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// `<install_root>/versions/<product>`. Pure; see [`Self::bin_dir`].
    pub fn product_dir(&self, product: &str) -> PathBuf {
        self.config.product_dir(product)
    }

    /// Where `version` of `product` lives once installed. Pure.
    pub fn version_path(&self, product: &str, version: &str) -> PathBuf {
        self.config.version_path(product, version)
    }

    /// The stable active-version path for `product`. Need not exist.
    pub fn link_path(&self, product: &str) -> PathBuf {
        self.config.link_path(product)
    }

    pub fn ensure_link_dir(&self) -> Result<&Path> {
        let dir = self.config.link_dir();
        if !dir.is_dir() {
            create_dir_all(dir)?;
        }
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_dir_is_created_on_demand() {
        let root = tempfile::tempdir().unwrap();
        let paths = InstallPaths::new(Config::with_root(root.path()));

        let expected = root.path().join("versions").join("tool");
        assert!(!expected.exists());
        assert_eq!(
            paths.version_path("tool", "1.0.0"),
            expected.join("1.0.0")
        );
        assert_eq!(paths.product_dir("tool"), expected);
        assert!(!expected.exists());
        assert_eq!(paths.bin_dir("tool").unwrap(), expected);
        assert!(expected.is_dir());
    }

    #[test]
    fn link_path_is_pure() {
        let root = tempfile::tempdir().unwrap();
        let paths = InstallPaths::new(Config::with_root(root.path()));
        assert_eq!(paths.link_path("tool"), root.path().join("bin").join("tool"));
        assert!(!root.path().join("bin").exists());
        paths.ensure_link_dir().unwrap();
        assert!(root.path().join("bin").is_dir());
    }

    #[test]
    fn bin_dir_creation_failure_is_io() {
        let root = tempfile::tempdir().unwrap();
        // A file where the versions directory should be.
        std::fs::write(root.path().join("versions"), b"").unwrap();
        let paths = InstallPaths::new(Config::with_root(root.path()));
        let err = paths.bin_dir("tool").unwrap_err();
        assert_eq!(err.kind(), hbin_common::ErrorKind::Io);
    }
}
