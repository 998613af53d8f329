// hbin-net/src/shasums.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hbin_aio::checksum::parse_shasums;
use hbin_common::config::Config;
use hbin_common::error::Result;
use hbin_common::model::BuildDescriptor;
use tracing::debug;

use crate::http::Fetcher;

/// Supplies the expected SHA-256 for a release artifact.
pub trait ChecksumSource {
    /// `Ok(None)` when the source has no digest for `build.filename`.
    fn expected_sha256(&self, build: &BuildDescriptor) -> Result<Option<String>>;
}

impl<T: ChecksumSource + ?Sized> ChecksumSource for &T {
    fn expected_sha256(&self, build: &BuildDescriptor) -> Result<Option<String>> {
        (**self).expected_sha256(build)
    }
}

/// Digests parsed from a `SHA256SUMS` file, keyed by artifact filename.
#[derive(Debug, Clone, Default)]
pub struct ShasumsManifest {
    sums: HashMap<String, String>,
}

impl ShasumsManifest {
    pub fn parse(text: &str) -> Self {
        Self {
            sums: parse_shasums(text),
        }
    }

    pub fn insert(&mut self, filename: impl Into<String>, sha256: impl Into<String>) {
        self.sums
            .insert(filename.into(), sha256.into().to_ascii_lowercase());
    }

    pub fn get(&self, filename: &str) -> Option<&str> {
        self.sums.get(filename).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}

impl ChecksumSource for ShasumsManifest {
    fn expected_sha256(&self, build: &BuildDescriptor) -> Result<Option<String>> {
        Ok(self.get(&build.filename).map(str::to_string))
    }
}

/// Fetches `<product>_<version>_SHA256SUMS` next to the release artifacts and
/// remembers each manifest for the lifetime of the value.
pub struct RemoteShasums<F: Fetcher> {
    fetcher: F,
    releases_url: String,
    manifests: Mutex<HashMap<(String, String), Arc<ShasumsManifest>>>,
}

impl<F: Fetcher> RemoteShasums<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            releases_url: config.releases_url.clone(),
            manifests: Mutex::new(HashMap::new()),
        }
    }

    pub fn manifest_url(&self, product: &str, version: &str) -> String {
        format!(
            "{}/{}/{}/{}_{}_SHA256SUMS",
            self.releases_url, product, version, product, version
        )
    }

    fn manifest_for(&self, product: &str, version: &str) -> Result<Arc<ShasumsManifest>> {
        let key = (product.to_string(), version.to_string());
        let mut manifests = self
            .manifests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(manifest) = manifests.get(&key) {
            debug!("Using cached SHA256SUMS for {} {}", product, version);
            return Ok(Arc::clone(manifest));
        }

        let url = self.manifest_url(product, version);
        debug!("Fetching SHA256SUMS manifest: {}", url);
        let bytes = self.fetcher.fetch(&url)?;
        let text = String::from_utf8_lossy(&bytes);
        let manifest = Arc::new(ShasumsManifest::parse(&text));
        manifests.insert(key, Arc::clone(&manifest));
        Ok(manifest)
    }
}

impl<F: Fetcher> ChecksumSource for RemoteShasums<F> {
    fn expected_sha256(&self, build: &BuildDescriptor) -> Result<Option<String>> {
        let manifest = self.manifest_for(&build.product, &build.version)?;
        Ok(manifest.get(&build.filename).map(str::to_string))
    }
}
