// hbin-net/src/catalog.rs
//! Release catalog lookups against a HashiCorp-style release site.
//!
//! `<base>/<product>/index.json` lists every published version, and
//! `<base>/<product>/<version>/index.json` lists the builds of one version.
use std::collections::BTreeMap;

use hbin_common::config::Config;
use hbin_common::error::{HbinError, Result};
use hbin_common::model::{compare_versions, BuildDescriptor};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::http::Fetcher;
use crate::platform::Platform;

#[derive(Debug, Clone, Deserialize)]
pub struct VersionIndex {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub shasums: Option<String>,
    #[serde(default)]
    pub builds: Vec<BuildDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductIndex {
    pub name: String,
    #[serde(default)]
    pub versions: BTreeMap<String, serde_json::Value>,
}

pub struct ReleaseCatalog<F: Fetcher> {
    fetcher: F,
    releases_url: String,
}

impl<F: Fetcher> ReleaseCatalog<F> {
    pub fn new(fetcher: F, config: &Config) -> Self {
        Self {
            fetcher,
            releases_url: config.releases_url.clone(),
        }
    }

    pub fn version_index(&self, product: &str, version: &str) -> Result<VersionIndex> {
        let url = format!("{}/{}/{}/index.json", self.releases_url, product, version);
        debug!("Fetching version index: {}", url);
        let bytes = self.fetcher.fetch(&url)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Resolves the build of `product` `version` for `platform`.
    pub fn resolve(&self, product: &str, version: &str, platform: &Platform) -> Result<BuildDescriptor> {
        let index = self.version_index(product, version)?;
        if index.name != product || index.version != version {
            warn!(
                "Catalog returned {} {} when asked for {} {}",
                index.name, index.version, product, version
            );
        }
        index
            .builds
            .into_iter()
            .find(|b| b.os == platform.os && b.arch == platform.arch)
            .map(|build| {
                debug!("Resolved {} {} for {} -> {}", product, version, platform, build.url);
                build
            })
            .ok_or_else(|| {
                HbinError::NotFound(format!(
                    "No {product} {version} build published for {platform}"
                ))
            })
    }

    /// Published versions of `product`, newest first.
    pub fn versions(&self, product: &str) -> Result<Vec<String>> {
        let url = format!("{}/{}/index.json", self.releases_url, product);
        debug!("Fetching product index: {}", url);
        let bytes = self.fetcher.fetch(&url)?;
        let index: ProductIndex = serde_json::from_slice(&bytes)?;
        let mut versions: Vec<String> = index.versions.into_keys().collect();
        versions.sort_by(|a, b| compare_versions(b, a));
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct MapFetcher(HashMap<String, String>);

    impl Fetcher for MapFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.0
                .get(url)
                .map(|body| body.clone().into_bytes())
                .ok_or_else(|| HbinError::Transport(format!("HTTP error 404 Not Found for URL {url}")))
        }
    }

    fn catalog() -> ReleaseCatalog<MapFetcher> {
        let mut pages = HashMap::new();
        pages.insert(
            "https://releases.example.com/tool/1.0.0/index.json".to_string(),
            r#"{
                "name": "tool",
                "version": "1.0.0",
                "shasums": "tool_1.0.0_SHA256SUMS",
                "builds": [
                    {"name": "tool", "version": "1.0.0", "os": "linux", "arch": "amd64",
                     "filename": "tool_1.0.0_linux_amd64.zip",
                     "url": "https://releases.example.com/tool/1.0.0/tool_1.0.0_linux_amd64.zip"},
                    {"name": "tool", "version": "1.0.0", "os": "darwin", "arch": "arm64",
                     "filename": "tool_1.0.0_darwin_arm64.zip",
                     "url": "https://releases.example.com/tool/1.0.0/tool_1.0.0_darwin_arm64.zip"}
                ]
            }"#
            .to_string(),
        );
        pages.insert(
            "https://releases.example.com/tool/index.json".to_string(),
            r#"{"name": "tool", "versions": {"0.9.0": {}, "1.10.0": {}, "1.2.0": {}, "1.2.0-rc1": {}}}"#
                .to_string(),
        );
        let mut config = Config::with_root("/tmp/hbin-test");
        config.releases_url = "https://releases.example.com".to_string();
        ReleaseCatalog::new(MapFetcher(pages), &config)
    }

    #[test]
    fn resolves_the_build_for_the_platform() {
        let build = catalog()
            .resolve("tool", "1.0.0", &Platform::new("darwin", "arm64"))
            .unwrap();
        assert_eq!(build.filename, "tool_1.0.0_darwin_arm64.zip");
        assert_eq!(build.product, "tool");
    }

    #[test]
    fn unknown_platform_is_not_found() {
        let err = catalog()
            .resolve("tool", "1.0.0", &Platform::new("windows", "386"))
            .unwrap_err();
        assert!(matches!(err, HbinError::NotFound(_)));
    }

    #[test]
    fn unpublished_version_surfaces_the_transport_error() {
        let err = catalog()
            .resolve("tool", "9.9.9", &Platform::new("linux", "amd64"))
            .unwrap_err();
        assert!(matches!(err, HbinError::Transport(_)));
    }

    #[test]
    fn versions_are_listed_newest_first() {
        assert_eq!(
            catalog().versions("tool").unwrap(),
            ["1.10.0", "1.2.0", "1.2.0-rc1", "0.9.0"]
        );
    }
}
