// hbin-common/src/config.rs
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;
use tracing::debug;

use super::error::{HbinError, Result};

// Used when neither HBIN_ROOT nor a home directory can be determined.
const DEFAULT_FALLBACK_ROOT: &str = "/usr/local/hbin";
const DEFAULT_RELEASES_URL: &str = "https://releases.hashicorp.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub install_root: PathBuf,
    pub link_dir: PathBuf,
    pub releases_url: String,
    pub http_timeout: Duration,
    pub allow_insecure: bool,
    pub os_override: Option<String>,
    pub arch_override: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        debug!("Loading hbin configuration");

        let install_root = match env::var("HBIN_ROOT").ok().filter(|s| !s.is_empty()) {
            Some(root) => PathBuf::from(root),
            None => BaseDirs::new()
                .map(|base| base.home_dir().join(".hbin"))
                .unwrap_or_else(|| {
                    debug!(
                        "HBIN_ROOT not set and no home directory found, falling back to default: {}",
                        DEFAULT_FALLBACK_ROOT
                    );
                    PathBuf::from(DEFAULT_FALLBACK_ROOT)
                }),
        };
        let install_root = absolutize(install_root)?;
        debug!("Effective install root: {}", install_root.display());

        let link_dir = env::var("HBIN_LINK_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| install_root.join("bin"));
        let link_dir = absolutize(link_dir)?;
        debug!("Effective link directory: {}", link_dir.display());

        let releases_url = env::var("HBIN_RELEASES_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_RELEASES_URL.to_string());

        let http_timeout = match env::var("HBIN_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| {
                HbinError::Config(format!(
                    "HBIN_HTTP_TIMEOUT_SECS must be a number of seconds, got '{raw}': {e}"
                ))
            })?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let allow_insecure = env::var("HBIN_ALLOW_INSECURE").is_ok_and(|v| v == "1");
        let os_override = env::var("HBIN_OS").ok().filter(|s| !s.is_empty());
        let arch_override = env::var("HBIN_ARCH").ok().filter(|s| !s.is_empty());

        debug!("Configuration loaded successfully.");
        Ok(Self {
            install_root,
            link_dir,
            releases_url: releases_url.trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(http_timeout),
            allow_insecure,
            os_override,
            arch_override,
        })
    }

    /// Builds a configuration rooted at `root` without reading the environment.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let install_root = root.into();
        Self {
            link_dir: install_root.join("bin"),
            install_root,
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            allow_insecure: false,
            os_override: None,
            arch_override: None,
        }
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.install_root.join("versions")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.install_root.join("logs")
    }

    pub fn link_dir(&self) -> &Path {
        &self.link_dir
    }

    pub fn product_dir(&self, product: &str) -> PathBuf {
        self.versions_dir().join(product)
    }

    pub fn version_path(&self, product: &str, version: &str) -> PathBuf {
        self.product_dir(product).join(version)
    }

    pub fn link_path(&self, product: &str) -> PathBuf {
        self.link_dir.join(product)
    }

    pub fn product_releases_url(&self, product: &str) -> String {
        format!("{}/{}", self.releases_url, product)
    }

    pub fn version_releases_url(&self, product: &str, version: &str) -> String {
        format!("{}/{}/{}", self.releases_url, product, version)
    }
}

// Symlinks store the version path verbatim, so it must not depend on the
// working directory of a later invocation.
fn absolutize(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(env::current_dir()?.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_the_install_root() {
        let config = Config::with_root("/tmp/hbin-root");
        assert_eq!(
            config.version_path("tool", "1.0.0"),
            PathBuf::from("/tmp/hbin-root/versions/tool/1.0.0")
        );
        assert_eq!(
            config.link_path("tool"),
            PathBuf::from("/tmp/hbin-root/bin/tool")
        );
        assert_eq!(config.logs_dir(), PathBuf::from("/tmp/hbin-root/logs"));
    }

    #[test]
    fn release_urls_are_product_scoped() {
        let mut config = Config::with_root("/tmp/hbin-root");
        config.releases_url = "https://mirror.example.com".to_string();
        assert_eq!(
            config.version_releases_url("tool", "1.2.3"),
            "https://mirror.example.com/tool/1.2.3"
        );
        assert_eq!(
            config.product_releases_url("tool"),
            "https://mirror.example.com/tool"
        );
    }
}
