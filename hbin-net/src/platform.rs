// hbin-net/src/platform.rs
use std::fmt;

use hbin_common::config::Config;
use hbin_common::model::BuildDescriptor;

/// Operating system and architecture names as used in release file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this binary was built for.
    pub fn current() -> Self {
        Self::new(
            release_os_name(std::env::consts::OS),
            release_arch_name(std::env::consts::ARCH),
        )
    }

    /// The current platform with any `HBIN_OS` / `HBIN_ARCH` overrides applied.
    pub fn from_config(config: &Config) -> Self {
        let current = Self::current();
        Self {
            os: config.os_override.clone().unwrap_or(current.os),
            arch: config.arch_override.clone().unwrap_or(current.arch),
        }
    }

    /// The descriptor a release site publishes for `product` `version` on this
    /// platform, built from the naming convention alone. Enough for operations
    /// that never download, such as activating or removing a version.
    pub fn conventional_build(&self, config: &Config, product: &str, version: &str) -> BuildDescriptor {
        let filename = format!("{product}_{version}_{}_{}.zip", self.os, self.arch);
        let url = format!("{}/{}", config.version_releases_url(product, version), filename);
        BuildDescriptor::new(product, version, &self.os, &self.arch, filename, url)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

fn release_os_name(os: &str) -> String {
    match os {
        "macos" => "darwin",
        other => other,
    }
    .to_string()
}

fn release_arch_name(arch: &str) -> String {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_build_follows_release_naming() {
        let config = Config::with_root("/tmp/hbin-root");
        let build = Platform::new("linux", "amd64").conventional_build(&config, "terraform", "1.5.7");
        assert_eq!(build.filename, "terraform_1.5.7_linux_amd64.zip");
        assert_eq!(
            build.url,
            "https://releases.hashicorp.com/terraform/1.5.7/terraform_1.5.7_linux_amd64.zip"
        );
    }

    #[test]
    fn rust_names_map_to_release_names() {
        assert_eq!(release_os_name("macos"), "darwin");
        assert_eq!(release_os_name("linux"), "linux");
        assert_eq!(release_arch_name("x86_64"), "amd64");
        assert_eq!(release_arch_name("aarch64"), "arm64");
        assert_eq!(release_arch_name("x86"), "386");
        assert_eq!(release_arch_name("arm"), "arm");
    }

    #[test]
    fn config_overrides_win() {
        let mut config = Config::with_root("/tmp/hbin-test");
        config.os_override = Some("freebsd".to_string());
        let platform = Platform::from_config(&config);
        assert_eq!(platform.os, "freebsd");
        assert_eq!(platform.arch, Platform::current().arch);
        assert_eq!(Platform::new("linux", "amd64").to_string(), "linux_amd64");
    }
}
