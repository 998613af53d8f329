// hbin-common/src/model/version.rs
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use semver::Version;
use serde::{Deserialize, Serialize};

use super::build::validate_names;
use crate::error::Result;

/// One version of one product as seen on the local system.
///
/// Whether it is active is derived from the filesystem on demand and never
/// stored here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionRecord {
    pub product: String,
    pub version: String,
}

impl VersionRecord {
    pub fn new(product: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_names(&self.product, &self.version)
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.product, self.version)
    }
}

/// What `install` did for a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(PathBuf),
    AlreadyInstalled(PathBuf),
}

impl InstallOutcome {
    pub fn path(&self) -> &Path {
        match self {
            InstallOutcome::Installed(path) | InstallOutcome::AlreadyInstalled(path) => path,
        }
    }

    pub fn was_already_installed(&self) -> bool {
        matches!(self, InstallOutcome::AlreadyInstalled(_))
    }
}

/// Orders version strings by semver precedence. Strings that are not valid
/// semver sort after valid ones and compare lexicographically among themselves.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Ok(va), Ok(vb)) => va.cmp(&vb),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semver_ordering_beats_lexicographic() {
        let mut versions = vec!["1.10.0", "1.2.0", "1.2.0-beta1", "nightly", "0.9.9"];
        versions.sort_by(|a, b| compare_versions(a, b));
        assert_eq!(versions, ["0.9.9", "1.2.0-beta1", "1.2.0", "1.10.0", "nightly"]);
    }

    #[test]
    fn outcome_exposes_path_either_way() {
        let installed = InstallOutcome::Installed(PathBuf::from("/x/tool/1.0.0"));
        let again = InstallOutcome::AlreadyInstalled(PathBuf::from("/x/tool/1.0.0"));
        assert_eq!(installed.path(), again.path());
        assert!(!installed.was_already_installed());
        assert!(again.was_already_installed());
    }
}
