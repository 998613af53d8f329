// hbin-common/src/model/build.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use super::version::VersionRecord;
use crate::error::{HbinError, Result};

/// One downloadable release artifact for a product version on a platform.
///
/// Field names follow the release index JSON, where the product is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDescriptor {
    #[serde(rename = "name")]
    pub product: String,
    pub version: String,
    pub os: String,
    pub arch: String,
    pub filename: String,
    pub url: String,
}

impl BuildDescriptor {
    pub fn new(
        product: impl Into<String>,
        version: impl Into<String>,
        os: impl Into<String>,
        arch: impl Into<String>,
        filename: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
            os: os.into(),
            arch: arch.into(),
            filename: filename.into(),
            url: url.into(),
        }
    }

    /// The version this build belongs to.
    pub fn record(&self) -> VersionRecord {
        VersionRecord::new(&self.product, &self.version)
    }

    /// Product and version become path components under the install root, so
    /// both must be plain file names.
    pub fn validate(&self) -> Result<()> {
        validate_names(&self.product, &self.version)
    }
}

impl fmt::Display for BuildDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename)
    }
}

/// Rejects names that would escape or alias a directory when joined onto it.
/// Names starting with `.` are reserved for temporary files.
pub fn validate_component(what: &str, value: &str) -> Result<()> {
    if value.is_empty()
        || value.starts_with('.')
        || value.contains('/')
        || value.contains('\\')
        || value.contains('\0')
    {
        return Err(HbinError::ValidationError(format!(
            "Invalid {what} '{value}': must be a plain name without path separators"
        )));
    }
    Ok(())
}

/// A version may not share the product's name, which is the staging name
/// inside the product's directory.
pub(crate) fn validate_names(product: &str, version: &str) -> Result<()> {
    validate_component("product", product)?;
    validate_component("version", version)?;
    if version == product {
        return Err(HbinError::ValidationError(format!(
            "Invalid version '{version}': must differ from the product name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(product: &str, version: &str) -> BuildDescriptor {
        BuildDescriptor::new(
            product,
            version,
            "linux",
            "amd64",
            format!("{product}_{version}_linux_amd64.zip"),
            format!("https://releases.example.com/{product}/{version}/{product}_{version}_linux_amd64.zip"),
        )
    }

    #[test]
    fn deserializes_release_index_builds() {
        let raw = r#"{
            "name": "terraform",
            "version": "1.5.7",
            "os": "darwin",
            "arch": "arm64",
            "filename": "terraform_1.5.7_darwin_arm64.zip",
            "url": "https://releases.hashicorp.com/terraform/1.5.7/terraform_1.5.7_darwin_arm64.zip"
        }"#;
        let build: BuildDescriptor = serde_json::from_str(raw).unwrap();
        assert_eq!(build.product, "terraform");
        assert_eq!(build.arch, "arm64");
        assert_eq!(build.to_string(), "terraform_1.5.7_darwin_arm64.zip");
    }

    #[test]
    fn record_points_back_at_product_and_version() {
        let record = descriptor("tool", "1.0.0").record();
        assert_eq!(record.product, "tool");
        assert_eq!(record.version, "1.0.0");
    }

    #[test]
    fn path_like_names_are_rejected() {
        assert!(descriptor("tool", "1.0.0").validate().is_ok());
        for (product, version) in [("tool", "../1.0.0"), ("../tool", "1.0.0"), ("tool", ".."), ("", "1.0.0"), ("a/b", "1")] {
            let err = descriptor(product, version).validate().unwrap_err();
            assert!(matches!(err, HbinError::ValidationError(_)), "{product} {version}");
        }
    }

    #[test]
    fn hidden_names_and_staging_name_are_rejected() {
        for (product, version) in [("tool", ".1.0.0"), ("tool", ".hbin-extract-x"), (".tool", "1.0.0"), ("tool", "tool")] {
            let err = descriptor(product, version).validate().unwrap_err();
            assert!(matches!(err, HbinError::ValidationError(_)), "{product} {version}");
        }
        assert!(descriptor("tool", "tool-1.0.0").validate().is_ok());
    }
}
