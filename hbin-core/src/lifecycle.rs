// hbin-core/src/lifecycle.rs
//! Install, uninstall and activation of product versions.
//!
//! Every installed version is a single executable at
//! `<root>/versions/<product>/<version>`. The active version is whatever the
//! symlink at `<link_dir>/<product>` points to; nothing else records it.

use std::fs;
use std::path::{Path, PathBuf};

use hbin_aio::extract::extract_binary;
use hbin_aio::fs::{
    check_symlink_exists, commit_rename, create_symlink, read_link_target,
    remove_existing_link_target, remove_file_if_exists,
};
use hbin_common::config::Config;
use hbin_common::error::{HbinError, Result};
use hbin_common::model::{
    compare_versions, validate_component, BuildDescriptor, InstallOutcome, VersionRecord,
};
use hbin_net::http::Fetcher;
use hbin_net::shasums::ChecksumSource;
use tracing::{debug, info, warn};

use crate::integrity::IntegrityChecker;
use crate::paths::InstallPaths;

pub struct VersionLifecycle<F: Fetcher, C: ChecksumSource> {
    paths: InstallPaths,
    fetcher: F,
    integrity: IntegrityChecker<C>,
}

impl<F: Fetcher, C: ChecksumSource> VersionLifecycle<F, C> {
    pub fn new(config: Config, fetcher: F, checksums: C) -> Self {
        Self {
            paths: InstallPaths::new(config),
            fetcher,
            integrity: IntegrityChecker::new(checksums),
        }
    }

    pub fn paths(&self) -> &InstallPaths {
        &self.paths
    }

    /// Downloads, verifies and extracts `build` into its version path.
    ///
    /// An existing version path short-circuits before any network access. The
    /// archive is checked against its published digest before anything is
    /// written, and the version path only ever appears through a rename of a
    /// fully written staging file.
    pub fn install(&self, build: &BuildDescriptor) -> Result<InstallOutcome> {
        build.validate()?;
        let bin_dir = self.paths.bin_dir(&build.product)?;
        let version_path = self.paths.version_path(&build.product, &build.version);

        if check_symlink_exists(&version_path) {
            debug!(
                "{} already present at {}, skipping download",
                build.record(),
                version_path.display()
            );
            return Ok(InstallOutcome::AlreadyInstalled(version_path));
        }

        info!("Downloading {} from {}", build.filename, build.url);
        let bytes = self.fetcher.fetch(&build.url)?;
        debug!("Fetched {} bytes for {}", bytes.len(), build.filename);

        self.integrity.check(build, &bytes)?;

        let staged = extract_binary(&build.product, &bin_dir, &bytes)?;
        commit_rename(&staged, &version_path)?;

        info!("Installed {} to {}", build.record(), version_path.display());
        Ok(InstallOutcome::Installed(version_path))
    }

    /// Removes the installed file for `build`. A version that is not installed
    /// is not an error. If the active link pointed at it, the link goes too.
    pub fn uninstall(&self, build: &BuildDescriptor) -> Result<()> {
        build.validate()?;
        let record = build.record();
        let version_path = self.paths.version_path(&build.product, &build.version);
        // Resolved while the file still exists so equivalent spellings of the
        // root still match.
        let was_active = self.is_active(&record)?;

        if remove_file_if_exists(&version_path)? {
            info!("Removed {}", version_path.display());
        } else {
            debug!("{} was not installed", record);
        }

        if was_active {
            let link = self.paths.link_path(&build.product);
            remove_file_if_exists(&link)?;
            info!("Removed active link {}", link.display());
        }
        Ok(())
    }

    /// Points the active link for the product at this version, replacing
    /// whatever was there.
    pub fn link(&self, build: &BuildDescriptor) -> Result<()> {
        build.validate()?;
        let version_path = self.paths.version_path(&build.product, &build.version);
        if !version_path.is_file() {
            return Err(HbinError::NotFound(format!(
                "{} is not installed (expected {})",
                build.record(),
                version_path.display()
            )));
        }

        self.paths.ensure_link_dir()?;
        let link = self.paths.link_path(&build.product);
        if remove_existing_link_target(&link)? {
            debug!("Replaced previous link at {}", link.display());
        }
        create_symlink(&version_path, &link)?;
        info!("{} -> {}", link.display(), version_path.display());
        Ok(())
    }

    /// Removes the active link for `product`. Returns whether one existed.
    /// Anything at the link path that is not a symlink is left alone.
    pub fn unlink(&self, product: &str) -> Result<bool> {
        validate_component("product", product)?;
        let link = self.paths.link_path(product);
        if read_link_target(&link)?.is_none() {
            return Ok(false);
        }
        remove_file_if_exists(&link)
    }

    /// True when the active link for the record's product targets exactly its
    /// version path.
    pub fn is_active(&self, record: &VersionRecord) -> Result<bool> {
        record.validate()?;
        let link = self.paths.link_path(&record.product);
        let Some(target) = read_link_target(&link)? else {
            return Ok(false);
        };
        let version_path = self.paths.version_path(&record.product, &record.version);
        Ok(same_path(&target, &version_path))
    }

    /// The version the active link points to, if it points into this
    /// product's version directory at all.
    pub fn active_version(&self, product: &str) -> Result<Option<String>> {
        validate_component("product", product)?;
        let link = self.paths.link_path(product);
        let Some(target) = read_link_target(&link)? else {
            return Ok(None);
        };
        let product_dir = self.paths.product_dir(product);
        let in_product_dir = target
            .parent()
            .is_some_and(|parent| same_path(parent, &product_dir));
        if !in_product_dir {
            warn!(
                "{} points outside {}: {}",
                link.display(),
                product_dir.display(),
                target.display()
            );
            return Ok(None);
        }
        Ok(target
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string))
    }

    /// Installed versions of `product`, oldest first.
    pub fn installed_versions(&self, product: &str) -> Result<Vec<VersionRecord>> {
        validate_component("product", product)?;
        let product_dir = self.paths.product_dir(product);
        if !product_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions = Vec::new();
        for entry in fs::read_dir(&product_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            // Staging leftovers and temp files. Validation keeps real
            // versions from ever taking these names.
            if name == product || name.starts_with('.') {
                continue;
            }
            versions.push(name);
        }
        versions.sort_by(|a, b| compare_versions(a, b));
        Ok(versions
            .into_iter()
            .map(|version| VersionRecord::new(product, version))
            .collect())
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (canonical(a), canonical(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn canonical(path: &Path) -> Option<PathBuf> {
    fs::canonicalize(path).ok()
}
