// hbin-aio/src/extract.rs
// Unpacks the product binary from an in-memory release archive.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use hbin_common::error::{HbinError, Result};
use tempfile::Builder as TempFileBuilder;
use tracing::{debug, error};
use zip::ZipArchive;

use crate::fs::{create_dir_all, set_executable};

/// Extracts the entry named `product` from the zip archive in `bytes` into
/// `dest_dir`, marks it executable, and returns its path (`dest_dir/product`).
///
/// The entry is streamed into a hidden temporary file first and only renamed
/// to the product name once fully written, so a failed extraction leaves no
/// file under that name.
pub fn extract_binary(product: &str, dest_dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    debug!(
        "Extracting '{}' from {} byte archive into {}",
        product,
        bytes.len(),
        dest_dir.display()
    );

    if !infer::archive::is_zip(bytes) {
        return Err(HbinError::Archive(format!(
            "Downloaded artifact for '{product}' is not a zip archive"
        )));
    }

    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| HbinError::Archive(format!("Failed to open ZIP for '{product}': {e}")))?;

    let index = find_entry(&mut archive, product)?.ok_or_else(|| {
        HbinError::NotFound(format!(
            "No '{product}' binary found in archive ({} entries)",
            archive.len()
        ))
    })?;

    create_dir_all(dest_dir)?;
    let mut entry = archive
        .by_index(index)
        .map_err(|e| HbinError::Archive(format!("Failed to access ZIP entry: {e}")))?;

    let mut staged = TempFileBuilder::new()
        .prefix(".hbin-extract-")
        .tempfile_in(dest_dir)
        .map_err(|e| {
            HbinError::IoError(format!(
                "Failed to create temp file in {}: {}",
                dest_dir.display(),
                e
            ))
        })?;

    // A read error here means the entry's compressed data is corrupt.
    std::io::copy(&mut entry, staged.as_file_mut()).map_err(|e| {
        error!("Failed to unpack ZIP entry '{}': {}", entry.name(), e);
        HbinError::Archive(format!(
            "Failed to unpack ZIP entry '{}': {}",
            entry.name(),
            e
        ))
    })?;
    staged.as_file_mut().flush()?;
    set_executable(staged.path())?;

    let out_path = dest_dir.join(product);
    staged.persist(&out_path).map_err(|e| {
        HbinError::IoError(format!(
            "Failed to move extracted binary to {}: {}",
            out_path.display(),
            e.error
        ))
    })?;

    debug!("Extracted binary to: {}", out_path.display());
    Ok(out_path)
}

fn find_entry(archive: &mut ZipArchive<Cursor<&[u8]>>, product: &str) -> Result<Option<usize>> {
    for i in 0..archive.len() {
        let file = archive
            .by_index_raw(i)
            .map_err(|e| HbinError::Archive(format!("Failed to access ZIP entry: {e}")))?;
        if !file.is_file() {
            continue;
        }
        let Some(path) = file.enclosed_name() else {
            debug!("Skipping ZIP entry with unsafe path: {}", file.name());
            continue;
        };
        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| matches_product(name, product))
        {
            debug!("Found '{}' at ZIP entry {} ({})", product, i, file.name());
            return Ok(Some(i));
        }
    }
    Ok(None)
}

fn matches_product(entry_name: &str, product: &str) -> bool {
    if entry_name == product {
        return true;
    }
    cfg!(windows)
        && entry_name
            .strip_suffix(".exe")
            .is_some_and(|stem| stem == product)
}

#[cfg(test)]
mod tests {
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use super::*;

    fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_matching_entry() {
        let dir = tempfile::tempdir().unwrap();
        let archive = zip_with(&[("LICENSE.txt", "license"), ("tool", "#!/bin/sh\necho hi\n")]);

        let path = extract_binary("tool", dir.path(), &archive).unwrap();
        assert_eq!(path, dir.path().join("tool"));
        assert_eq!(std::fs::read(&path).unwrap(), b"#!/bin/sh\necho hi\n");
        assert!(!dir.path().join("LICENSE.txt").exists());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn nested_entries_match_on_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let archive = zip_with(&[("tool_1.0.0/bin/tool", "bin")]);
        let path = extract_binary("tool", dir.path(), &archive).unwrap();
        assert_eq!(path, dir.path().join("tool"));
    }

    #[test]
    fn missing_entry_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let archive = zip_with(&[("other", "bin")]);
        let err = extract_binary("tool", dir.path(), &archive).unwrap_err();
        assert!(matches!(err, HbinError::NotFound(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn garbage_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_binary("tool", dir.path(), b"definitely not a zip").unwrap_err();
        assert!(matches!(err, HbinError::Archive(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn truncated_zip_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive = zip_with(&[("tool", "bin")]);
        // Keeps the local header magic but loses the central directory.
        let truncated = &archive[..archive.len() / 2];
        let err = extract_binary("tool", dir.path(), truncated).unwrap_err();
        assert!(matches!(err, HbinError::Archive(_)));
        assert!(!dir.path().join("tool").exists());
    }
}
