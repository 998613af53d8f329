// hbin-aio/src/checksum.rs
use std::collections::HashMap;

use hbin_common::error::{HbinError, Result};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Verifies the SHA-256 of an in-memory artifact before anything is written.
pub fn verify_sha256(name: &str, bytes: &[u8], expected: &str) -> Result<()> {
    let actual = sha256_hex(bytes);
    debug!(
        "Calculated SHA256 for {}: {} ({} bytes)",
        name,
        actual,
        bytes.len()
    );
    debug!("Expected SHA256:   {}", expected);
    if actual.eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(HbinError::ChecksumMismatch(format!(
            "Checksum mismatch for {name}: expected {expected}, got {actual}"
        )))
    }
}

/// Parses a `SHA256SUMS` manifest (`<hex>  <filename>` per line) into a map
/// keyed by filename. A leading `*` on the filename (binary mode marker) is
/// dropped; lines that do not look like a digest entry are skipped.
pub fn parse_shasums(text: &str) -> HashMap<String, String> {
    let mut sums = HashMap::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_whitespace();
        let (Some(digest), Some(filename), None) = (parts.next(), parts.next(), parts.next())
        else {
            warn!("Skipping malformed SHA256SUMS line {}: {}", lineno + 1, line);
            continue;
        };
        if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            warn!(
                "Skipping SHA256SUMS line {} with invalid digest: {}",
                lineno + 1,
                line
            );
            continue;
        }
        let filename = filename.strip_prefix('*').unwrap_or(filename);
        sums.insert(filename.to_string(), digest.to_ascii_lowercase());
    }
    debug!("Parsed {} entries from SHA256SUMS manifest", sums.len());
    sums
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn digest_of_known_input() {
        assert_eq!(sha256_hex(b"abc"), ABC_SHA256);
    }

    #[test]
    fn verify_accepts_uppercase_and_rejects_other_bytes() {
        assert!(verify_sha256("abc.zip", b"abc", &ABC_SHA256.to_uppercase()).is_ok());
        let err = verify_sha256("abd.zip", b"abd", ABC_SHA256).unwrap_err();
        assert!(matches!(err, HbinError::ChecksumMismatch(msg) if msg.contains("abd.zip")));
    }

    #[test]
    fn manifest_lines_are_keyed_by_filename() {
        let text = format!(
            "{ABC_SHA256}  tool_1.0.0_linux_amd64.zip\n\
             \n\
             {}  *tool_1.0.0_darwin_arm64.zip\n\
             not-a-digest  tool_1.0.0_windows_amd64.zip\n\
             garbage\n",
            ABC_SHA256.to_uppercase()
        );
        let sums = parse_shasums(&text);
        assert_eq!(sums.len(), 2);
        assert_eq!(sums["tool_1.0.0_linux_amd64.zip"], ABC_SHA256);
        assert_eq!(sums["tool_1.0.0_darwin_arm64.zip"], ABC_SHA256);
        assert!(!sums.contains_key("tool_1.0.0_windows_amd64.zip"));
    }
}
