// hbin-core/src/integrity.rs
use hbin_aio::checksum::verify_sha256;
use hbin_common::error::{HbinError, Result};
use hbin_common::model::BuildDescriptor;
use hbin_net::shasums::ChecksumSource;
use tracing::debug;

/// Gate between fetching and extraction: bytes that do not match the published
/// digest never reach the filesystem.
pub struct IntegrityChecker<C: ChecksumSource> {
    source: C,
}

impl<C: ChecksumSource> IntegrityChecker<C> {
    pub fn new(source: C) -> Self {
        Self { source }
    }

    pub fn check(&self, build: &BuildDescriptor, bytes: &[u8]) -> Result<()> {
        let expected = self.source.expected_sha256(build)?.ok_or_else(|| {
            HbinError::ChecksumMissing(format!("No published SHA256 for {}", build.filename))
        })?;
        verify_sha256(&build.filename, bytes, &expected)?;
        debug!("Checksum verified for {}", build.filename);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hbin_aio::checksum::sha256_hex;
    use hbin_common::ErrorKind;
    use hbin_net::shasums::ShasumsManifest;

    use super::*;

    fn build() -> BuildDescriptor {
        BuildDescriptor::new(
            "tool",
            "1.0.0",
            "linux",
            "amd64",
            "tool_1.0.0_linux_amd64.zip",
            "https://releases.example.com/tool/1.0.0/tool_1.0.0_linux_amd64.zip",
        )
    }

    #[test]
    fn matching_bytes_pass() {
        let mut sums = ShasumsManifest::default();
        sums.insert("tool_1.0.0_linux_amd64.zip", sha256_hex(b"payload"));
        assert!(IntegrityChecker::new(sums).check(&build(), b"payload").is_ok());
    }

    #[test]
    fn mismatch_and_missing_are_integrity_errors() {
        let mut sums = ShasumsManifest::default();
        sums.insert("tool_1.0.0_linux_amd64.zip", sha256_hex(b"payload"));
        let checker = IntegrityChecker::new(sums);
        let err = checker.check(&build(), b"tampered").unwrap_err();
        assert!(matches!(err, HbinError::ChecksumMismatch(_)));
        assert_eq!(err.kind(), ErrorKind::Integrity);

        let empty = IntegrityChecker::new(ShasumsManifest::default());
        let err = empty.check(&build(), b"payload").unwrap_err();
        assert!(matches!(err, HbinError::ChecksumMissing(_)));
        assert_eq!(err.kind(), ErrorKind::Integrity);
    }
}
