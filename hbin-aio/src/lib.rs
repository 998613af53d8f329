// hbin-aio/src/lib.rs
//! Filesystem, checksum and archive primitives for hbin.

pub mod checksum;
pub mod extract;
pub mod fs;

pub use checksum::{parse_shasums, sha256_hex, verify_sha256};
pub use extract::extract_binary;
