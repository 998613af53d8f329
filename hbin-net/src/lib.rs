// hbin-net/src/lib.rs
pub mod catalog;
pub mod http;
pub mod platform;
pub mod shasums;
pub mod validation;

pub use catalog::ReleaseCatalog;
pub use hbin_common::{
    error::{HbinError, Result},
    BuildDescriptor, Config,
};
pub use http::{Fetcher, HttpFetcher};
pub use platform::Platform;
pub use shasums::{ChecksumSource, RemoteShasums, ShasumsManifest};
pub use validation::validate_url;
