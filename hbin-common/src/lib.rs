// hbin-common/src/lib.rs
pub mod config;
pub mod error;
pub mod model;

// Re-export key types
pub use config::Config;
pub use error::{ErrorKind, HbinError, Result};
pub use model::{BuildDescriptor, InstallOutcome, VersionRecord};
