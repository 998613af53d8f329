// hbin-common/src/model/mod.rs
pub mod build;
pub mod version;

pub use build::{validate_component, BuildDescriptor};
pub use version::{compare_versions, InstallOutcome, VersionRecord};
