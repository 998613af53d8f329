// hbin-core/src/lib.rs

// Declare the top-level modules within the library crate
pub mod integrity;
pub mod lifecycle;
pub mod paths;

// Re-export key types for easier use by the CLI crate
pub use integrity::IntegrityChecker;
pub use lifecycle::VersionLifecycle;
pub use paths::InstallPaths;
