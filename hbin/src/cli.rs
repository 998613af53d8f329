// hbin/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand};
use hbin_common::error::Result;
use hbin_common::model::BuildDescriptor;
use hbin_common::Config;
use hbin_core::VersionLifecycle;
use hbin_net::{HttpFetcher, Platform, ReleaseCatalog, RemoteShasums};

pub mod current;
pub mod install;
pub mod list;
pub mod uninstall;
pub mod use_version;
pub mod versions;

use crate::cli::current::Current;
use crate::cli::install::InstallArgs;
use crate::cli::list::List;
use crate::cli::uninstall::Uninstall;
use crate::cli::use_version::UseVersion;
use crate::cli::versions::Versions;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "hbin", bin_name = "hbin")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download, verify and install a product version
    Install(InstallArgs),
    /// Remove an installed product version
    Uninstall(Uninstall),
    /// Make an installed version the active one
    #[command(name = "use")]
    Use(UseVersion),
    /// List installed versions of a product
    List(List),
    /// Show the active version of a product
    Current(Current),
    /// List versions published on the release site
    Versions(Versions),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Install(command) => command.run(config),
            Self::Uninstall(command) => command.run(config),
            Self::Use(command) => command.run(config),
            Self::List(command) => command.run(config),
            Self::Current(command) => command.run(config),
            Self::Versions(command) => command.run(config),
        }
    }
}

pub(crate) type Lifecycle = VersionLifecycle<Arc<HttpFetcher>, RemoteShasums<Arc<HttpFetcher>>>;

/// The network-backed pieces every command shares: one HTTP client feeding
/// the catalog, the checksum manifests and the lifecycle.
pub(crate) struct Session {
    pub catalog: ReleaseCatalog<Arc<HttpFetcher>>,
    pub lifecycle: Lifecycle,
    pub platform: Platform,
    config: Config,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config)?);
        let checksums = RemoteShasums::new(Arc::clone(&fetcher), config);
        Ok(Self {
            catalog: ReleaseCatalog::new(Arc::clone(&fetcher), config),
            lifecycle: VersionLifecycle::new(config.clone(), fetcher, checksums),
            platform: Platform::from_config(config),
            config: config.clone(),
        })
    }

    /// Descriptor for a version that only needs to exist locally.
    pub fn local_build(&self, product: &str, version: &str) -> BuildDescriptor {
        self.platform
            .conventional_build(&self.config, product, version)
    }
}
