// hbin/src/cli/install.rs
use clap::Args;
use colored::Colorize;
use hbin_common::config::Config;
use hbin_common::error::Result;
use tracing::{debug, instrument};

use crate::cli::Session;

#[derive(Debug, Args)]
pub struct InstallArgs {
    /// Product name, e.g. terraform
    product: String,
    /// Version to install, e.g. 1.5.7
    version: String,
    /// Make this version the active one after installing
    #[arg(long = "use")]
    activate: bool,
}

impl InstallArgs {
    #[instrument(skip(self, config), fields(product = %self.product, version = %self.version))]
    pub fn run(&self, config: &Config) -> Result<()> {
        let session = Session::new(config)?;
        let build = session
            .catalog
            .resolve(&self.product, &self.version, &session.platform)?;
        debug!("Resolved build {} ({})", build, build.url);

        let outcome = session.lifecycle.install(&build)?;
        if outcome.was_already_installed() {
            println!(
                "{} {} is already installed at {}",
                self.product.cyan(),
                self.version,
                outcome.path().display()
            );
        } else {
            println!(
                "{} Installed {} {} to {}",
                "✓".green(),
                self.product.green(),
                self.version,
                outcome.path().display()
            );
        }

        if self.activate {
            session.lifecycle.link(&build)?;
            println!("{} {} {} is now active", "✓".green(), self.product, self.version);
        } else if !session.lifecycle.is_active(&build.record())? {
            println!("To use it: hbin use {} {}", self.product, self.version);
        }
        Ok(())
    }
}
