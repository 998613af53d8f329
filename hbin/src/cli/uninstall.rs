// hbin/src/cli/uninstall.rs
use clap::Args;
use colored::Colorize;
use hbin_common::config::Config;
use hbin_common::error::Result;
use tracing::instrument;

use crate::cli::Session;

#[derive(Args, Debug)]
pub struct Uninstall {
    /// Product name
    product: String,
    /// Installed version to remove
    version: String,
}

impl Uninstall {
    #[instrument(skip(self, config), fields(product = %self.product, version = %self.version))]
    pub fn run(&self, config: &Config) -> Result<()> {
        let session = Session::new(config)?;
        let build = session.local_build(&self.product, &self.version);
        let was_active = session.lifecycle.is_active(&build.record())?;

        session.lifecycle.uninstall(&build)?;
        println!(
            "{} Uninstalled {} {}",
            "✓".green(),
            self.product.green(),
            self.version
        );
        if was_active {
            println!(
                "{} {} has no active version now",
                "Note:".yellow(),
                self.product
            );
        }
        Ok(())
    }
}
