// hbin/src/cli/use_version.rs
use clap::Args;
use colored::Colorize;
use hbin_common::config::Config;
use hbin_common::error::Result;
use tracing::instrument;

use crate::cli::Session;

#[derive(Args, Debug)]
pub struct UseVersion {
    /// Product name
    product: String,
    /// Installed version to activate
    version: String,
}

impl UseVersion {
    #[instrument(skip(self, config), fields(product = %self.product, version = %self.version))]
    pub fn run(&self, config: &Config) -> Result<()> {
        let session = Session::new(config)?;
        let build = session.local_build(&self.product, &self.version);
        session.lifecycle.link(&build)?;
        println!(
            "{} {} {} -> {}",
            "✓".green(),
            self.product.green(),
            self.version,
            session.lifecycle.paths().link_path(&self.product).display()
        );
        Ok(())
    }
}
