// hbin/src/cli/versions.rs
use clap::Args;
use colored::Colorize;
use hbin_common::config::Config;
use hbin_common::error::Result;
use tracing::instrument;

use crate::cli::Session;

#[derive(Args, Debug)]
pub struct Versions {
    /// Product name
    product: String,
    /// Show at most this many versions, newest first
    #[arg(long, default_value_t = 20)]
    limit: usize,
}

impl Versions {
    #[instrument(skip(self, config), fields(product = %self.product))]
    pub fn run(&self, config: &Config) -> Result<()> {
        let session = Session::new(config)?;
        let published = session.catalog.versions(&self.product)?;
        let installed: Vec<String> = session
            .lifecycle
            .installed_versions(&self.product)?
            .into_iter()
            .map(|r| r.version)
            .collect();

        for version in published.iter().take(self.limit) {
            if installed.contains(version) {
                println!("{} {}", version.green(), "(installed)".dimmed());
            } else {
                println!("{version}");
            }
        }
        if published.len() > self.limit {
            println!(
                "{}",
                format!("... {} more, use --limit to show them", published.len() - self.limit).dimmed()
            );
        }
        Ok(())
    }
}
