// hbin/src/cli/current.rs
use clap::Args;
use colored::Colorize;
use hbin_common::config::Config;
use hbin_common::error::Result;

use crate::cli::Session;

#[derive(Args, Debug)]
pub struct Current {
    /// Product name
    product: String,
}

impl Current {
    pub fn run(&self, config: &Config) -> Result<()> {
        let session = Session::new(config)?;
        match session.lifecycle.active_version(&self.product)? {
            Some(version) => println!("{}", version.green()),
            None => println!("{}", "none".yellow()),
        }
        Ok(())
    }
}
