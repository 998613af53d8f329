// hbin/src/cli/list.rs
use clap::Args;
use colored::Colorize;
use hbin_common::config::Config;
use hbin_common::error::Result;
use prettytable::{format, Cell, Row, Table};

use crate::cli::Session;

#[derive(Args, Debug)]
pub struct List {
    /// Product name
    product: String,
}

impl List {
    pub fn run(&self, config: &Config) -> Result<()> {
        let session = Session::new(config)?;
        let installed = session.lifecycle.installed_versions(&self.product)?;
        if installed.is_empty() {
            println!(
                "{}",
                format!("No versions of {} installed", self.product).yellow()
            );
            return Ok(());
        }

        let active = session.lifecycle.active_version(&self.product)?;
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.add_row(Row::new(vec![
            Cell::new("Version").style_spec("b"),
            Cell::new("Active").style_spec("b"),
        ]));
        // Newest first.
        for record in installed.iter().rev() {
            let is_active = active.as_deref() == Some(record.version.as_str());
            table.add_row(Row::new(vec![
                if is_active {
                    Cell::new(&record.version).style_spec("Fg")
                } else {
                    Cell::new(&record.version)
                },
                Cell::new(if is_active { "✔" } else { "" }),
            ]));
        }
        table.printstd();
        println!(
            "{}",
            format!("{} versions of {} installed", installed.len(), self.product).bold()
        );
        Ok(())
    }
}
