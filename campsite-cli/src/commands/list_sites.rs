//! List-sites command implementation.

use crate::commands::list::OutputFormat;
use crate::error::CliError;
use crate::utils::{load_configuration, open_store, GlobalOptions};
use clap::Args;
use std::io::Write;

/// List the site catalog.
#[derive(Args)]
pub struct ListSitesCommand {
    /// Output format (default: `output_format` from configuration, else table)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<OutputFormat>,
}

impl ListSitesCommand {
    /// Execute the list-sites command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;
        let sites = store.list_sites()?;

        let stdout = std::io::stdout();
        let mut handle = stdout.lock();

        match OutputFormat::resolve(self.format, config.output_format) {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut handle, &sites)
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                writeln!(handle)?;
            }
            OutputFormat::Table => {
                writeln!(handle, "NUMBER\tDESCRIPTION")?;
                for site in &sites {
                    writeln!(
                        handle,
                        "{}\t{}",
                        site.number(),
                        site.description().unwrap_or("-")
                    )?;
                }
            }
            format @ (OutputFormat::Csv | OutputFormat::Tsv) => {
                let delimiter = if format == OutputFormat::Csv { b',' } else { b'\t' };
                let mut writer = csv::WriterBuilder::new()
                    .delimiter(delimiter)
                    .from_writer(&mut handle);
                let csv_error = |e: csv::Error| CliError::Io(std::io::Error::other(e));
                writer.write_record(["number", "description"]).map_err(csv_error)?;
                for site in &sites {
                    writer
                        .write_record([site.number(), site.description().unwrap_or("")])
                        .map_err(csv_error)?;
                }
                writer.flush()?;
            }
        }
        Ok(())
    }
}
