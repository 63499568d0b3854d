//! Init command implementation.
//!
//! This module implements the `init` command for explicitly initializing
//! the campsite data directory and database.

use crate::error::CliError;
use crate::utils::{database_path, resolve_data_dir, shorten_path, GlobalOptions};
use campsite::config::CONFIG_FILE_NAME;
use campsite::{Database, DatabaseConfig};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Starting point written by `init --with-config`.
const DEFAULT_CONFIG: &str = "\
# campsite configuration
#
# booking:
#   horizon_days: 30
# busy_timeout_seconds: 5
# output_format: table
";

/// Initialize the campsite data directory and database.
#[derive(Parser)]
#[command(about = "Initialize the campsite data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize
    #[arg(long = "path", value_name = "PATH")]
    path: Option<PathBuf>,

    /// Replace an existing database
    #[arg(long)]
    overwrite: bool,

    /// Create a commented configuration file
    #[arg(long)]
    with_config: bool,
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here; creating the database is the
    /// point of this command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // Priority: command flag > global flag > environment > default
        let data_dir = match self.path {
            Some(path) => path,
            None => resolve_data_dir(global)?,
        };
        let db_path = database_path(&data_dir);

        if db_path.exists() && !self.overwrite {
            return Err(CliError::InvalidArguments(format!(
                "database already exists (use --overwrite to replace): {}",
                db_path.display()
            )));
        }

        let data_dir_created = !data_dir.exists();
        if self.overwrite && db_path.exists() {
            fs::remove_file(&db_path)?;
            for suffix in ["-wal", "-shm"] {
                let mut sidecar = db_path.clone().into_os_string();
                sidecar.push(suffix);
                let sidecar = PathBuf::from(sidecar);
                if sidecar.exists() {
                    fs::remove_file(sidecar)?;
                }
            }
        }
        Database::open(DatabaseConfig::new(&db_path))?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);
        let config_created = self.with_config && !config_path.exists();
        if config_created {
            fs::write(&config_path, DEFAULT_CONFIG)?;
        }

        if !global.quiet {
            println!("Initialized campsite in: {}", shorten_path(&data_dir));
            if data_dir_created {
                println!("  - Created data directory");
            }
            println!("  - Created database");
            if config_created {
                println!("  - Created default configuration file");
            } else if self.with_config {
                println!("  - Configuration file already exists (not overwritten)");
            }
        }

        Ok(())
    }
}
