//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AddSiteCommand, AvailabilityCommand, CancelCommand, CompletionsCommand, CreateCommand,
    InitCommand, ListCommand, ListSitesCommand, ShowCommand, ShowDataDirCommand, UpdateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for booking campsites.
#[derive(Parser)]
#[command(name = "campsite")]
#[command(version, about = "Manage campsite reservations", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "CAMPSITE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "CAMPSITE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization
    #[arg(long, global = true)]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Add a site to the catalog
    AddSite(AddSiteCommand),

    /// List the site catalog
    ListSites(ListSitesCommand),

    /// Book a site
    Create(CreateCommand),

    /// Change a reservation
    Update(UpdateCommand),

    /// Cancel a reservation
    Cancel(CancelCommand),

    /// Show one reservation
    Show(ShowCommand),

    /// List reservations
    List(ListCommand),

    /// Show which days a site is free
    Availability(AvailabilityCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
