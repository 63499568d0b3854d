//! Renders the `campsite(1)` man page into `OUT_DIR/man`.
//!
//! Build scripts cannot link the crate they build, so the command tree is
//! restated here in builder form.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Mirror of `src/cli.rs`; flags and subcommands must stay in sync.
fn build_cli() -> Command {
    Command::new("campsite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage campsite reservations")
        .long_about(
            "Command-line tool for booking numbered campsites without double bookings",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .help("Override the data directory location")
                .value_name("PATH")
                .global(true)
                .env("CAMPSITE_DATA_DIR"),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Override the database busy timeout (in seconds)")
                .value_name("SECONDS")
                .global(true)
                .env("CAMPSITE_BUSY_TIMEOUT"),
        )
        .arg(
            Arg::new("disable-autoinit")
                .long("disable-autoinit")
                .help("Disable automatic database initialization")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("init")
                .about("Initialize the data directory and database")
                .long_about("Create the data directory, the database, and optionally a config file"),
            Command::new("add-site")
                .about("Add a site to the catalog")
                .long_about("Register a bookable site under a unique number"),
            Command::new("list-sites")
                .about("List the site catalog")
                .long_about("Display every registered site"),
            Command::new("create")
                .about("Book a site")
                .long_about("Create a reservation and print its confirmation code"),
            Command::new("update")
                .about("Change a reservation")
                .long_about("Change the site, customer, or dates of a confirmed reservation"),
            Command::new("cancel")
                .about("Cancel a reservation")
                .long_about("Cancel a confirmed reservation using its confirmation code"),
            Command::new("show")
                .about("Show one reservation")
                .long_about("Display a reservation by id"),
            Command::new("list")
                .about("List reservations")
                .long_about("Display reservations in table, JSON, CSV or TSV format"),
            Command::new("availability")
                .about("Show which days a site is free")
                .long_about("Display a day-by-day calendar of one site"),
            Command::new("show-data-dir")
                .about("Show the resolved data directory path")
                .long_about("Display the path to the campsite data directory"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man page directory");

    let mut page = Vec::new();
    Man::new(build_cli())
        .render(&mut page)
        .expect("failed to render man page");
    fs::write(man_dir.join("campsite.1"), page).expect("failed to write man page");

    for watched in ["src/cli.rs", "src/commands/"] {
        println!("cargo:rerun-if-changed={watched}");
    }
}
