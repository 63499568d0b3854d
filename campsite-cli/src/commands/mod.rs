//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Create the data directory and database
//! - `add_site`, `list_sites`: Maintain the site catalog
//! - `create`: Book a site
//! - `update`: Change a reservation
//! - `cancel`: Cancel a reservation
//! - `show`: Display one reservation
//! - `list`: List reservations with filters
//! - `availability`: Day-by-day calendar of a site
//! - `show_data_dir`: Show resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod add_site;
pub mod availability;
pub mod cancel;
pub mod completions;
pub mod create;
pub mod init;
pub mod list;
pub mod list_sites;
pub mod show;
pub mod show_data_dir;
pub mod update;

pub use add_site::AddSiteCommand;
pub use availability::AvailabilityCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use create::CreateCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use list_sites::ListSitesCommand;
pub use show::ShowCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use update::UpdateCommand;
