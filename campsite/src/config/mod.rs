//! Layered configuration.
//!
//! Sources, highest precedence first:
//!
//! 1. Programmatic overrides (`ConfigBuilder::with_config`)
//! 2. Environment variables (`CAMPSITE_*`)
//! 3. User config (`<data_dir>/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use campsite::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("booking horizon: {} days", config.booking_window().horizon_days());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{BookingConfig, Config, OutputFormat};
pub use validator::{ConfigValidator, MAX_HORIZON_DAYS};
