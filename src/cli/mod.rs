//! Command-line front end.
//!
//! - Argument parsing
//! - Version display
//! - [`Portal`]: production wiring and command execution
//!
//! # Usage
//!
//! ```ignore
//! use credportal::cli::{parse_args, CliCommand, Portal};
//!
//! let command = parse_args(std::env::args());
//! let portal = Portal::production(AppConfig::from_env())?;
//! println!("{}", portal.execute(&command).await?);
//! ```

pub mod args;
mod portal;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use portal::Portal;
pub use version::{handle_version_command, VERSION};
