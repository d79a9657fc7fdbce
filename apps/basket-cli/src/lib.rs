//! # basket-cli
//!
//! Thin command-line front end over `basket-core`: reads item specs from a
//! JSON file, builds a cart, prints totals or items.
//!
//! ## Modules
//! - [`cli`] - Argument definitions
//! - [`config`] - Environment configuration
//! - [`commands`] - Loading, cart population, rendering
//! - [`state`] - Lock-guarded shared cart
//! - [`error`] - Unified error type with machine-readable codes

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

pub use cli::{Args, Commands};
pub use config::{CliConfig, OutputFormat};
pub use error::{CliError, ErrorCode, ErrorReport};
pub use state::CartState;
