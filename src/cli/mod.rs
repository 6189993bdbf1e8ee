//! # CLI Module
//!
//! Command-line tools for working with route manifests.
//!
//! ## Commands
//!
//! ### `inspect`
//!
//! List every method and pattern a manifest registers:
//!
//! ```bash
//! trierouter inspect --routes routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Dispatch one request through echo handlers and print the result:
//!
//! ```bash
//! trierouter resolve --routes routes.yaml GET /item/42
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use trierouter::cli::{Cli, run_cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(&cli, &mut std::io::stdout())?;
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
