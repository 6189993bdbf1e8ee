use crate::echo::{echo_handler, echo_not_found};
use crate::manifest::load_manifest;
use crate::server::ParsedRequest;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// Command-line interface for trierouter
#[derive(Parser, Debug)]
#[command(name = "trierouter")]
#[command(about = "Inspect and exercise trie route manifests", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every registered method and route pattern
    Inspect {
        /// Path to the route manifest (YAML)
        #[arg(short, long, env = "TRIEROUTER_ROUTES")]
        routes: PathBuf,
    },
    /// Dispatch a single request through echo handlers
    Resolve {
        /// Path to the route manifest (YAML)
        #[arg(short, long, env = "TRIEROUTER_ROUTES")]
        routes: PathBuf,

        /// Request method, e.g. GET
        method: String,

        /// Request URI; query and fragment are ignored
        path: String,
    },
}

/// Execute `cli`, writing command output to `out`
///
/// # Errors
///
/// Returns an error if:
/// - The manifest cannot be read or parsed
/// - A manifest route has an invalid method or constraint
/// - Writing to `out` fails
pub fn run_cli<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    match &cli.command {
        Commands::Inspect { routes } => {
            let manifest = load_manifest(routes)?;
            let dispatcher = manifest.build_dispatcher(echo_handler, echo_not_found)?;
            for (method, pattern) in dispatcher.router().routes() {
                writeln!(out, "{:<7} {pattern}", method.as_str())?;
            }
            if let Some(name) = &manifest.not_found {
                writeln!(out, "{:<7} {name}", "*")?;
            }
            Ok(())
        }
        Commands::Resolve {
            routes,
            method,
            path,
        } => {
            let manifest = load_manifest(routes)?;
            let dispatcher = manifest.build_dispatcher(echo_handler, echo_not_found)?;
            let response = dispatcher.dispatch(&ParsedRequest::new(method, path));
            writeln!(out, "{}", response.status.as_u16())
                .and_then(|()| writeln!(out, "{}", response.body))
                .context("failed to write response")?;
            Ok(())
        }
    }
}
