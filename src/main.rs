//! `ci-deputy` — the CI chores of a Go project, as one binary.
//!
//! # Subcommands
//! - `licenses` — save the license of every Go dependency to a directory
//!   ([`commands::licenses`]).
//! - `validate-pr` — require a changelog label on the current pull request
//!   ([`commands::validate_pr`]).
//! - `submit` — report the dependency manifest to WhiteSource
//!   ([`commands::submit`]).
//!
//! Every subcommand exits `0` on full success and `1` on any fatal or
//! aggregate failure; the exit code is the only status channel the
//! surrounding pipeline consumes.

mod batch;
mod cli;
mod commands;
mod deps;
mod github;
mod models;
mod repo;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let clean = match cli.command {
        Command::Licenses(args) => commands::licenses::run(args).await?,
        Command::ValidatePr(args) => commands::validate_pr::run(args).await?,
        Command::Submit(args) => commands::submit::run(args).await?,
    };

    if !clean {
        std::process::exit(1);
    }

    Ok(())
}
