//! Command-line interface built with clap.
//!
//! [`Cli`] carries the subcommands ([`Command`]) and the global `--verbose` flag.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sheetdash: production dashboard over a Google Sheets range.
#[derive(Debug, Parser)]
#[command(name = "sheetdash", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Runs the interactive dashboard and keeps an HTML page up to date.
    Run {
        /// Page written after every change.
        #[arg(long, default_value = "dashboard.html")]
        out: PathBuf,
    },

    /// Prints the resolved configuration with secrets masked.
    Config,
}

/// One keystroke-sized action in the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Authorize,
    SignOut,
    Quit,
}

impl Action {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "a" | "authorize" | "refresh" => Some(Action::Authorize),
            "s" | "signout" | "sign-out" => Some(Action::SignOut),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run_with_default_out() {
        let cli = Cli::parse_from(["sheetdash", "run"]);
        match cli.command {
            Command::Run { out } => assert_eq!(out, PathBuf::from("dashboard.html")),
            _ => panic!("expected Run command"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from(["sheetdash", "--verbose", "run", "--out", "/tmp/d.html"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Run { out } => assert_eq!(out, PathBuf::from("/tmp/d.html")),
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn cli_parses_config_subcommand() {
        let cli = Cli::parse_from(["sheetdash", "config"]);
        assert!(matches!(cli.command, Command::Config));
    }

    #[test]
    fn actions_parse_loosely() {
        assert_eq!(Action::parse(" A\n"), Some(Action::Authorize));
        assert_eq!(Action::parse("refresh"), Some(Action::Authorize));
        assert_eq!(Action::parse("s"), Some(Action::SignOut));
        assert_eq!(Action::parse("quit"), Some(Action::Quit));
        assert_eq!(Action::parse("x"), None);
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
