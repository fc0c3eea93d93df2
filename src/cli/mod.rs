//! CLI command definitions and handlers

mod check;
mod init;
mod rules;
mod scan;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// async-naming - "Async" suffix convention checker
#[derive(Parser, Debug)]
#[command(name = "async-naming")]
#[command(
    version,
    about = "Check that async methods are named with the \"Async\" suffix",
    long_about = "Classifies async method names against the \"Async\" suffix convention and \
reports a missing, misspelled (\"Asycn\") or misplaced suffix.\n\n\
Declarations are supplied by the host as JSON or JSON Lines records:\n  \
{\"name\": \"LoadData\", \"is_async\": true, \"file\": \"src/Repo.cs\", \"line\": 12}",
    after_help = "\
Examples:
  async-naming check LoadData                  Classify a single async method name
  async-naming check LoadData --sync           Non-async names are never flagged
  async-naming scan decls.jsonl                Check declarations from a file
  async-naming scan build/ --format sarif      Walk a directory, SARIF output
  extract-decls | async-naming scan -          Read JSON Lines from stdin
  async-naming rules                           List detectors and SARIF rule ids
  async-naming init                            Write an async-naming.toml"
)]
pub struct Cli {
    /// Directory containing async-naming.toml (default: current directory)
    #[arg(long, global = true, default_value = ".")]
    pub config: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single method name
    Check {
        /// Method identifier, exactly as written
        name: String,

        /// Treat the declaration as synchronous (never flagged)
        #[arg(long)]
        sync: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Check declarations from files, directories or stdin
    #[command(after_help = "\
Examples:
  async-naming scan decls.json                          JSON array or {\"declarations\": [...]}
  async-naming scan decls.jsonl --format json           JSON output for scripting
  async-naming scan out/ --format sarif -o naming.sarif SARIF for GitHub Code Scanning
  async-naming scan - --fail-on low                     Exit code 1 on low+ findings (CI mode)")]
    Scan {
        /// Declaration files (.json, .jsonl, .ndjson), directories, or - for stdin
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format: text, json, sarif (default: config or text)
        #[arg(long, short = 'f', value_parser = ["text", "json", "sarif"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit with code 1 if findings at this severity or higher exist
        #[arg(long, value_parser = ["critical", "high", "medium", "low", "info"])]
        fail_on: Option<String>,
    },

    /// List detectors and the rule ids findings are reported under
    Rules {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write an async-naming.toml with example settings
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { name, sync, format } => check::run(&name, !sync, &format),

        Commands::Scan {
            paths,
            format,
            output,
            fail_on,
        } => scan::run(&cli.config, &paths, format, output.as_deref(), fail_on),

        Commands::Rules { format } => rules::run(&format),

        Commands::Init { path } => init::run(&path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_scan_requires_paths() {
        assert!(Cli::try_parse_from(["async-naming", "scan"]).is_err());
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["async-naming", "check", "Load", "--sync"]).unwrap();
        match cli.command {
            Commands::Check { name, sync, .. } => {
                assert_eq!(name, "Load");
                assert!(sync);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
