//! Options accepted by every `plugboard` subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Args, ValueEnum, builder::FalseyValueParser};

#[derive(Debug, Clone, Args)]
#[command(next_help_heading = "Global Options")]
pub struct GlobalArgs {
    /// More log detail on stderr: -v info, -vv debug (derivation, catalogs),
    /// -vvv trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print requested data and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Plain output without ANSI colours (also set by NO_COLOR)
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    /// Read settings from FILE instead of the platform config location
    #[arg(short, long, global = true, value_name = "FILE", env = "PLUGBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Rendering of command output; `json` also turns log lines into JSON
    #[arg(long, global = true, value_enum, default_value_t)]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Level for Plugboard's own log targets. `-q` wins over `-v`.
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, 2) => "debug",
            (false, _) => "trace",
        }
    }

    /// Whether failures should print their error chain.
    pub fn verbose_errors(&self) -> bool {
        self.verbose > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise
    #[default]
    Auto,
    /// Coloured tables
    Human,
    /// Tables without colour
    Plain,
    /// JSON documents on stdout
    Json,
}
