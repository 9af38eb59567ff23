//! Tracing setup for the `plugboard` binary.
//!
//! Library crates only emit events. The binary decides the level (from
//! `-v`/`-q`, unless `RUST_LOG` is set) and the line style: compact text on
//! stderr, or one JSON object per line under `--output-format json` so the
//! log stream can be parsed next to the JSON payload on stdout.

use std::io::IsTerminal as _;

use anyhow::Context;
use tracing_subscriber::{
    EnvFilter, filter::Directive, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::{GlobalArgs, OutputFormat};

/// Crates whose events the default filter lets through.
const LOG_TARGETS: [&str; 3] = ["plugboard", "plugboard_core", "plugboard_adapters"];

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogStyle {
    Text { ansi: bool },
    Json,
}

impl LogStyle {
    fn for_args(args: &GlobalArgs) -> Self {
        if args.output_format == OutputFormat::Json {
            Self::Json
        } else {
            Self::Text {
                ansi: !args.no_color && std::io::stderr().is_terminal(),
            }
        }
    }
}

/// Install the global subscriber. Call once, first thing after parsing.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(args.log_level())?,
    };
    let registry = tracing_subscriber::registry().with(filter);

    match LogStyle::for_args(args) {
        LogStyle::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogStyle::Text { ansi } => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_ansi(ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
    .context("tracing subscriber already installed")
}

/// `level` for every Plugboard crate; everything else stays silent.
fn default_filter(level: &str) -> anyhow::Result<EnvFilter> {
    LOG_TARGETS
        .iter()
        .try_fold(EnvFilter::new("off"), |filter, target| {
            let directive = format!("{target}={level}")
                .parse::<Directive>()
                .with_context(|| format!("bad log directive for {target}"))?;
            Ok(filter.add_directive(directive))
        })
}
