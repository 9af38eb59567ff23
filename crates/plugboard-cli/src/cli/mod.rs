//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "plugboard",
    bin_name = "plugboard",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Inspect and check event-plugin registries",
    long_about = "Plugboard composes independently authored event plugins into one \
                  deterministic dispatch table, and reports conflicts before they \
                  reach production.",
    after_help = "EXAMPLES:\n\
        \x20 plugboard inspect\n\
        \x20 plugboard inspect --manifest plugins/tap.toml --format json\n\
        \x20 plugboard resolve onClickCapture\n\
        \x20 plugboard check plugins/*.toml\n\
        \x20 plugboard simulate mouseout --target 'div#menu'",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bootstrap the registry and print its dispatch tables.
    #[command(
        visible_alias = "ls",
        about = "Print the ordering and registration table",
        after_help = "EXAMPLES:\n\
            \x20 plugboard inspect\n\
            \x20 plugboard inspect --no-builtins --manifest app.toml\n\
            \x20 plugboard inspect --format csv"
    )]
    Inspect(InspectArgs),

    /// Find the plugin that owns a registration name.
    #[command(
        about = "Resolve a registration name to its plugin",
        after_help = "EXAMPLES:\n\
            \x20 plugboard resolve onClick\n\
            \x20 plugboard resolve onTap --manifest tap.toml"
    )]
    Resolve(ResolveArgs),

    /// Validate manifests against the registry rules.
    #[command(
        about = "Check plugin manifests for wiring errors",
        after_help = "EXAMPLES:\n\
            \x20 plugboard check tap.toml\n\
            \x20 plugboard check --no-builtins plugins/"
    )]
    Check(CheckArgs),

    /// Run every ordered plugin's extractor against a native event.
    #[command(
        about = "Simulate extraction of a native event",
        after_help = "EXAMPLES:\n\
            \x20 plugboard simulate click\n\
            \x20 plugboard simulate mouseout --target 'a#home'"
    )]
    Simulate(SimulateArgs),

    /// Initialise a Plugboard configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 plugboard init                   # platform config location\n\
            \x20 plugboard --config ./pb.toml init\n\
            \x20 plugboard init --force           # overwrite"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 plugboard completions bash > ~/.local/share/bash-completion/completions/plugboard\n\
            \x20 plugboard completions zsh  > ~/.zfunc/_plugboard\n\
            \x20 plugboard completions fish > ~/.config/fish/completions/plugboard.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Plugboard configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 plugboard config get registry.builtins\n\
            \x20 plugboard config list\n\
            \x20 plugboard config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where plugins come from. Flattened into every registry command.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Extra manifest files or directories, added after configured ones.
    #[arg(
        short = 'm',
        long = "manifest",
        value_name = "PATH",
        help = "Plugin manifest file or directory (repeatable)"
    )]
    pub manifests: Vec<PathBuf>,

    /// Leave the built-in plugins out.
    #[arg(long = "no-builtins", help = "Do not load built-in plugins")]
    pub no_builtins: bool,
}

// ── inspect ───────────────────────────────────────────────────────────────────

/// Arguments for `plugboard inspect`.
#[derive(Debug, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output format. Falls back to `output.format` from the config.
    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<ListFormat>,
}

/// Output format for the `inspect` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One plugin name per line, in dispatch order.
    List,
    /// JSON snapshot.
    Json,
    /// CSV registration rows.
    Csv,
}

// ── resolve ───────────────────────────────────────────────────────────────────

/// Arguments for `plugboard resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Registration name, e.g. `onClick` or `onClickCapture`.
    #[arg(value_name = "REGISTRATION_NAME")]
    pub registration_name: String,

    #[command(flatten)]
    pub sources: SourceArgs,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `plugboard check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Manifests to check. Configured manifests are ignored.
    #[arg(value_name = "MANIFEST", required = true)]
    pub manifests: Vec<PathBuf>,

    #[arg(long = "no-builtins", help = "Check without the built-in plugins")]
    pub no_builtins: bool,
}

// ── simulate ──────────────────────────────────────────────────────────────────

/// Arguments for `plugboard simulate`.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Native top-level event type, e.g. `click` or `mouseout`.
    #[arg(value_name = "TOP_LEVEL_TYPE")]
    pub top_level_type: String,

    /// Optional target description carried into every synthetic event.
    #[arg(short = 't', long = "target", value_name = "TARGET")]
    pub target: Option<String>,

    #[command(flatten)]
    pub sources: SourceArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `plugboard init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `plugboard completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `plugboard config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `registry.builtins`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
