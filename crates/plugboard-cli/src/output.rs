//! Terminal rendering for registry commands.
//!
//! Three kinds of output leave the CLI:
//!
//! - **data**: JSON, CSV, bare names. Always written, so `-q` never empties a
//!   pipe.
//! - **status lines**: `✓`, `✗`, `⚠`, `ℹ` prefixed messages. Dropped under
//!   `-q`, except failures, which go to stderr.
//! - **tables**: a title and two aligned columns, used for slot listings,
//!   registration names and simulated events.
//!
//! Rendering is done by plain functions returning strings; the manager only
//! decides whether and where to write them.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Fail,
    Warn,
    Note,
}

impl Status {
    fn glyph(self) -> &'static str {
        match self {
            Self::Ok => "\u{2713}",
            Self::Fail => "\u{2717}",
            Self::Warn => "\u{26a0}",
            Self::Note => "\u{2139}",
        }
    }
}

/// A titled two-column listing. Key width adapts to the longest key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    title: String,
    rows: Vec<(String, String)>,
}

impl Table {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.rows.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn render_status(status: Status, msg: &str, color: bool) -> String {
    if !color {
        return format!("{} {msg}", status.glyph());
    }
    let glyph = status.glyph();
    match status {
        Status::Ok => format!("{} {}", glyph.green().bold(), msg.green()),
        Status::Fail => format!("{} {}", glyph.red().bold(), msg.red()),
        Status::Warn => format!("{} {}", glyph.yellow().bold(), msg.yellow()),
        Status::Note => format!("{} {}", glyph.blue().bold(), msg.blue()),
    }
}

pub fn render_table(table: &Table, color: bool) -> Vec<String> {
    let width = table
        .rows
        .iter()
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(if color {
        table.title.cyan().bold().to_string()
    } else {
        table.title.clone()
    });
    for (key, value) in &table.rows {
        let key = format!("{key:<width$}");
        lines.push(if color {
            format!("  {}  {value}", key.dimmed())
        } else {
            format!("  {key}  {value}")
        });
    }
    lines
}

/// Writes rendered output according to `-q`, `--no-color` and
/// `--output-format`.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            explicit => explicit,
        };
        let color = format == OutputFormat::Human && !args.no_color && !config.output.no_color;

        Self {
            format,
            quiet: args.quiet,
            color,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// Machine-readable payload on stdout.
    pub fn data(&self, payload: &str) -> io::Result<()> {
        self.stdout.write_line(payload)
    }

    pub fn status(&self, status: Status, msg: &str) -> io::Result<()> {
        let line = render_status(status, msg, self.color);
        match status {
            Status::Fail => self.stderr.write_line(&line),
            _ if self.quiet => Ok(()),
            _ => self.stdout.write_line(&line),
        }
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Ok, msg)
    }

    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Fail, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Warn, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.status(Status::Note, msg)
    }

    /// A table followed by a blank line.
    pub fn table(&self, table: &Table) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        for line in render_table(table, self.color) {
            self.stdout.write_line(&line)?;
        }
        self.stdout.write_line("")
    }

    /// Unadorned progress line, dropped under `-q`.
    pub fn line(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(msg)
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    /// Resolved format; never `Auto`.
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(format: OutputFormat, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn plain_status_lines_carry_glyphs() {
        assert_eq!(render_status(Status::Ok, "done", false), "\u{2713} done");
        assert_eq!(render_status(Status::Fail, "bad", false), "\u{2717} bad");
        assert!(render_status(Status::Warn, "hm", true).contains("hm"));
    }

    #[test]
    fn table_aligns_to_longest_key() {
        let mut table = Table::new("Slots:");
        table.push("simple", "4 event type(s)");
        table.push("enter-leave", "2 event type(s)");

        assert_eq!(
            render_table(&table, false),
            [
                "Slots:",
                "  simple       4 event type(s)",
                "  enter-leave  2 event type(s)",
            ]
        );
    }

    #[test]
    fn empty_table_renders_title_only() {
        let table = Table::new("Nothing:");
        assert!(table.is_empty());
        assert_eq!(render_table(&table, false), ["Nothing:"]);
    }

    #[test]
    fn color_needs_human_format() {
        assert!(manager(OutputFormat::Human, false).supports_color());
        assert!(!manager(OutputFormat::Human, true).supports_color());
        assert!(!manager(OutputFormat::Plain, false).supports_color());
        assert!(!manager(OutputFormat::Json, false).supports_color());
    }

    #[test]
    fn explicit_format_is_kept() {
        assert_eq!(manager(OutputFormat::Json, true).format(), OutputFormat::Json);
        assert_eq!(manager(OutputFormat::Plain, true).format(), OutputFormat::Plain);
    }
}
