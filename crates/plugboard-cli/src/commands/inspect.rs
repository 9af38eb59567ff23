//! Implementation of the `plugboard inspect` command.

use clap::ValueEnum;
use plugboard_core::application::RegistrySnapshot;

use crate::{
    cli::{InspectArgs, ListFormat, OutputFormat},
    commands::{Sources, bootstrap},
    config::AppConfig,
    error::{CliError, CliResult},
    output::{OutputManager, Table},
};

pub fn execute(args: InspectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let format = resolve_format(args.format, output.format(), &config)?;
    let service = bootstrap(&Sources::from_args(&args.sources, &config))?;
    let snapshot = service.snapshot()?;

    match format {
        ListFormat::Table => print_summary(&snapshot, &output)?,
        ListFormat::List => {
            for plugin in &snapshot.plugins {
                output.data(&plugin.name)?;
            }
        }
        ListFormat::Json => output.data(&serde_json::to_string_pretty(&snapshot)?)?,
        ListFormat::Csv => output.data(render_csv(&snapshot)?.trim_end())?,
    }

    Ok(())
}

/// One row per registration name. Fields are quoted where needed.
fn render_csv(snapshot: &RegistrySnapshot) -> CliResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["registration_name", "plugin", "event_type", "phase"])?;
    for row in &snapshot.registrations {
        writer.write_record([
            row.registration_name.as_str(),
            row.plugin.as_str(),
            row.event_type.as_str(),
            row.phase.as_deref().unwrap_or_default(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| CliError::Encoding {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| CliError::Encoding {
        message: e.to_string(),
    })
}

/// `--format`, then `--output-format json`, then `output.format` from config.
fn resolve_format(
    explicit: Option<ListFormat>,
    global: OutputFormat,
    config: &AppConfig,
) -> CliResult<ListFormat> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    if global == OutputFormat::Json {
        return Ok(ListFormat::Json);
    }
    <ListFormat as ValueEnum>::from_str(&config.output.format, true).map_err(|e| {
        CliError::ConfigError {
            message: format!("output.format: {e}"),
            source: None,
        }
    })
}

fn print_summary(snapshot: &RegistrySnapshot, output: &OutputManager) -> CliResult<()> {
    if snapshot.ordering.is_empty() {
        output.warning("No plugin ordering injected; nothing is published")?;
        let mut pending = Table::new(format!("Registry ({})", snapshot.phase));
        for name in &snapshot.pending {
            pending.push(name, "pending");
        }
        output.table(&pending)?;
        return Ok(());
    }

    let mut slots = Table::new(format!("Plugin Ordering ({}):", snapshot.phase));
    for (position, name) in snapshot.ordering.iter().enumerate() {
        let status = match snapshot.plugins.iter().find(|p| &p.name == name) {
            Some(p) => format!(
                "{} event type(s){}",
                p.event_types,
                p.description
                    .as_deref()
                    .map(|d| format!("  {d}"))
                    .unwrap_or_default()
            ),
            None => "(empty slot)".to_string(),
        };
        slots.push(format!("{position:>2}. {name}"), status);
    }
    output.table(&slots)?;

    let mut registrations = Table::new("Registration Names:");
    for row in &snapshot.registrations {
        let phase = row
            .phase
            .as_deref()
            .map(|p| format!(", {p}"))
            .unwrap_or_default();
        registrations.push(
            &row.registration_name,
            format!("→ {} ({}{})", row.plugin, row.event_type, phase),
        );
    }
    if registrations.is_empty() {
        output.info("No registration names published")?;
    } else {
        output.table(&registrations)?;
    }

    output.success(&format!(
        "{} plugin(s) published, {} registration name(s)",
        snapshot.plugins.len(),
        snapshot.registrations.len()
    ))?;
    Ok(())
}
