//! Implementation of the `plugboard simulate` command.

use plugboard_core::domain::{NativeEvent, Registration};

use crate::{
    cli::{OutputFormat, SimulateArgs},
    commands::{Sources, bootstrap},
    config::AppConfig,
    error::CliResult,
    output::{OutputManager, Table},
};

pub fn execute(args: SimulateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = bootstrap(&Sources::from_args(&args.sources, &config))?;

    let mut native = NativeEvent::new(&args.top_level_type);
    if let Some(target) = &args.target {
        native = native.with_target(target);
    }
    let dispatched = service.extract_events(&native)?;

    if output.format() == OutputFormat::Json {
        output.data(&serde_json::to_string_pretty(&dispatched)?)?;
        return Ok(());
    }

    if dispatched.is_empty() {
        output.info(&format!("No plugin extracts '{}'", args.top_level_type))?;
        return Ok(());
    }

    let mut table = Table::new(format!("Synthetic events for '{}':", args.top_level_type));
    for item in &dispatched {
        let names = match item.event.dispatch_config.registration() {
            Some(Registration::Single(name)) => name.to_string(),
            Some(Registration::Phased(phases)) => phases
                .values()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" / "),
            None => "-".to_string(),
        };
        let owner = item.plugin.as_deref().unwrap_or("unowned");
        table.push(&item.event.event_type, format!("{names}  → {owner}"));
    }
    output.table(&table)?;

    Ok(())
}
