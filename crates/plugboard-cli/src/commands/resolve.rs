//! Implementation of the `plugboard resolve` command.

use serde::Serialize;
use tracing::debug;

use crate::{
    cli::{OutputFormat, ResolveArgs},
    commands::{Sources, bootstrap},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Resolution<'a> {
    registration_name: &'a str,
    plugin: &'a str,
}

pub fn execute(args: ResolveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    if args.registration_name.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "registration name must not be empty".into(),
            source: None,
        });
    }

    let service = bootstrap(&Sources::from_args(&args.sources, &config))?;

    let owner = service
        .owner_of(&args.registration_name)?
        .ok_or_else(|| CliError::RegistrationNotFound {
            name: args.registration_name.clone(),
        })?;
    debug!(registration_name = %args.registration_name, plugin = %owner, "resolved");

    if output.format() == OutputFormat::Json {
        let resolution = Resolution {
            registration_name: &args.registration_name,
            plugin: owner.as_str(),
        };
        output.data(&serde_json::to_string(&resolution)?)?;
    } else {
        output.data(owner.as_str())?;
    }

    Ok(())
}
