//! Implementation of the `plugboard check` command.
//!
//! Each manifest is parsed on its own first, so a syntax error names its
//! file. The registry is then bootstrapped from all of them together, which
//! is where ordering and collision errors surface.

use tracing::info;

use crate::{
    cli::CheckArgs,
    commands::{Sources, bootstrap, load_catalogs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let builtins = config.registry.builtins && !args.no_builtins;

    for path in &args.manifests {
        let single = Sources {
            builtins: false,
            manifests: vec![path.clone()],
        };
        if let Err(e) = load_catalogs(&single) {
            output.error(&format!("{}", path.display()))?;
            return Err(e);
        }
        output.line(&format!("  parsed {}", path.display()))?;
    }

    let sources = Sources {
        builtins,
        manifests: args.manifests,
    };
    let service = match bootstrap(&sources) {
        Ok(service) => service,
        Err(e) => {
            output.error("registry rejected the manifests")?;
            return Err(e);
        }
    };

    let snapshot = service.snapshot()?;
    if snapshot.ordering.is_empty() {
        output.warning("No manifest supplies an ordering; nothing would be published")?;
    }

    info!(
        manifests = sources.manifests.len(),
        plugins = snapshot.plugins.len(),
        "manifests checked"
    );
    output.success(&format!(
        "{} manifest(s) OK: {} plugin(s) published, {} registration name(s)",
        sources.manifests.len(),
        snapshot.plugins.len(),
        snapshot.registrations.len()
    ))?;

    Ok(())
}
