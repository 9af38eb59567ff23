//! Command handlers. One module per subcommand.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use plugboard_adapters::{BuiltinCatalog, ManifestCatalog};
use plugboard_core::{application::ports::PluginCatalog, prelude::RegistryService};

use crate::{
    cli::SourceArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

pub mod check;
pub mod completions;
pub mod config;
pub mod init;
pub mod inspect;
pub mod resolve;
pub mod simulate;

/// Resolved plugin sources for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sources {
    pub builtins: bool,
    pub manifests: Vec<PathBuf>,
}

impl Sources {
    /// Configured manifests first, then those named on the command line.
    pub fn from_args(args: &SourceArgs, config: &AppConfig) -> Self {
        let mut manifests = config.registry.manifests.clone();
        manifests.extend(args.manifests.iter().cloned());
        Self {
            builtins: config.registry.builtins && !args.no_builtins,
            manifests,
        }
    }
}

/// Load every catalog named by `sources`, in order.
///
/// The built-in catalog goes first. When a manifest supplies the ordering,
/// only the built-in plugins that ordering names are loaded.
pub fn load_catalogs(sources: &Sources) -> CliResult<Vec<Box<dyn PluginCatalog>>> {
    let mut manifests = Vec::new();
    for path in &sources.manifests {
        manifests.extend(load_manifest_path(path)?);
    }

    let mut catalogs: Vec<Box<dyn PluginCatalog>> = Vec::with_capacity(manifests.len() + 1);
    if sources.builtins {
        let builtin = match manifests.iter().find_map(ManifestCatalog::declared_ordering) {
            Some(ordering) => BuiltinCatalog::for_ordering(ordering),
            None => BuiltinCatalog::new(),
        };
        catalogs.push(Box::new(builtin));
    }
    catalogs.extend(
        manifests
            .into_iter()
            .map(|m| Box::new(m) as Box<dyn PluginCatalog>),
    );

    Ok(catalogs)
}

/// Bootstrap a fresh registry from `sources`.
#[instrument(skip_all, fields(builtins = sources.builtins, manifests = sources.manifests.len()))]
pub fn bootstrap(sources: &Sources) -> CliResult<RegistryService> {
    let catalogs = load_catalogs(sources)?;
    let service = RegistryService::new();
    service
        .bootstrap(&catalogs)
        .with_cli_context(|| "bootstrapping registry")?;
    debug!(catalogs = catalogs.len(), "registry ready");
    Ok(service)
}

fn load_manifest_path(path: &Path) -> CliResult<Vec<ManifestCatalog>> {
    if path.is_dir() {
        Ok(ManifestCatalog::discover(path)?)
    } else if path.exists() {
        Ok(vec![ManifestCatalog::from_path(path)?])
    } else {
        Err(CliError::ManifestNotFound {
            path: path.to_path_buf(),
        })
    }
}
