//! TOML plugin manifests.
//!
//! A manifest declares plugins and, optionally, the global ordering. Plugins
//! are built once at load time, so a [`ManifestCatalog`] keeps handing out the
//! same identities for as long as it lives.
//!
//! # Format
//!
//! ```toml
//! order = ["simple", "tap"]             # optional
//!
//! [plugins.tap]
//! extractor   = "dispatch"              # dispatch | noop; omit for no capability
//! description = "Touch taps"            # optional
//!
//! [plugins.tap.event_types.tap]
//! registration_name = "onTap"
//!
//! [plugins.tap.event_types.press.phased_registration_names]
//! bubbled  = "onPress"
//! captured = "onPressCapture"
//! ```
//!
//! Plugins and their event types are published in key order.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use plugboard_core::{
    application::{ApplicationError, ports::PluginCatalog},
    domain::{DispatchConfig, Phase, Plugin, PluginName, PluginOrdering, RegistrationName},
    error::PlugboardResult,
};

use crate::extractors::extractor_by_name;

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised representation of a manifest file.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PluginManifest {
    pub order: Option<Vec<String>>,
    #[serde(default)]
    pub plugins: BTreeMap<String, PluginEntry>,
}

/// `[plugins.<name>]` section.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PluginEntry {
    pub extractor: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub event_types: BTreeMap<String, EventTypeEntry>,
}

/// `[plugins.<name>.event_types.<event>]` section.
///
/// Both shapes may be absent; the registry rejects such an event type when
/// the plugin is published.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct EventTypeEntry {
    pub registration_name: Option<String>,
    pub phased_registration_names: Option<PhasedEntry>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PhasedEntry {
    pub bubbled: Option<String>,
    pub captured: Option<String>,
}

impl EventTypeEntry {
    fn to_dispatch_config(&self) -> DispatchConfig {
        let phased = self.phased_registration_names.as_ref().map(|p| {
            [(Phase::Bubbled, &p.bubbled), (Phase::Captured, &p.captured)]
                .into_iter()
                .filter_map(|(phase, name)| {
                    name.as_ref().map(|n| (phase, RegistrationName::new(n.as_str())))
                })
                .collect::<BTreeMap<_, _>>()
        });

        DispatchConfig {
            registration_name: self.registration_name.as_deref().map(RegistrationName::new),
            phased_registration_names: phased,
        }
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// A plugin catalog backed by one manifest.
#[derive(Debug, Clone)]
pub struct ManifestCatalog {
    path: PathBuf,
    ordering: Option<PluginOrdering>,
    plugins: Vec<(PluginName, Arc<Plugin>)>,
}

impl ManifestCatalog {
    /// Read and build a manifest from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path>) -> PlugboardResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::ManifestInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&raw, path)
    }

    /// Build a manifest from TOML source. `origin` is used for naming and
    /// error reporting only.
    pub fn parse(source: &str, origin: impl Into<PathBuf>) -> PlugboardResult<Self> {
        let path = origin.into();
        let manifest: PluginManifest =
            toml::from_str(source).map_err(|e| ApplicationError::ManifestInvalid {
                path: path.clone(),
                reason: e.message().to_string(),
            })?;
        Self::from_manifest(manifest, path)
    }

    /// Build a catalog from an already-deserialised manifest.
    pub fn from_manifest(manifest: PluginManifest, path: PathBuf) -> PlugboardResult<Self> {
        let ordering = manifest
            .order
            .map(|names| {
                names
                    .into_iter()
                    .map(PluginName::try_new)
                    .collect::<Result<Vec<_>, _>>()
                    .map(PluginOrdering::new)
            })
            .transpose()?;

        let mut plugins = Vec::with_capacity(manifest.plugins.len());
        for (name, entry) in manifest.plugins {
            let name = PluginName::try_new(name)?;
            let plugin = build_plugin(&name, &entry)?;
            plugins.push((name, plugin));
        }

        debug!(
            path = %path.display(),
            plugins = plugins.len(),
            has_ordering = ordering.is_some(),
            "manifest loaded"
        );

        Ok(Self {
            path,
            ordering,
            plugins,
        })
    }

    /// Load every `*.toml` manifest under `dir`, sorted by path.
    ///
    /// Unreadable entries are skipped with a warning; manifests that fail to
    /// parse are errors.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn discover(dir: impl AsRef<Path>) -> PlugboardResult<Vec<Self>> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ApplicationError::CatalogUnavailable {
                catalog: dir.display().to_string(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut catalogs = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let is_manifest = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "toml");
            if is_manifest {
                catalogs.push(Self::from_path(entry.path())?);
            }
        }

        debug!(count = catalogs.len(), "finished discovering manifests");
        Ok(catalogs)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_ordering(&self) -> bool {
        self.ordering.is_some()
    }

    pub fn declared_ordering(&self) -> Option<&PluginOrdering> {
        self.ordering.as_ref()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl PluginCatalog for ManifestCatalog {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn ordering(&self) -> PlugboardResult<Option<PluginOrdering>> {
        Ok(self.ordering.clone())
    }

    fn plugins(&self) -> PlugboardResult<Vec<(PluginName, Arc<Plugin>)>> {
        Ok(self.plugins.clone())
    }
}

fn build_plugin(name: &PluginName, entry: &PluginEntry) -> PlugboardResult<Arc<Plugin>> {
    let mut builder = Plugin::builder();

    if let Some(extractor) = &entry.extractor {
        let shared = extractor_by_name(extractor).ok_or_else(|| {
            ApplicationError::UnknownExtractor {
                plugin: name.to_string(),
                extractor: extractor.clone(),
            }
        })?;
        builder = builder.shared_extractor(shared);
    }

    if let Some(description) = &entry.description {
        builder = builder.description(description);
    }

    for (event, config) in &entry.event_types {
        builder = builder.event_type(event, config.to_dispatch_config());
    }

    Ok(builder.build())
}
