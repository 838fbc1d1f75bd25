//! Module catalog
//!
//! Static reference data describing every module kind the generator can
//! place: port counts, parameter bounds and the plugin each kind ships in.
//! Plugin versions live in [`PluginVersions`], a plain value the caller
//! configures before serializing.

use std::collections::BTreeMap;

use crate::error::{PatchError, Result};

pub const CORE_PLUGIN: &str = "Core";
pub const FUNDAMENTAL_PLUGIN: &str = "Fundamental";

/// Kind name of the host's built-in audio device module.
pub const AUDIO_INTERFACE: &str = "AudioInterface";

/// Half-open range `[min, max)` a parameter is sampled from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    pub min: f64,
    pub max: f64,
}

impl ParamBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a uniform sample in `[0, 1)` into these bounds.
    pub fn scale(&self, unit: f64) -> f64 {
        self.min + (self.max - self.min) * unit
    }
}

const UNIT: ParamBounds = ParamBounds::new(0.0, 1.0);

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleKind {
    pub name: &'static str,
    pub inputs: usize,
    pub outputs: usize,
    /// One entry per parameter, in parameter index order.
    pub params: &'static [ParamBounds],
    pub plugin: &'static str,
}

impl ModuleKind {
    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

static STANDARD_KINDS: &[ModuleKind] = &[
    ModuleKind {
        name: "VCO",
        inputs: 4,
        outputs: 4,
        params: &[
            UNIT,
            UNIT,
            ParamBounds::new(-54.0, 54.0),
            ParamBounds::new(-1.0, 1.0),
            UNIT,
            UNIT,
            UNIT,
        ],
        plugin: FUNDAMENTAL_PLUGIN,
    },
    ModuleKind {
        name: "LFO",
        inputs: 4,
        outputs: 4,
        params: &[
            UNIT,
            UNIT,
            ParamBounds::new(-8.0, 8.0),
            UNIT,
            UNIT,
            UNIT,
            UNIT,
        ],
        plugin: FUNDAMENTAL_PLUGIN,
    },
    ModuleKind {
        name: "VCA-1",
        inputs: 2,
        outputs: 1,
        params: &[UNIT, UNIT],
        plugin: FUNDAMENTAL_PLUGIN,
    },
    ModuleKind {
        name: "Delay",
        inputs: 5,
        outputs: 1,
        params: &[UNIT, UNIT, UNIT, UNIT],
        plugin: FUNDAMENTAL_PLUGIN,
    },
    // Only two of the interface's channels are wired.
    ModuleKind {
        name: AUDIO_INTERFACE,
        inputs: 2,
        outputs: 2,
        params: &[],
        plugin: CORE_PLUGIN,
    },
];

/// Closed registry of module kinds.
///
/// Declaration order is significant: generation samples kinds by position,
/// so a fixed order keeps seeded runs reproducible.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    kinds: &'static [ModuleKind],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    pub fn standard() -> Self {
        Catalog {
            kinds: STANDARD_KINDS,
        }
    }

    pub fn lookup(&self, name: &str) -> Result<&'static ModuleKind> {
        self.kinds
            .iter()
            .find(|kind| kind.name == name)
            .ok_or_else(|| PatchError::UnknownKind(name.to_string()))
    }

    pub fn kinds(&self) -> &'static [ModuleKind] {
        self.kinds
    }

    pub fn kind_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.iter().map(|kind| kind.name)
    }

    /// Distinct plugin names, in order of first appearance.
    pub fn plugins(&self) -> Vec<&'static str> {
        let mut plugins: Vec<&'static str> = Vec::new();
        for kind in self.kinds {
            if !plugins.contains(&kind.plugin) {
                plugins.push(kind.plugin);
            }
        }
        plugins
    }
}

/// Version string written for each plugin.
///
/// Read at serialization time, so overrides applied after generation still
/// show up in the written document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginVersions {
    versions: BTreeMap<String, String>,
}

impl Default for PluginVersions {
    fn default() -> Self {
        let mut versions = BTreeMap::new();
        versions.insert(CORE_PLUGIN.to_string(), "0.6.2c".to_string());
        versions.insert(FUNDAMENTAL_PLUGIN.to_string(), "0.6.2".to_string());
        PluginVersions { versions }
    }
}

impl PluginVersions {
    pub fn get(&self, plugin: &str) -> Option<&str> {
        self.versions.get(plugin).map(String::as_str)
    }

    pub fn set(&mut self, plugin: impl Into<String>, version: impl Into<String>) {
        self.versions.insert(plugin.into(), version.into());
    }

    pub fn remove(&mut self, plugin: &str) -> Option<String> {
        self.versions.remove(plugin)
    }

    /// Version of the host application itself, written at the document root.
    pub fn core(&self) -> &str {
        self.get(CORE_PLUGIN).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.versions
            .iter()
            .map(|(plugin, version)| (plugin.as_str(), version.as_str()))
    }
}
