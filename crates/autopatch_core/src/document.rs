//! VCV Rack patch document encoding
//!
//! Converts a [`Patch`] into the JSON layout the host application loads.
//! Module and wire entries keep construction order; wire endpoints are the
//! module array positions, which the host resolves against `modules`.

use std::io::Write;

use serde::Serialize;

use crate::catalog::{AUDIO_INTERFACE, CORE_PLUGIN, Catalog, PluginVersions};
use crate::error::Result;
use crate::patch::{ModuleInstance, Patch, Wire};

const AUDIO_DRIVER: u32 = 1;
const AUDIO_OFFSET: u32 = 0;
const AUDIO_MAX_CHANNELS: u32 = 8;
const AUDIO_SAMPLE_RATE: u32 = 44100;
const AUDIO_BLOCK_SIZE: u32 = 256;

/// Serialization-time configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Audio device the `AudioInterface` modules open.
    pub device_name: String,
    pub versions: PluginVersions,
}

impl WriteOptions {
    pub fn new(device_name: impl Into<String>) -> Self {
        Self {
            device_name: device_name.into(),
            versions: PluginVersions::default(),
        }
    }
}

#[derive(Serialize)]
struct PatchDocument<'a> {
    version: &'a str,
    modules: Vec<ModuleEntry<'a>>,
    wires: Vec<WireEntry<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ModuleEntry<'a> {
    AudioInterface(AudioInterfaceEntry<'a>),
    Generic(GenericEntry<'a>),
}

#[derive(Serialize)]
struct GenericEntry<'a> {
    plugin: &'a str,
    version: &'a str,
    model: &'a str,
    pos: [i64; 2],
    params: Vec<ParamEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParamEntry {
    param_id: usize,
    value: f64,
}

#[derive(Serialize)]
struct AudioInterfaceEntry<'a> {
    plugin: &'a str,
    version: &'a str,
    model: &'a str,
    params: [ParamEntry; 0],
    data: AudioData<'a>,
    pos: [i64; 2],
}

#[derive(Serialize)]
struct AudioData<'a> {
    audio: AudioSettings<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioSettings<'a> {
    driver: u32,
    device_name: &'a str,
    offset: u32,
    max_channels: u32,
    sample_rate: u32,
    block_size: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireEntry<'a> {
    color: &'a str,
    output_module_id: usize,
    output_id: usize,
    input_module_id: usize,
    input_id: usize,
}

fn plugin_version<'a>(versions: &'a PluginVersions, plugin: &str) -> &'a str {
    versions.get(plugin).unwrap_or_else(|| {
        tracing::warn!(plugin, "no version configured for plugin, writing empty version");
        ""
    })
}

fn module_entry<'a>(
    module: &'a ModuleInstance,
    catalog: &Catalog,
    options: &'a WriteOptions,
) -> Result<ModuleEntry<'a>> {
    let pos = [module.x, module.y];
    if module.kind == AUDIO_INTERFACE {
        return Ok(ModuleEntry::AudioInterface(AudioInterfaceEntry {
            plugin: CORE_PLUGIN,
            version: options.versions.core(),
            model: AUDIO_INTERFACE,
            params: [],
            data: AudioData {
                audio: AudioSettings {
                    driver: AUDIO_DRIVER,
                    device_name: &options.device_name,
                    offset: AUDIO_OFFSET,
                    max_channels: AUDIO_MAX_CHANNELS,
                    sample_rate: AUDIO_SAMPLE_RATE,
                    block_size: AUDIO_BLOCK_SIZE,
                },
            },
            pos,
        }));
    }

    let kind = catalog.lookup(&module.kind)?;
    Ok(ModuleEntry::Generic(GenericEntry {
        plugin: kind.plugin,
        version: plugin_version(&options.versions, kind.plugin),
        model: &module.kind,
        pos,
        params: module
            .params
            .iter()
            .enumerate()
            .map(|(param_id, &value)| ParamEntry { param_id, value })
            .collect(),
    }))
}

fn wire_entry(wire: &Wire) -> WireEntry<'_> {
    WireEntry {
        color: &wire.color,
        output_module_id: wire.source_module,
        output_id: wire.source_output,
        input_module_id: wire.dest_module,
        input_id: wire.dest_input,
    }
}

fn build_document<'a>(
    patch: &'a Patch,
    catalog: &Catalog,
    options: &'a WriteOptions,
) -> Result<PatchDocument<'a>> {
    let modules = patch
        .modules()
        .iter()
        .map(|module| module_entry(module, catalog, options))
        .collect::<Result<Vec<_>>>()?;

    Ok(PatchDocument {
        version: options.versions.core(),
        modules,
        wires: patch.wires().iter().map(wire_entry).collect(),
    })
}

/// Write `patch` as a pretty-printed patch document.
///
/// The document is assembled before the first byte is written, so an
/// unknown module kind leaves the sink untouched.
pub fn write_patch<W: Write>(
    out: W,
    patch: &Patch,
    catalog: &Catalog,
    options: &WriteOptions,
) -> Result<()> {
    let document = build_document(patch, catalog, options)?;
    serde_json::to_writer_pretty(out, &document)?;
    Ok(())
}

pub fn to_json_string(patch: &Patch, catalog: &Catalog, options: &WriteOptions) -> Result<String> {
    let document = build_document(patch, catalog, options)?;
    Ok(serde_json::to_string_pretty(&document)?)
}
