//! Random modular patch generation
//!
//! This crate builds random VCV Rack patches: a catalog of module kinds, a
//! patch graph of module instances and wires, a seeded generator that fills
//! the graph under the wiring constraints, and the JSON encoder for the
//! host's patch file format. File handling belongs to the CLI.

pub mod catalog;
pub mod document;
pub mod error;
pub mod generate;
pub mod patch;

// Re-export commonly used items
pub use catalog::{Catalog, ModuleKind, ParamBounds, PluginVersions};
pub use document::{WriteOptions, to_json_string, write_patch};
pub use error::{PatchError, Result};
pub use generate::{GenerateOptions, RandomSource, generate, generate_seeded};
pub use patch::{InputKey, ModuleInstance, Patch, Wire};
