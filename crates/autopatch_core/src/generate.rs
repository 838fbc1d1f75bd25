//! Random patch construction
//!
//! Modules are drawn uniformly from the catalog with uniformly sampled
//! parameters, then up to `wire_count` wires are attempted between random
//! pairs of distinct modules. An attempt whose input port is already taken
//! is dropped rather than retried, so the result usually holds fewer wires
//! than requested.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::patch::{ModuleInstance, Patch, Wire};

pub const DEFAULT_WIRE_COLOR: &str = "#00cc00";

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub module_count: usize,
    /// Upper bound on wire attempts, not a guaranteed wire count.
    pub wire_count: usize,
    /// Placement columns, `x` is drawn from `[0, x_range)`.
    pub x_range: i64,
    /// Placement rows, `y` is drawn from `[0, y_range)`.
    pub y_range: i64,
    pub wire_color: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            module_count: 50,
            wire_count: 100,
            x_range: 100,
            y_range: 3,
            wire_color: DEFAULT_WIRE_COLOR.to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn new(module_count: usize, wire_count: usize) -> Self {
        Self {
            module_count,
            wire_count,
            ..Self::default()
        }
    }
}

/// Uniform draws consumed by [`generate`].
pub trait RandomSource {
    /// Uniform integer in `[0, n)`; `n` is never zero.
    fn below(&mut self, n: usize) -> usize;
    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl<R: Rng> RandomSource for R {
    fn below(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }

    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

fn sample_coordinate<S: RandomSource>(source: &mut S, range: i64) -> i64 {
    if range <= 0 {
        return 0;
    }
    source.below(range as usize) as i64
}

/// Build a random patch.
///
/// Draw order is fixed (per module: kind, params, x, y; per wire attempt:
/// module pair, output port, input port) so the same generator state always
/// yields the same patch.
pub fn generate<S: RandomSource>(
    catalog: &Catalog,
    options: &GenerateOptions,
    rng: &mut S,
) -> Result<Patch> {
    let mut patch = Patch::new();
    let kinds = catalog.kinds();

    for _ in 0..options.module_count {
        let kind = &kinds[rng.below(kinds.len())];
        let params = kind
            .params
            .iter()
            .map(|bounds| bounds.scale(rng.unit()))
            .collect();
        let x = sample_coordinate(rng, options.x_range);
        let y = sample_coordinate(rng, options.y_range);
        patch.add_module(ModuleInstance::new(kind.name, params, x, y));
    }

    let module_count = patch.module_count();
    if module_count < 2 {
        // No pair of distinct modules to connect.
        return Ok(patch);
    }

    let mut used_inputs = HashSet::new();
    for _ in 0..options.wire_count {
        let (source, dest) = loop {
            let source = rng.below(module_count);
            let dest = rng.below(module_count);
            if source != dest {
                break (source, dest);
            }
        };

        let outputs = catalog.lookup(&patch.modules()[source].kind)?.outputs;
        let inputs = catalog.lookup(&patch.modules()[dest].kind)?.inputs;
        // Standard kinds all have ports; a portless kind drops the attempt.
        if outputs == 0 || inputs == 0 {
            continue;
        }

        let wire = Wire {
            source_module: source,
            source_output: rng.below(outputs),
            dest_module: dest,
            dest_input: rng.below(inputs),
            color: options.wire_color.clone(),
        };
        if !used_inputs.insert(wire.input_key()) {
            continue;
        }
        patch.add_wire(wire);
    }

    tracing::debug!(
        modules = module_count,
        requested_wires = options.wire_count,
        wires = patch.wire_count(),
        "generated patch"
    );

    Ok(patch)
}

/// [`generate`] driven by a `StdRng` seeded from `seed`.
pub fn generate_seeded(catalog: &Catalog, options: &GenerateOptions, seed: i64) -> Result<Patch> {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    generate(catalog, options, &mut rng)
}
