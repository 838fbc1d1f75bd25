//! Patch graph model
//!
//! A `Patch` owns a dense list of module instances and the wires between
//! them. A module's position in `modules` is its id; wires refer to modules
//! by that index and the host application resolves them the same way, so
//! entries are only ever appended.

/// A placed module with concrete parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInstance {
    /// Catalog kind name, e.g. `"VCO"`.
    pub kind: String,
    /// One value per parameter, in parameter index order.
    pub params: Vec<f64>,
    pub x: i64,
    pub y: i64,
}

impl ModuleInstance {
    pub fn new(kind: impl Into<String>, params: Vec<f64>, x: i64, y: i64) -> Self {
        Self {
            kind: kind.into(),
            params,
            x,
            y,
        }
    }
}

/// Directed connection from an output port to an input port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    pub source_module: usize,
    pub source_output: usize,
    pub dest_module: usize,
    pub dest_input: usize,
    /// Hex notation, e.g. `"#00cc00"`.
    pub color: String,
}

/// Identifies one input port; each may receive at most one wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputKey {
    pub module: usize,
    pub input: usize,
}

impl Wire {
    pub fn input_key(&self) -> InputKey {
        InputKey {
            module: self.dest_module,
            input: self.dest_input,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    modules: Vec<ModuleInstance>,
    wires: Vec<Wire>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a module and return the id wires use to reference it.
    pub fn add_module(&mut self, module: ModuleInstance) -> usize {
        self.modules.push(module);
        self.modules.len() - 1
    }

    /// Append a wire and return its id.
    pub fn add_wire(&mut self, wire: Wire) -> usize {
        self.wires.push(wire);
        self.wires.len() - 1
    }

    pub fn modules(&self) -> &[ModuleInstance] {
        &self.modules
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn module(&self, id: usize) -> Option<&ModuleInstance> {
        self.modules.get(id)
    }

    pub fn wire(&self, id: usize) -> Option<&Wire> {
        self.wires.get(id)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }
}
