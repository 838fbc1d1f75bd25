use serde_json::{Value, json};

use autopatch_core::catalog::AUDIO_INTERFACE;
use autopatch_core::{
    Catalog, GenerateOptions, ModuleInstance, Patch, WriteOptions, generate_seeded, to_json_string,
    write_patch,
};

fn write_to_value(patch: &Patch, options: &WriteOptions) -> Value {
    let mut bytes = Vec::new();
    write_patch(&mut bytes, patch, &Catalog::standard(), options).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn document_arrays_match_patch_sizes() {
    for (modules, wires, seed) in [(0, 10, 1), (1, 10, 2), (12, 40, 3), (50, 100, 4)] {
        let options = GenerateOptions::new(modules, wires);
        let patch = generate_seeded(&Catalog::standard(), &options, seed).unwrap();
        let doc = write_to_value(&patch, &WriteOptions::new("default"));

        assert_eq!(doc["modules"].as_array().unwrap().len(), patch.module_count());
        assert_eq!(doc["wires"].as_array().unwrap().len(), patch.wire_count());
    }
}

#[test]
fn single_module_document() {
    let patch = generate_seeded(&Catalog::standard(), &GenerateOptions::new(1, 100), 0).unwrap();
    let doc = write_to_value(&patch, &WriteOptions::new("default"));

    assert_eq!(doc["modules"].as_array().unwrap().len(), 1);
    assert_eq!(doc["wires"], json!([]));
}

#[test]
fn vca_params_are_positional() {
    let mut patch = Patch::new();
    patch.add_module(ModuleInstance::new("VCA-1", vec![0.3, 0.7], 0, 0));
    let doc = write_to_value(&patch, &WriteOptions::new("default"));

    assert_eq!(
        doc["modules"][0]["params"],
        json!([{ "paramId": 0, "value": 0.3 }, { "paramId": 1, "value": 0.7 }])
    );
}

#[test]
fn audio_interface_embeds_device() {
    let mut patch = Patch::new();
    patch.add_module(ModuleInstance::new(AUDIO_INTERFACE, vec![], 5, 2));
    let doc = write_to_value(&patch, &WriteOptions::new("Speakers"));
    let module = &doc["modules"][0];

    assert_eq!(module["data"]["audio"]["deviceName"], "Speakers");
    assert_eq!(module["params"], json!([]));
    assert_eq!(module["pos"], json!([5, 2]));
}

#[test]
fn wire_ids_resolve_against_module_array() {
    let patch = generate_seeded(&Catalog::standard(), &GenerateOptions::new(20, 60), 77).unwrap();
    let doc = write_to_value(&patch, &WriteOptions::new("default"));
    let modules = doc["modules"].as_array().unwrap();

    for (entry, wire) in doc["wires"].as_array().unwrap().iter().zip(patch.wires()) {
        let out_id = entry["outputModuleId"].as_u64().unwrap() as usize;
        let in_id = entry["inputModuleId"].as_u64().unwrap() as usize;
        assert_eq!((out_id, in_id), (wire.source_module, wire.dest_module));
        assert_eq!(modules[out_id]["model"], patch.modules()[out_id].kind.as_str());
        assert_eq!(modules[in_id]["model"], patch.modules()[in_id].kind.as_str());
        assert_eq!(entry["color"], "#00cc00");
    }
}

#[test]
fn seeded_documents_are_byte_identical() {
    let catalog = Catalog::standard();
    let options = GenerateOptions::new(40, 80);
    let write = WriteOptions::new("default");

    let a = generate_seeded(&catalog, &options, 2019).unwrap();
    let b = generate_seeded(&catalog, &options, 2019).unwrap();
    assert_eq!(
        to_json_string(&a, &catalog, &write).unwrap(),
        to_json_string(&b, &catalog, &write).unwrap()
    );
}
