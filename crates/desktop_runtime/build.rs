use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WindowEntry {
    id: String,
    title: String,
    width: f64,
    height: f64,
    #[serde(default)]
    default_top: Option<f64>,
    #[serde(default)]
    default_left: Option<f64>,
    #[serde(default)]
    cascading: bool,
    #[serde(default)]
    prevent_transform_reset: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct WindowCatalog {
    schema_version: u32,
    window: Vec<WindowEntry>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("windows.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let catalog: WindowCatalog = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if catalog.schema_version != 1 {
        panic!(
            "window catalog schema mismatch in {}: expected 1 found {}",
            path.display(),
            catalog.schema_version
        );
    }

    let mut seen = HashSet::new();
    for entry in &catalog.window {
        if !seen.insert(entry.id.clone()) {
            panic!("duplicate window id `{}` in {}", entry.id, path.display());
        }
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(entry.width) || !valid(entry.height) {
            panic!(
                "window `{}` in {} must have positive finite width/height",
                entry.id,
                path.display()
            );
        }
    }

    let json = serde_json::to_string_pretty(&catalog.window).expect("serialize window catalog");
    let generated = format!(
        "/// Build-time generated window catalog JSON.\n\
pub const WINDOW_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("window_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
