//! JSON file emission

use crate::error::{Error, Result};
use crate::mapping::NormalizedObject;
use crate::types::ResourceKind;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write synced objects as JSON files under a directory
///
/// One `carg_<kind>s.json` per synced kind plus a combined
/// `all_objects.json` keyed by kind. Returns the paths written.
pub fn write_objects(
    dir: impl AsRef<Path>,
    objects: &BTreeMap<ResourceKind, Vec<NormalizedObject>>,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::output(format!("cannot create {}: {e}", dir.display())))?;

    let mut written = Vec::new();
    for (kind, items) in objects {
        let path = dir.join(format!("carg_{}.json", kind.endpoint()));
        write_json(&path, &serde_json::to_value(items)?)?;
        info!(path = %path.display(), objects = items.len(), "wrote output file");
        written.push(path);
    }

    let combined: BTreeMap<String, &Vec<NormalizedObject>> = objects
        .iter()
        .map(|(kind, items)| (kind.endpoint().to_string(), items))
        .collect();
    let path = dir.join("all_objects.json");
    write_json(&path, &serde_json::to_value(&combined)?)?;
    info!(path = %path.display(), "wrote combined output file");
    written.push(path);

    Ok(written)
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    std::fs::write(path, text)
        .map_err(|e| Error::output(format!("cannot write {}: {e}", path.display())))
}
