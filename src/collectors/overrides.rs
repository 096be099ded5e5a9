use crate::config::OverridesConfig;
use crate::error::OverrideError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of loading an override directory: merged values plus per-file failures.
#[derive(Debug, Default)]
pub struct OverrideReport {
    pub values:   Map<String, Value>,
    pub loaded:   Vec<PathBuf>,
    pub failures: Vec<(PathBuf, OverrideError)>,
}

/// Parse one override document. Only JSON objects are accepted.
pub fn read_override_file(path: &Path) -> Result<Map<String, Value>, OverrideError> {
    let text = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => Ok(map),
        _                  => Err(OverrideError::NotAnObject),
    }
}

/// `*.json` entries of `dir`, sorted by file name.
fn json_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(e)  => e,
        Err(e) => {
            warn!(dir = %dir.display(), "cannot list override directory: {}", e);
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();
    files.sort();
    files
}

/// Merge every `*.json` object in `dir`; later files win on shared keys.
/// A missing directory is empty, a bad file is recorded and skipped.
pub fn load_overrides(dir: &Path) -> OverrideReport {
    let mut report = OverrideReport::default();
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "override directory absent");
        return report;
    }

    for path in json_files(dir) {
        match read_override_file(&path) {
            Ok(map) => {
                report.values.extend(map);
                report.loaded.push(path);
            }
            Err(e) => {
                warn!(file = %path.display(), "skipping override file: {}", e);
                report.failures.push((path, e));
            }
        }
    }
    report
}

/// Override values for the configured directory, empty when none is configured.
pub fn get_system_resource_overrides(cfg: &OverridesConfig) -> Map<String, Value> {
    match &cfg.dir {
        Some(dir) => load_overrides(dir).values,
        None      => Map::new(),
    }
}
