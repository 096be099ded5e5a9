use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SYSTEM_CONFIG: &str = "/etc/hostfacts/hostfacts.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mounts: MountsConfig,

    #[serde(default)]
    pub overrides: OverridesConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Disk-usage enumeration policy.
///
/// Example in hostfacts.toml:
/// ```toml
/// [mounts]
/// check_remote_mounts         = true
/// check_remote_mounts_timeout = 2
/// ignore_mount_points         = ["/mnt/scratch"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountsConfig {
    /// Include network filesystems (NFS, CIFS, ...) in the disk listing.
    pub check_remote_mounts: bool,
    /// Seconds handed to the `timeout` wrapper around `df`. Passed through literally, 0 included.
    pub check_remote_mounts_timeout: u64,
    /// Mountpoints (and everything beneath them) never reported.
    pub ignore_mount_points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverridesConfig {
    /// Directory holding `*.json` override documents. None = overrides disabled.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Seconds allowed for the interface listing commands.
    pub interface_dump_timeout: u64,
}

// ── Defaults ─────────────────────────────────────────────────────────

pub const DEFAULT_MOUNT_TIMEOUT_SECS: u64 = 10;

impl Default for MountsConfig {
    fn default() -> Self {
        Self {
            check_remote_mounts:         false,
            check_remote_mounts_timeout: DEFAULT_MOUNT_TIMEOUT_SECS,
            ignore_mount_points:         Vec::new(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { interface_dump_timeout: 5 }
    }
}

// ── Load ─────────────────────────────────────────────────────────────

impl Config {
    /// Load from `path`, or from the first default location that exists.
    /// A missing file yields defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None    => match Self::default_path() {
                Some(p) => p,
                None    => return Ok(Config::default()),
            },
        };
        match fs::read_to_string(&path) {
            Ok(text) => Self::from_toml(&text).map_err(|source| ConfigError::Parse { path, source }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Per-user config if present, otherwise the system-wide one.
    pub fn default_path() -> Option<PathBuf> {
        let user = dirs::config_dir().map(|p| p.join("hostfacts").join("hostfacts.toml"));
        match user {
            Some(p) if p.exists() => Some(p),
            _ => {
                let system = PathBuf::from(SYSTEM_CONFIG);
                system.exists().then_some(system)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(!cfg.mounts.check_remote_mounts);
        assert_eq!(cfg.mounts.check_remote_mounts_timeout, 10);
        assert!(cfg.overrides.dir.is_none());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = Config::from_toml(
            "[mounts]\ncheck_remote_mounts_timeout = 0\n\n[overrides]\ndir = \"/etc/custom_resource_overrides\"\n",
        )
        .unwrap();
        assert_eq!(cfg.mounts.check_remote_mounts_timeout, 0);
        assert!(!cfg.mounts.check_remote_mounts);
        assert_eq!(cfg.overrides.dir, Some(PathBuf::from("/etc/custom_resource_overrides")));
        assert_eq!(cfg.network.interface_dump_timeout, 5);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn malformed_file_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[mounts]\ncheck_remote_mounts = \"maybe\"").unwrap();
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
