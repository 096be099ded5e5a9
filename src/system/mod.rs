//! Seams between fact collection and the machine it runs on.
//!
//! Collectors never touch processes, sockets, or `/proc` directly; they go
//! through these traits so the parsing and policy logic can be exercised
//! with an in-memory host in tests.

mod local;
#[cfg(test)]
pub mod mock;

pub use local::LocalHost;

use anyhow::Result;
use std::path::Path;

/// Runs an external command and returns its captured stdout.
///
/// Time bounds are expressed in `argv` itself (a leading `timeout <secs>`),
/// the runner only reports failure to launch or a timed-out child.
pub trait CommandRunner {
    fn run(&self, argv: &[String]) -> Result<String>;
}

/// Checks applied to a candidate mountpoint.
pub trait MountProbe {
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    /// Create and remove a marker file under `path`.
    fn is_writable(&self, path: &Path) -> bool;
}

/// Name resolution and per-interface address queries.
/// Every query returns None (or an empty string) when nothing is known.
pub trait NetProbe {
    fn hostname(&self) -> Option<String>;
    fn fqdn(&self) -> Option<String>;
    fn resolve_ipv4(&self, host: &str) -> Option<String>;
    fn ipv4_address(&self, ifname: &str) -> Option<String>;
    fn netmask(&self, ifname: &str) -> Option<String>;
    fn mac_address(&self, ifname: &str) -> Option<String>;
    /// Interface names straight from the kernel, used when no dump command works.
    fn interface_names(&self) -> Vec<String>;
}

/// Kernel identity as reported by `uname`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KernelInfo {
    pub name:    String,
    pub release: String,
    pub machine: String,
}

/// OS identity: distribution type, version and normalized family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OsInfo {
    pub os_type: String,
    pub version: String,
    pub family:  String,
}

/// OS identification and text sources under `/proc` and `/sys`.
pub trait OsProbe {
    fn os_info(&self) -> OsInfo;
    fn kernel(&self) -> Option<KernelInfo>;
    fn read_text(&self, path: &str) -> Option<String>;
    fn path_exists(&self, path: &str) -> bool;
    fn user_name(&self) -> Option<String>;
}

/// Everything the fact aggregator needs from the host.
pub trait Host: CommandRunner + MountProbe + NetProbe + OsProbe {}

impl<T: CommandRunner + MountProbe + NetProbe + OsProbe> Host for T {}
