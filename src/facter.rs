use crate::collectors::{df, meminfo, network, os, overrides};
use crate::config::Config;
use crate::models::facts::FactSet;
use crate::models::mount::MountRecord;
use crate::system::Host;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Builds a fresh [`FactSet`] for a host on every call. Nothing is cached.
pub struct Facter<H: Host> {
    host:   H,
    config: Config,
}

impl<H: Host> Facter<H> {
    pub fn new(host: H, config: Config) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mounted filesystems under the configured mount policy.
    pub fn osdisks(&self) -> Vec<MountRecord> {
        df::osdisks(&self.host, &self.config.mounts)
    }

    /// Administrator overrides from the configured directory.
    pub fn get_system_resource_overrides(&self) -> Map<String, Value> {
        overrides::get_system_resource_overrides(&self.config.overrides)
    }

    /// Collect every fact. Overrides are merged last and win over computed values.
    pub fn facter_info(&self) -> FactSet {
        let mut facts = FactSet::new();

        os::host_facts(&self.host, &mut facts);

        let net = network::resolve(&self.host, &self.config.network);
        net.write_to(&mut facts);

        if let Some(secs) = self.host.read_text("/proc/uptime").as_deref().and_then(meminfo::parse_uptime) {
            meminfo::uptime_facts(secs, &mut facts);
        }
        if let Some(text) = self.host.read_text("/proc/meminfo") {
            meminfo::memory_facts(&meminfo::parse_meminfo(&text), &mut facts);
        }

        let mounts: Vec<Value> = self.osdisks().iter().map(mount_value).collect();
        facts.insert("mounts", Value::Array(mounts));

        let overrides = self.get_system_resource_overrides();
        if !overrides.is_empty() {
            debug!(count = overrides.len(), "applying resource overrides");
        }
        facts.merge(overrides);
        facts
    }
}

/// One entry of the `mounts` fact. Built field by field so no record can be lost.
fn mount_value(m: &MountRecord) -> Value {
    json!({
        "device":     m.device,
        "type":       m.fs_type,
        "size":       m.size,
        "used":       m.used,
        "available":  m.available,
        "percent":    m.percent,
        "mountpoint": m.mountpoint,
    })
}
