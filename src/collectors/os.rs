use crate::models::facts::FactSet;
use crate::system::{KernelInfo, OsInfo, OsProbe};
use std::collections::HashSet;

/// Parse `/etc/os-release` into OS type, version and family.
pub fn parse_os_release(content: &str) -> OsInfo {
    let mut id = String::new();
    let mut id_like = String::new();
    let mut version = String::new();

    for line in content.lines() {
        let (key, value) = match line.split_once('=') {
            Some(kv) => kv,
            None     => continue,
        };
        let value = value.trim().trim_matches('"').trim_matches('\'').to_string();
        match key.trim() {
            "ID"         => id = value.to_lowercase(),
            "ID_LIKE"    => id_like = value.to_lowercase(),
            "VERSION_ID" => version = value,
            _            => {}
        }
    }

    let family = os_family(&id, &id_like);
    OsInfo { os_type: id, version, family }
}

/// Normalized family. Checks `ID` first, then each `ID_LIKE` entry.
fn os_family(id: &str, id_like: &str) -> String {
    std::iter::once(id)
        .chain(id_like.split_whitespace())
        .find_map(family_of)
        .map(String::from)
        .unwrap_or_else(|| id.to_string())
}

fn family_of(id: &str) -> Option<&'static str> {
    match id {
        "rhel" | "centos" | "fedora" | "redhat" | "oraclelinux" | "ol" | "amzn" | "rocky" | "almalinux" => Some("redhat"),
        "sles" | "suse" | "sled" => Some("suse"),
        s if s.starts_with("opensuse") => Some("suse"),
        "ubuntu" => Some("ubuntu"),
        "debian" => Some("debian"),
        _        => None,
    }
}

/// operatingsystem is the raw OS type; osfamily is reported separately and never substituted.
pub fn os_facts(os: &OsInfo, facts: &mut FactSet) {
    facts.insert("operatingsystem", os.os_type.clone());
    facts.insert("operatingsystemrelease", os.version.clone());
    facts.insert(
        "operatingsystemmajrelease",
        os.version.split('.').next().unwrap_or("").to_string(),
    );
    facts.insert("osfamily", os.family.clone());
}

pub fn kernel_facts(kernel: &KernelInfo, facts: &mut FactSet) {
    let version = kernel.release.split('-').next().unwrap_or("");
    let majversion = version.split('.').take(2).collect::<Vec<_>>().join(".");

    facts.insert("kernel", kernel.name.clone());
    facts.insert("kernelrelease", kernel.release.clone());
    facts.insert("kernelversion", version.to_string());
    facts.insert("kernelmajversion", majversion);
    facts.insert("architecture", kernel.machine.clone());
    facts.insert("hardwareisa", kernel.machine.clone());
    facts.insert("hardwaremodel", kernel.machine.clone());
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuInfo {
    pub processors: usize,
    pub physical:   usize,
    pub hypervisor: bool,
}

pub fn parse_cpuinfo(content: &str) -> CpuInfo {
    let mut info = CpuInfo::default();
    let mut sockets: HashSet<&str> = HashSet::new();

    for line in content.lines() {
        let (key, value) = match line.split_once(':') {
            Some((k, v)) => (k.trim(), v.trim()),
            None         => continue,
        };
        match key {
            "processor"   => info.processors += 1,
            "physical id" => { sockets.insert(value); }
            "flags"       => {
                if value.split_whitespace().any(|f| f == "hypervisor") { info.hypervisor = true; }
            }
            _ => {}
        }
    }

    info.physical = if sockets.is_empty() { info.processors.min(1) } else { sockets.len() };
    info
}

/// Identity, kernel, CPU and security facts.
pub fn host_facts<H: OsProbe + ?Sized>(host: &H, facts: &mut FactSet) {
    if let Some(user) = host.user_name() {
        facts.insert("id", user);
    }
    if let Some(kernel) = host.kernel() {
        kernel_facts(&kernel, facts);
    }
    os_facts(&host.os_info(), facts);

    if let Some(text) = host.read_text("/proc/cpuinfo") {
        let cpu = parse_cpuinfo(&text);
        facts.insert("processorcount", cpu.processors.to_string());
        facts.insert("physicalprocessorcount", cpu.physical.to_string());
        facts.insert("is_virtual", cpu.hypervisor.to_string());
    }
    facts.insert("selinux", host.path_exists("/sys/fs/selinux/enforce").to_string());
}
