//! In-memory host for testing collectors without a real machine.

use super::{CommandRunner, KernelInfo, MountProbe, NetProbe, OsInfo, OsProbe};
use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Interface address data served by [`MockHost`].
#[derive(Debug, Clone, Default)]
pub struct MockIface {
    pub ipv4:    Option<String>,
    pub netmask: Option<String>,
    pub mac:     Option<String>,
}

/// Scriptable host. Every mountpoint exists and is writable unless told otherwise.
#[derive(Debug, Default)]
pub struct MockHost {
    /// Program name (after any `timeout <secs>` prefix) to stdout.
    outputs:   HashMap<String, String>,
    /// Every command line passed to `run`, in order.
    calls:     RefCell<Vec<Vec<String>>>,
    missing:   HashSet<PathBuf>,
    files:     HashSet<PathBuf>,
    read_only: HashSet<PathBuf>,

    pub hostname: Option<String>,
    pub fqdn:     Option<String>,
    pub dns:      HashMap<String, String>,
    pub ifaces:   HashMap<String, MockIface>,
    pub os:       OsInfo,
    pub kernel:   Option<KernelInfo>,
    pub texts:    HashMap<String, String>,
    pub user:     Option<String>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A SUSE 11 box named `ambari.apache.org` with four interfaces and typical `/proc` files.
    pub fn typical() -> Self {
        let mut host = Self::new();
        host.hostname = Some("ambari".into());
        host.fqdn = Some("ambari.apache.org".into());
        host.dns.insert("ambari.apache.org".into(), "192.168.1.1".into());
        host.os = OsInfo { os_type: "suse".into(), version: "11".into(), family: "suse".into() };
        host.kernel = Some(KernelInfo {
            name:    "Linux".into(),
            release: "3.0.101-63-default".into(),
            machine: "x86_64".into(),
        });
        host.user = Some("root".into());
        host.set_output("netstat", NETSTAT_I);
        host.set_output("df", "");
        host.add_text("/proc/meminfo", MEMINFO);
        host.add_text("/proc/uptime", "262813.00 123.45\n");
        host.add_text("/proc/cpuinfo", CPUINFO);
        host
    }

    pub fn set_output(&mut self, program: &str, stdout: &str) {
        self.outputs.insert(program.to_string(), stdout.to_string());
    }

    pub fn add_text(&mut self, path: &str, content: &str) {
        self.texts.insert(path.to_string(), content.to_string());
    }

    pub fn add_iface(&mut self, name: &str, ipv4: Option<&str>, netmask: Option<&str>) {
        self.ifaces.insert(name.to_string(), MockIface {
            ipv4:    ipv4.map(String::from),
            netmask: netmask.map(String::from),
            mac:     None,
        });
    }

    pub fn mark_missing(&mut self, path: &str) {
        self.missing.insert(PathBuf::from(path));
    }

    pub fn mark_file(&mut self, path: &str) {
        self.files.insert(PathBuf::from(path));
    }

    pub fn mark_read_only(&mut self, path: &str) {
        self.read_only.insert(PathBuf::from(path));
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// The last command line run, joined with spaces.
    pub fn last_call(&self) -> Option<String> {
        self.calls.borrow().last().map(|c| c.join(" "))
    }
}

impl CommandRunner for MockHost {
    fn run(&self, argv: &[String]) -> Result<String> {
        self.calls.borrow_mut().push(argv.to_vec());
        let program = match argv.first().map(String::as_str) {
            Some("timeout") => argv.get(2),
            _               => argv.first(),
        };
        program
            .and_then(|p| self.outputs.get(p))
            .cloned()
            .ok_or_else(|| anyhow!("{:?}: command not found", argv))
    }
}

impl MountProbe for MockHost {
    fn exists(&self, path: &Path) -> bool {
        !self.missing.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_writable(&self, path: &Path) -> bool {
        self.exists(path) && !self.read_only.contains(path)
    }
}

impl NetProbe for MockHost {
    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }

    fn fqdn(&self) -> Option<String> {
        self.fqdn.clone()
    }

    fn resolve_ipv4(&self, host: &str) -> Option<String> {
        self.dns.get(host).cloned()
    }

    fn ipv4_address(&self, ifname: &str) -> Option<String> {
        self.ifaces.get(ifname).and_then(|i| i.ipv4.clone())
    }

    fn netmask(&self, ifname: &str) -> Option<String> {
        self.ifaces.get(ifname).and_then(|i| i.netmask.clone())
    }

    fn mac_address(&self, ifname: &str) -> Option<String> {
        self.ifaces.get(ifname).and_then(|i| i.mac.clone())
    }

    fn interface_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.ifaces.keys().cloned().collect();
        names.sort();
        names
    }
}

impl OsProbe for MockHost {
    fn os_info(&self) -> OsInfo {
        self.os.clone()
    }

    fn kernel(&self) -> Option<KernelInfo> {
        self.kernel.clone()
    }

    fn read_text(&self, path: &str) -> Option<String> {
        self.texts.get(path).cloned()
    }

    fn path_exists(&self, path: &str) -> bool {
        self.texts.contains_key(path)
    }

    fn user_name(&self) -> Option<String> {
        self.user.clone()
    }
}

pub const NETSTAT_I: &str = "\
Iface   MTU Met    RX-OK RX-ERR RX-DRP RX-OVR    TX-OK TX-ERR TX-DRP TX-OVR Flg
eth0   1500   0     9986      0      0      0     5490      0      0      0 BMRU
eth1   1500   0        0      0      0      0        6      0      0      0 BMRU
eth2   1500   0        0      0      0      0        6      0      0      0 BMRU
lo    16436   0        2      0      0      0        2      0      0      0 LRU
";

pub const MEMINFO: &str = "
MemTotal:        1832392 kB
MemFree:          868648 kB
HighTotal:             0 kB
HighFree:              0 kB
LowTotal:        1832392 kB
LowFree:          868648 kB
SwapTotal:       2139592 kB
SwapFree:        1598676 kB
";

pub const CPUINFO: &str = "\
processor\t: 0
physical id\t: 0
flags\t\t: fpu vme de pse tsc msr hypervisor

processor\t: 1
physical id\t: 0
flags\t\t: fpu vme de pse tsc msr hypervisor
";

/// `df -kPT` as seen inside a docker container.
pub const DOCKER_DF: &str = "\
Filesystem                                                                                        Type  1024-blocks     Used Available Capacity Mounted on
/dev/mapper/docker-253:0-4980899-d45c264d37ab18c8ed14f890f4d59ac2b81e1c52919eb36a79419787209515f3 xfs      31447040  1282384  30164656       5% /
tmpfs                                                                                             tmpfs    32938336        4  32938332       1% /dev
tmpfs                                                                                             tmpfs    32938336        0  32938336       0% /sys/fs/cgroup
/dev/mapper/fedora-root                                                                           ext4    224161316 12849696 199901804       7% /etc/resolv.conf
/dev/mapper/fedora-root                                                                           ext4    224161316 12849696 199901804       7% /etc/hostname
/dev/mapper/fedora-root                                                                           ext4    224161316 12849696 199901804       7% /etc/hosts
shm                                                                                               tmpfs       65536        0     65536       0% /dev/shm
/dev/mapper/fedora-root                                                                           ext4    224161316 12849696 199901804       7% /run/secrets
";
