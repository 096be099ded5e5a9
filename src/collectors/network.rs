use crate::config::NetworkConfig;
use crate::models::facts::FactSet;
use crate::system::{CommandRunner, NetProbe};
use tracing::debug;

/// Header tokens of interface dumps, never interface names.
const DUMP_HEADERS: &[&str] = &["Iface", "Kernel", "Name"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkFacts {
    pub hostname:   String,
    pub domain:     String,
    pub fqdn:       String,
    pub ipaddress:  Option<String>,
    pub netmask:    Option<String>,
    pub macaddress: Option<String>,
    pub interfaces: Vec<String>,
}

impl NetworkFacts {
    pub fn write_to(&self, facts: &mut FactSet) {
        facts.insert("hostname", self.hostname.clone());
        facts.insert("domain", self.domain.clone());
        facts.insert("fqdn", self.fqdn.clone());
        facts.insert_opt("ipaddress", self.ipaddress.clone());
        facts.insert_opt("netmask", self.netmask.clone());
        facts.insert_opt("macaddress", self.macaddress.clone());
        facts.insert("interfaces", self.interfaces.join(","));
    }
}

/// Interface names from an `ifconfig -s` / `netstat -i` / `ifconfig` dump:
/// the first token of every line starting at column 0, in dump order.
pub fn parse_interfaces(dump: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in dump.lines() {
        if line.starts_with(char::is_whitespace) { continue; }
        let name = match line.split_whitespace().next() {
            Some(n) => n.trim_end_matches(':'),
            None    => continue,
        };
        if name.is_empty() || DUMP_HEADERS.contains(&name) { continue; }
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// (hostname, domain, fqdn). The hostname is the FQDN's first label and the
/// domain the rest, so `hostname.domain` always equals the resolved FQDN.
/// The system hostname is used only when no FQDN was resolved.
pub fn split_fqdn(hostname: Option<&str>, fqdn: Option<&str>) -> (String, String, String) {
    let fqdn = fqdn
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .or_else(|| hostname.map(|h| h.trim().to_lowercase()).filter(|h| !h.is_empty()))
        .unwrap_or_else(|| "localhost".to_string());

    let (short, domain) = match fqdn.split_once('.') {
        Some((h, d)) => (h.to_string(), d.to_string()),
        None         => (fqdn.clone(), String::new()),
    };
    let full = if domain.is_empty() { short.clone() } else { format!("{}.{}", short, domain) };
    (short, domain, full)
}

fn interface_dump<H>(host: &H, cfg: &NetworkConfig) -> Vec<String>
where
    H: CommandRunner + NetProbe + ?Sized,
{
    let timeout = cfg.interface_dump_timeout.to_string();
    for cmd in [["ifconfig", "-s"], ["netstat", "-i"]] {
        let argv: Vec<String> = ["timeout", timeout.as_str(), cmd[0], cmd[1]]
            .iter()
            .map(|s| s.to_string())
            .collect();
        match host.run(&argv) {
            Ok(out) => {
                let names = parse_interfaces(&out);
                if !names.is_empty() { return names; }
            }
            Err(e) => debug!("{} unavailable: {:#}", cmd[0], e),
        }
    }
    host.interface_names()
}

fn is_loopback(ip: &str) -> bool {
    ip.starts_with("127.")
}

/// Resolve host naming, the primary address and the netmask of the
/// interface carrying it.
pub fn resolve<H>(host: &H, cfg: &NetworkConfig) -> NetworkFacts
where
    H: CommandRunner + NetProbe + ?Sized,
{
    let (hostname, domain, fqdn) = split_fqdn(host.hostname().as_deref(), host.fqdn().as_deref());
    let interfaces = interface_dump(host, cfg);

    let ipaddress = host
        .resolve_ipv4(&fqdn)
        .filter(|ip| !ip.trim().is_empty())
        .or_else(|| {
            interfaces
                .iter()
                .filter_map(|i| host.ipv4_address(i))
                .find(|ip| !ip.trim().is_empty() && !is_loopback(ip))
        });

    let mut netmask = None;
    let mut macaddress = None;
    if let Some(ip) = &ipaddress {
        let primary = interfaces.iter().find(|i| {
            host.ipv4_address(i).map(|a| a.trim() == ip.trim()).unwrap_or(false)
        });
        if let Some(ifname) = primary {
            netmask = host.netmask(ifname).filter(|m| !m.trim().is_empty());
            macaddress = host.mac_address(ifname).filter(|m| !m.is_empty());
        }
    }

    NetworkFacts { hostname, domain, fqdn, ipaddress, netmask, macaddress, interfaces }
}
