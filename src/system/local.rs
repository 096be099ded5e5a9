use super::{CommandRunner, KernelInfo, MountProbe, NetProbe, OsInfo, OsProbe};
use crate::collectors::os::parse_os_release;
use anyhow::{bail, Context, Result};
use nix::ifaddrs::{getifaddrs, InterfaceAddress};
use std::fs;
use std::net::{SocketAddrV4, ToSocketAddrs};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Exit status of coreutils `timeout` when the child was killed.
const TIMEOUT_EXIT: i32 = 124;

/// Seconds allowed for the `hostname -f` lookup unless configured otherwise.
const DEFAULT_LOOKUP_TIMEOUT: u64 = 5;

/// The machine this process runs on.
#[derive(Debug, Clone, Copy)]
pub struct LocalHost {
    lookup_timeout: u64,
}

impl Default for LocalHost {
    fn default() -> Self {
        Self { lookup_timeout: DEFAULT_LOOKUP_TIMEOUT }
    }
}

impl LocalHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound name lookups to `secs` seconds.
    pub fn with_lookup_timeout(secs: u64) -> Self {
        Self { lookup_timeout: secs }
    }

    /// `hostname -f` wrapped in the lookup time bound.
    pub fn fqdn_command(&self) -> Vec<String> {
        let secs = self.lookup_timeout.to_string();
        ["timeout", secs.as_str(), "hostname", "-f"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn find_ifaddr<F>(&self, ifname: &str, f: F) -> Option<String>
    where
        F: Fn(&InterfaceAddress) -> Option<String>,
    {
        let addrs = getifaddrs().ok()?;
        addrs.filter(|a| a.interface_name == ifname).find_map(|a| f(&a))
    }
}

impl CommandRunner for LocalHost {
    fn run(&self, argv: &[String]) -> Result<String> {
        let (program, args) = match argv.split_first() {
            Some(split) => split,
            None        => bail!("empty command line"),
        };
        let out = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .with_context(|| format!("{} not found", program))?;

        // df exits non-zero when a single mount is unreadable but still
        // prints the rest, so only a timeout discards the output.
        if out.status.code() == Some(TIMEOUT_EXIT) && program == "timeout" {
            bail!("`{}` timed out", argv.join(" "));
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

impl MountProbe for LocalHost {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_writable(&self, path: &Path) -> bool {
        match tempfile::Builder::new().prefix(".hostfacts-probe-").tempfile_in(path) {
            Ok(marker) => marker.close().is_ok(),
            Err(e) => {
                debug!(path = %path.display(), "mount not writable: {}", e);
                false
            }
        }
    }
}

impl NetProbe for LocalHost {
    fn hostname(&self) -> Option<String> {
        nix::unistd::gethostname()
            .ok()
            .and_then(|h| h.into_string().ok())
            .filter(|h| !h.is_empty())
    }

    fn fqdn(&self) -> Option<String> {
        self.run(&self.fqdn_command())
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| self.hostname())
    }

    fn resolve_ipv4(&self, host: &str) -> Option<String> {
        let addrs = (host, 0).to_socket_addrs().ok()?;
        addrs
            .into_iter()
            .find(|a| a.is_ipv4())
            .map(|a| a.ip().to_string())
    }

    fn ipv4_address(&self, ifname: &str) -> Option<String> {
        self.find_ifaddr(ifname, |a| {
            let sin = a.address.as_ref()?.as_sockaddr_in()?;
            Some(SocketAddrV4::from(*sin).ip().to_string())
        })
    }

    fn netmask(&self, ifname: &str) -> Option<String> {
        self.find_ifaddr(ifname, |a| {
            a.address.as_ref()?.as_sockaddr_in()?;
            let sin = a.netmask.as_ref()?.as_sockaddr_in()?;
            Some(SocketAddrV4::from(*sin).ip().to_string())
        })
    }

    fn mac_address(&self, ifname: &str) -> Option<String> {
        self.find_ifaddr(ifname, |a| {
            let mac = a.address.as_ref()?.as_link_addr()?.addr()?;
            Some(mac.iter().map(|b| format!("{:02x}", b)).collect::<Vec<_>>().join(":"))
        })
    }

    fn interface_names(&self) -> Vec<String> {
        let addrs = match getifaddrs() {
            Ok(a)  => a,
            Err(_) => return Vec::new(),
        };
        let mut names: Vec<String> = Vec::new();
        for a in addrs {
            if !names.contains(&a.interface_name) {
                names.push(a.interface_name);
            }
        }
        names
    }
}

impl OsProbe for LocalHost {
    fn os_info(&self) -> OsInfo {
        fs::read_to_string("/etc/os-release")
            .or_else(|_| fs::read_to_string("/usr/lib/os-release"))
            .map(|text| parse_os_release(&text))
            .unwrap_or_default()
    }

    fn kernel(&self) -> Option<KernelInfo> {
        let uts = nix::sys::utsname::uname().ok()?;
        Some(KernelInfo {
            name:    uts.sysname().to_string_lossy().into_owned(),
            release: uts.release().to_string_lossy().into_owned(),
            machine: uts.machine().to_string_lossy().into_owned(),
        })
    }

    fn read_text(&self, path: &str) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn path_exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn user_name(&self) -> Option<String> {
        let uid = nix::unistd::geteuid();
        nix::unistd::User::from_uid(uid).ok().flatten().map(|u| u.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writable_probe_leaves_no_marker() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LocalHost::new().is_writable(dir.path()));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_directory_is_not_writable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!LocalHost::new().is_writable(&dir.path().join("gone")));
    }

    #[test]
    fn empty_command_is_an_error() {
        assert!(LocalHost::new().run(&[]).is_err());
    }

    #[test]
    fn fqdn_lookup_is_time_bounded() {
        assert_eq!(LocalHost::new().fqdn_command().join(" "), "timeout 5 hostname -f");
        assert_eq!(LocalHost::with_lookup_timeout(2).fqdn_command().join(" "), "timeout 2 hostname -f");
    }
}
