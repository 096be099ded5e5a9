use crate::config::MountsConfig;
use crate::models::mount::MountRecord;
use crate::system::{CommandRunner, MountProbe};
use std::path::Path;
use tracing::{debug, info, warn};

/// Pseudo devices that never hold durable storage.
pub const IGNORE_DEVICES: &[&str] = &["proc", "tmpfs", "cgroup", "mqueue", "shm"];

/// First path segments of mounts never reported.
pub const IGNORE_ROOT_MOUNTS: &[&str] = &["proc", "dev", "sys", "boot", "home"];

/// One `df -kPT` line split into its seven columns, unconverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DfLine<'a> {
    pub device:     &'a str,
    pub fs_type:    &'a str,
    pub size:       &'a str,
    pub used:       &'a str,
    pub available:  &'a str,
    pub percent:    &'a str,
    pub mountpoint: &'a str,
}

/// Split a line into exactly seven whitespace-separated columns.
/// Anything else (blank, truncated, mountpoints with spaces) yields None.
pub fn parse_df_line(line: &str) -> Option<DfLine<'_>> {
    let mut it = line.split_whitespace();
    let rec = DfLine {
        device:     it.next()?,
        fs_type:    it.next()?,
        size:       it.next()?,
        used:       it.next()?,
        available:  it.next()?,
        percent:    it.next()?,
        mountpoint: it.next()?,
    };
    if it.next().is_some() { return None; }
    Some(rec)
}

impl MountRecord {
    /// Convert a split line, turning 1024-byte block counts into bytes.
    /// The header row fails numeric coercion and is dropped here.
    pub fn from_df_line(line: DfLine<'_>) -> Option<MountRecord> {
        let blocks = |s: &str| s.parse::<u64>().ok().and_then(|b| b.checked_mul(1024));
        Some(MountRecord {
            device:     line.device.to_string(),
            fs_type:    line.fs_type.to_string(),
            size:       blocks(line.size)?,
            used:       blocks(line.used)?,
            available:  blocks(line.available)?,
            percent:    line.percent.to_string(),
            mountpoint: line.mountpoint.to_string(),
        })
    }
}

/// Command line for the disk-usage query under the configured policy.
pub fn df_command(cfg: &MountsConfig) -> Vec<String> {
    let mut argv: Vec<String> = vec![
        "timeout".into(),
        cfg.check_remote_mounts_timeout.to_string(),
        "df".into(),
        "-kPT".into(),
    ];
    if !cfg.check_remote_mounts {
        argv.push("-l".into());
    }
    argv
}

/// Enumerate mounted, writable, real filesystems.
///
/// Command failures and timeouts produce an empty list; rejected mounts are
/// summarised in one log line instead of being reported as errors.
pub fn osdisks<H>(host: &H, cfg: &MountsConfig) -> Vec<MountRecord>
where
    H: CommandRunner + MountProbe + ?Sized,
{
    let argv = df_command(cfg);
    debug!(command = %argv.join(" "), "checking disk usage");

    let output = match host.run(&argv) {
        Ok(out) => out,
        Err(e)  => {
            warn!("checking disk usage failed: {:#}", e);
            String::new()
        }
    };

    let mut accepted: Vec<MountRecord> = Vec::new();
    let mut ignored:  Vec<String>      = Vec::new();

    for record in output.lines().filter_map(parse_df_line).filter_map(MountRecord::from_df_line) {
        if is_accepted(host, cfg, &record) {
            accepted.push(record);
        } else {
            ignored.push(record.mountpoint);
        }
    }

    let (mounts, collapsed) = collapse_bind_mounts(accepted);
    ignored.extend(collapsed);

    if !ignored.is_empty() {
        info!("some mount points were ignored: {}", ignored.join(", "));
    }
    mounts
}

fn is_accepted<H>(host: &H, cfg: &MountsConfig, rec: &MountRecord) -> bool
where
    H: MountProbe + ?Sized,
{
    if IGNORE_DEVICES.contains(&rec.device.as_str()) { return false; }

    let root = rec.mountpoint.trim_start_matches('/').split('/').next().unwrap_or("");
    if IGNORE_ROOT_MOUNTS.contains(&root) { return false; }

    if is_blacklisted(&cfg.ignore_mount_points, &rec.mountpoint) { return false; }
    if rec.size == 0 { return false; }

    let path = Path::new(&rec.mountpoint);
    // Container bind-mounts of single files (/etc/hosts and friends) are not capacity pools.
    host.exists(path) && !host.is_file(path) && host.is_writable(path)
}

/// True when `mountpoint` equals a blacklisted path or lies beneath one.
fn is_blacklisted(blacklist: &[String], mountpoint: &str) -> bool {
    blacklist.iter().any(|entry| {
        let entry = entry.trim();
        if entry.is_empty() { return false; }
        let entry = if entry.len() > 1 { entry.trim_end_matches('/') } else { entry };
        match mountpoint.strip_prefix(entry) {
            Some(rest) => rest.is_empty() || rest.starts_with('/') || entry == "/",
            None       => false,
        }
    })
}

/// Drop repeated mountpoints and collapse bind-mounts of one device into the
/// record with the shortest mountpoint. Returns (kept, dropped mountpoints).
fn collapse_bind_mounts(records: Vec<MountRecord>) -> (Vec<MountRecord>, Vec<String>) {
    let mut kept:    Vec<MountRecord> = Vec::with_capacity(records.len());
    let mut dropped: Vec<String>      = Vec::new();

    for rec in records {
        let existing = kept
            .iter()
            .position(|k| k.mountpoint == rec.mountpoint || k.same_pool(&rec));
        match existing {
            Some(i) if rec.mountpoint.len() < kept[i].mountpoint.len() => {
                let old = std::mem::replace(&mut kept[i], rec);
                dropped.push(old.mountpoint);
            }
            Some(_) => dropped.push(rec.mountpoint),
            None    => kept.push(rec),
        }
    }
    (kept, dropped)
}
