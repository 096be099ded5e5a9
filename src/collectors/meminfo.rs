use crate::models::facts::FactSet;
use crate::util::human::fmt_kb;

/// The `/proc/meminfo` fields reported as facts, in kB.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemInfo {
    pub mem_total:  Option<u64>,
    pub mem_free:   Option<u64>,
    pub swap_total: Option<u64>,
    pub swap_free:  Option<u64>,
}

/// Parse `Key:   value kB` lines. Unknown keys and malformed values are skipped.
pub fn parse_meminfo(content: &str) -> MemInfo {
    let mut info = MemInfo::default();
    for line in content.lines() {
        let (key, rest) = match line.split_once(':') {
            Some(kv) => kv,
            None     => continue,
        };
        let value = match rest.split_whitespace().next().and_then(|v| v.parse::<u64>().ok()) {
            Some(v) => v,
            None    => continue,
        };
        match key.trim() {
            "MemTotal"  => info.mem_total  = Some(value),
            "MemFree"   => info.mem_free   = Some(value),
            "SwapTotal" => info.swap_total = Some(value),
            "SwapFree"  => info.swap_free  = Some(value),
            _           => {}
        }
    }
    info
}

/// memorysize/memorytotal/memoryfree as kB integers, swap as human-readable sizes.
pub fn memory_facts(info: &MemInfo, facts: &mut FactSet) {
    if let Some(total) = info.mem_total {
        facts.insert("memorysize", total);
        facts.insert("memorytotal", total);
    }
    if let Some(free) = info.mem_free {
        facts.insert("memoryfree", free);
    }
    if let Some(total) = info.swap_total {
        facts.insert("swaptotal", total);
        facts.insert("swapsize", fmt_kb(total));
    }
    if let Some(free) = info.swap_free {
        facts.insert("swapfree", fmt_kb(free));
    }
}

/// Whole seconds of uptime from `/proc/uptime` ("<secs>.<hh> <idle>.<hh>").
/// The fractional part is truncated, never rounded.
pub fn parse_uptime(content: &str) -> Option<u64> {
    let first = content.split_whitespace().next()?;
    let whole = first.split('.').next()?;
    whole.parse().ok()
}

pub fn uptime_facts(seconds: u64, facts: &mut FactSet) {
    facts.insert("uptime_seconds", seconds.to_string());
    facts.insert("uptime_hours", (seconds / 3600).to_string());
    facts.insert("uptime_days", (seconds / 86400).to_string());
}
