use serde::{Deserialize, Serialize};

/// One mounted filesystem as reported by `df -kPT`, sizes in bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountRecord {
    pub device:     String,
    #[serde(rename = "type")]
    pub fs_type:    String,
    pub size:       u64,
    pub used:       u64,
    pub available:  u64,
    pub percent:    String,
    pub mountpoint: String,
}

impl MountRecord {
    /// True when both records describe the same capacity pool
    /// (one device reported identically under several mountpoints).
    pub fn same_pool(&self, other: &MountRecord) -> bool {
        self.device    == other.device
            && self.size      == other.size
            && self.used      == other.used
            && self.available == other.available
    }
}
