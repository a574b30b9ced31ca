//! Host snapshots — the per-pass view of a host's free resources.
//!
//! Snapshots are produced by the inventory layer for each scheduling pass
//! and discarded afterwards. Nothing in this crate mutates them.

use serde::{Deserialize, Serialize};

/// Unique identifier for a candidate host.
pub type HostId = String;

/// Free capacity of a single host at the time of the scheduling pass.
///
/// Free values are signed: an over-committed host can report negative
/// free capacity, and cost functions must still rank it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub host: HostId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    pub free_ram_mb: i64,
    pub free_vcpus: i64,
    pub free_disk_gb: i64,
}

impl HostSnapshot {
    pub fn new(host: impl Into<HostId>, free_ram_mb: i64, free_vcpus: i64, free_disk_gb: i64) -> Self {
        Self {
            host: host.into(),
            zone: None,
            free_ram_mb,
            free_vcpus,
            free_disk_gb,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    /// Pair the snapshot with its own host id, the shape the ranking
    /// functions take.
    pub fn into_entry(self) -> (HostId, HostSnapshot) {
        (self.host.clone(), self)
    }
}
