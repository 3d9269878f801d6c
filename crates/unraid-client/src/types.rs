//! Response types for the Unraid management API.
//!
//! Field names mirror the GraphQL schema's camelCase wire names. Everything
//! derives `Serialize` as well so callers can feed values straight into
//! structured output modes.

use serde::{Deserialize, Serialize};

use crate::resolve::Addressable;

// ============================================================================
// System
// ============================================================================

/// Static system information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemInfo {
    /// CPU hardware description.
    #[serde(default)]
    pub cpu: CpuInfo,
    /// Installed memory layout.
    #[serde(default)]
    pub memory: MemoryLayout,
    /// Operating system details.
    #[serde(default)]
    pub os: OsInfo,
    /// Software version information.
    #[serde(default)]
    pub versions: Versions,
}

impl SystemInfo {
    /// Total installed memory in bytes, summed over all modules.
    #[must_use]
    pub fn total_memory(&self) -> i64 {
        self.memory.layout.iter().map(|m| m.size).sum()
    }
}

/// CPU hardware description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Manufacturer, e.g. `"AMD"`.
    #[serde(default)]
    pub manufacturer: String,
    /// Marketing name, may be empty on some platforms.
    #[serde(default)]
    pub brand: String,
    /// Physical core count.
    #[serde(default)]
    pub cores: u32,
    /// Logical thread count.
    #[serde(default)]
    pub threads: u32,
    /// Base clock in GHz.
    #[serde(default)]
    pub speed: f64,
}

impl CpuInfo {
    /// Brand when present, otherwise the manufacturer.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.brand.is_empty() {
            &self.manufacturer
        } else {
            &self.brand
        }
    }
}

/// Installed memory modules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLayout {
    /// One entry per installed module.
    #[serde(default)]
    pub layout: Vec<MemoryModule>,
}

/// A single memory module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryModule {
    /// Module size in bytes.
    #[serde(default)]
    pub size: i64,
}

/// Operating system details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsInfo {
    /// Platform name, e.g. `"linux"`.
    #[serde(default)]
    pub platform: String,
    /// Server hostname.
    #[serde(default)]
    pub hostname: String,
    /// Human-readable uptime as reported by the server.
    #[serde(default)]
    pub uptime: String,
}

/// Software version information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Versions {
    /// Core version block.
    #[serde(default)]
    pub core: CoreVersions,
}

/// Core version block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreVersions {
    /// Unraid OS version string.
    #[serde(default)]
    pub unraid: String,
}

// ============================================================================
// Array
// ============================================================================

/// Storage array state and capacity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrayInfo {
    /// Array state, e.g. `"STARTED"`.
    #[serde(default)]
    pub state: String,
    /// Capacity figures.
    #[serde(default)]
    pub capacity: ArrayCapacity,
    /// Boot device, absent on some configurations.
    #[serde(default)]
    pub boot: Option<ArrayDisk>,
    /// Parity disks.
    #[serde(default)]
    pub parities: Vec<ArrayDisk>,
    /// Data disks.
    #[serde(default)]
    pub disks: Vec<ArrayDisk>,
    /// Cache devices.
    #[serde(default)]
    pub caches: Vec<ArrayDisk>,
}

impl ArrayInfo {
    /// All disks in presentation order: boot, parities, data disks, caches.
    #[must_use]
    pub fn all_disks(&self) -> Vec<&ArrayDisk> {
        let mut all = Vec::new();
        if let Some(boot) = &self.boot {
            all.push(boot);
        }
        all.extend(&self.parities);
        all.extend(&self.disks);
        all.extend(&self.caches);
        all
    }
}

/// Array capacity figures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrayCapacity {
    /// Kilobyte counts, reported as decimal strings by the API.
    #[serde(default)]
    pub kilobytes: CapacityKilobytes,
}

/// Kilobyte counts, reported as decimal strings by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapacityKilobytes {
    /// Total capacity in KB.
    #[serde(default)]
    pub total: String,
    /// Used capacity in KB.
    #[serde(default)]
    pub used: String,
    /// Free capacity in KB.
    #[serde(default)]
    pub free: String,
}

/// A disk in the array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrayDisk {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Slot name, e.g. `"disk1"` or `"parity"`.
    #[serde(default)]
    pub name: String,
    /// Device node, e.g. `"sdb"`.
    #[serde(default)]
    pub device: String,
    /// Disk status, e.g. `"DISK_OK"`.
    #[serde(default)]
    pub status: String,
    /// Size in kilobytes.
    #[serde(default)]
    pub size: i64,
    /// Temperature in degrees Celsius, 0 when unavailable.
    #[serde(default, rename = "temp")]
    pub temperature: i64,
    /// Disk role, e.g. `"Data"` or `"Parity"`.
    #[serde(default, rename = "type")]
    pub disk_type: String,
    /// Filesystem type, e.g. `"xfs"`.
    #[serde(default, rename = "fsType")]
    pub fs_type: String,
}

// ============================================================================
// Docker
// ============================================================================

/// A Docker container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Names as reported by the daemon, usually with a leading `/`.
    #[serde(default)]
    pub names: Vec<String>,
    /// Image reference.
    #[serde(default)]
    pub image: String,
    /// Runtime state, e.g. `"RUNNING"`.
    #[serde(default)]
    pub state: String,
    /// Human-readable status line.
    #[serde(default)]
    pub status: String,
    /// Whether the container starts with the array.
    #[serde(default)]
    pub auto_start: bool,
}

impl Container {
    /// First name with the leading `/` stripped, or the id when nameless.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.names.first() {
            Some(name) => name.strip_prefix('/').unwrap_or(name),
            None => &self.id,
        }
    }
}

impl Addressable for Container {
    const KIND: &'static str = "container";

    fn id(&self) -> &str {
        &self.id
    }

    fn canonical_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

// ============================================================================
// VMs
// ============================================================================

/// A virtual machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vm {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Runtime state, e.g. `"RUNNING"`.
    #[serde(default)]
    pub state: String,
}

impl Addressable for Vm {
    const KIND: &'static str = "VM";

    fn id(&self) -> &str {
        &self.id
    }

    fn canonical_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

// ============================================================================
// Shares
// ============================================================================

/// A user share.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Share {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Share name.
    #[serde(default)]
    pub name: String,
    /// Free space in kilobytes.
    #[serde(default)]
    pub free: i64,
    /// Used space in kilobytes.
    #[serde(default)]
    pub used: i64,
    /// Total size in kilobytes.
    #[serde(default)]
    pub size: i64,
    /// Included disks.
    #[serde(default)]
    pub include: Vec<String>,
    /// Excluded disks.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Whether the cache participates in this share.
    #[serde(default)]
    pub cache: bool,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
}

// ============================================================================
// Metrics
// ============================================================================

/// Point-in-time system metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    /// CPU utilization.
    #[serde(default)]
    pub cpu: CpuMetrics,
    /// Memory utilization.
    #[serde(default)]
    pub memory: MemoryMetrics,
}

/// CPU utilization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuMetrics {
    /// Overall utilization percentage.
    #[serde(default)]
    pub percent_total: f64,
    /// Per-core utilization.
    #[serde(default)]
    pub cpus: Vec<CoreMetrics>,
}

/// Per-core utilization percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreMetrics {
    /// Overall utilization.
    #[serde(default)]
    pub percent_total: f64,
    /// Time in user space.
    #[serde(default)]
    pub percent_user: f64,
    /// Time in kernel space.
    #[serde(default)]
    pub percent_system: f64,
    /// Idle time.
    #[serde(default)]
    pub percent_idle: f64,
}

/// Memory utilization in bytes and percentages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMetrics {
    /// Total memory in bytes.
    #[serde(default)]
    pub total: i64,
    /// Used memory in bytes.
    #[serde(default)]
    pub used: i64,
    /// Free memory in bytes.
    #[serde(default)]
    pub free: i64,
    /// Available memory in bytes.
    #[serde(default)]
    pub available: i64,
    /// Used memory as a percentage of total.
    #[serde(default)]
    pub percent_total: f64,
    /// Total swap in bytes.
    #[serde(default)]
    pub swap_total: i64,
    /// Used swap in bytes.
    #[serde(default)]
    pub swap_used: i64,
    /// Free swap in bytes.
    #[serde(default)]
    pub swap_free: i64,
    /// Used swap as a percentage of total.
    #[serde(default)]
    pub percent_swap_total: f64,
}

// ============================================================================
// Parity
// ============================================================================

/// A parity check, either the live one or a history entry.
///
/// History entries only carry the first five fields; the rest default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParityCheck {
    /// Start date of the check.
    #[serde(default)]
    pub date: String,
    /// Duration in seconds.
    #[serde(default)]
    pub duration: i64,
    /// Average speed, e.g. `"110.2 MB/s"`.
    #[serde(default)]
    pub speed: String,
    /// Status word, e.g. `"OK"`.
    #[serde(default)]
    pub status: String,
    /// Error count found by the check.
    #[serde(default)]
    pub errors: i64,
    /// Completion percentage of a running check.
    #[serde(default)]
    pub progress: i64,
    /// Whether the check writes corrections.
    #[serde(default)]
    pub correcting: bool,
    /// Whether the check is paused.
    #[serde(default)]
    pub paused: bool,
    /// Whether a check is in progress.
    #[serde(default)]
    pub running: bool,
}

// ============================================================================
// Notifications
// ============================================================================

/// A system notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notification {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,
    /// Short title.
    #[serde(default)]
    pub title: String,
    /// Subject line.
    #[serde(default)]
    pub subject: String,
    /// Longer description, may be empty.
    #[serde(default)]
    pub description: String,
    /// Importance, e.g. `"INFO"`, `"WARNING"`, `"ALERT"`.
    #[serde(default)]
    pub importance: String,
    /// Optional link for details.
    #[serde(default)]
    pub link: String,
    /// `"UNREAD"` or `"ARCHIVE"`.
    #[serde(default, rename = "type")]
    pub notification_type: String,
    /// Creation timestamp.
    #[serde(default)]
    pub timestamp: String,
}

/// Notification counts by importance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NotificationCounts {
    /// Informational notifications.
    #[serde(default)]
    pub info: i64,
    /// Warnings.
    #[serde(default)]
    pub warning: i64,
    /// Alerts.
    #[serde(default)]
    pub alert: i64,
    /// All notifications.
    #[serde(default)]
    pub total: i64,
}

/// Counts for both notification pools.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NotificationOverview {
    /// Unread pool.
    #[serde(default)]
    pub unread: NotificationCounts,
    /// Archived pool.
    #[serde(default)]
    pub archive: NotificationCounts,
}

// ============================================================================
// Logs
// ============================================================================

/// A log file on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFile {
    /// File name.
    #[serde(default)]
    pub name: String,
    /// Absolute path on the server.
    #[serde(default)]
    pub path: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: i64,
    /// Last modification timestamp.
    #[serde(default)]
    pub modified_at: String,
}

/// A window of log file content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFileContent {
    /// Absolute path on the server.
    #[serde(default)]
    pub path: String,
    /// The requested lines, newline-joined.
    #[serde(default)]
    pub content: String,
    /// Total line count of the file.
    #[serde(default)]
    pub total_lines: i64,
    /// First line number included in `content`.
    #[serde(default)]
    pub start_line: i64,
}

// ============================================================================
// Plugins
// ============================================================================

/// An installed API plugin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plugin {
    /// Package name.
    #[serde(default)]
    pub name: String,
    /// Installed version.
    #[serde(default)]
    pub version: String,
    /// Whether the plugin ships an API module. Absent on older servers.
    #[serde(default)]
    pub has_api_module: Option<bool>,
    /// Whether the plugin ships a CLI module. Absent on older servers.
    #[serde(default)]
    pub has_cli_module: Option<bool>,
}
