use super::metrics::{BatteryStats, CpuTemperature, FsSize, MemoryStats, NetworkStats};
use crate::error::Result;

/// Trait for system statistics providers
///
/// Every getter may fail; callers treat a failure as a transient condition of
/// the current poll. Getters are synchronous and may block briefly (the CPU
/// load needs two samples), so async callers run them on the blocking pool.
pub trait MetricsSource: Send + Sync {
    /// Current overall CPU load in percent
    fn current_load(&self) -> Result<f64>;

    fn cpu_temperature(&self) -> Result<CpuTemperature>;

    fn memory(&self) -> Result<MemoryStats>;

    /// Per-interface throughput, most relevant interface first
    fn network_stats(&self) -> Result<Vec<NetworkStats>>;

    fn battery(&self) -> Result<BatteryStats>;

    /// Mounted filesystems with their total and used bytes
    fn fs_size(&self) -> Result<Vec<FsSize>>;
}
