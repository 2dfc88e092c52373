//! System statistics collection.
//!
//! Defines the statistic keys, the raw stats a source reports, the
//! [`MetricsSource`] trait the widgets poll, and the sysinfo-backed
//! implementation used in production.

mod collector;
mod metrics;
mod source;

pub use collector::SysinfoSource;
pub use metrics::{
    BatteryStats, CpuTemperature, FsSize, MemoryStats, NetworkStats, Reading, Stat,
};
pub use source::MetricsSource;
