use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Statistic a button can be configured to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stat {
    CpuUsage,
    CpuTemp,
    MemUsage,
    NetUpload,
    NetDownload,
    Battery,
    DiskSpace,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::CpuUsage,
        Stat::CpuTemp,
        Stat::MemUsage,
        Stat::NetUpload,
        Stat::NetDownload,
        Stat::Battery,
        Stat::DiskSpace,
    ];

    /// Settings key as stored by the host (`"cpu-usage"`, ...)
    pub fn key(self) -> &'static str {
        match self {
            Stat::CpuUsage => "cpu-usage",
            Stat::CpuTemp => "cpu-temp",
            Stat::MemUsage => "mem-usage",
            Stat::NetUpload => "net-upload",
            Stat::NetDownload => "net-download",
            Stat::Battery => "battery",
            Stat::DiskSpace => "disk-space",
        }
    }

    /// Short title shown under the image
    pub fn label(self) -> &'static str {
        match self {
            Stat::CpuUsage => "CPU",
            Stat::CpuTemp => "CPU TEMP",
            Stat::MemUsage => "MEM",
            Stat::NetUpload => "UP",
            Stat::NetDownload => "DOWN",
            Stat::Battery => "BATT",
            Stat::DiskSpace => "DISK",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Stat::CpuTemp => "°C",
            Stat::NetUpload | Stat::NetDownload => "MB/s",
            _ => "%",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::ALL
            .into_iter()
            .find(|stat| stat.key() == s)
            .ok_or_else(|| format!("unknown statistic key '{}'", s))
    }
}

/// One formatted value ready to be drawn on a button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub value: String,
    pub label: String,
    pub unit: String,
}

impl Reading {
    pub fn new(value: impl Into<String>, stat: Stat) -> Self {
        Self {
            value: value.into(),
            label: stat.label().to_string(),
            unit: stat.unit().to_string(),
        }
    }

    /// Reading used when nothing could be determined (unknown key, no disks).
    pub fn unavailable() -> Self {
        Self {
            value: "N/A".to_string(),
            label: String::new(),
            unit: String::new(),
        }
    }

    /// Reading shown for a tick whose fetch failed.
    pub fn error() -> Self {
        Self {
            value: "ERROR".to_string(),
            label: String::new(),
            unit: String::new(),
        }
    }

    pub fn is_network(&self) -> bool {
        self.unit == Stat::NetUpload.unit()
    }
}

impl Default for Reading {
    fn default() -> Self {
        Self::unavailable()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuTemperature {
    /// Main CPU temperature in °C, if any sensor reported one
    pub main: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkStats {
    pub iface: String,
    /// Received bytes per second; `None` until a baseline sample exists
    pub rx_sec: Option<f64>,
    /// Transmitted bytes per second; `None` until a baseline sample exists
    pub tx_sec: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatteryStats {
    pub has_battery: bool,
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FsSize {
    pub fs: String,
    pub mount: String,
    pub size: u64,
    pub used: u64,
}
