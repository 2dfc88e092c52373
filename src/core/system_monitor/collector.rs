use std::time::{Duration, Instant};

use parking_lot::Mutex;
use sysinfo::{Components, CpuRefreshKind, Disks, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::error::{PluginError, Result};
use crate::platform::battery::read_battery;

use super::metrics::*;
use super::source::MetricsSource;

/// Two network samples closer than this reuse the previous rates instead of
/// dividing a tiny byte delta by a tiny interval.
const MIN_NETWORK_SAMPLE: Duration = Duration::from_millis(250);

/// Label fragments identifying the CPU package sensor, in priority order.
const CPU_SENSOR_KEYWORDS: [&[&str]; 2] = [&["package", "tctl", "tdie", "cpu"], &["core"]];

/// Live sysinfo state shared by every button.
struct Probe {
    system: System,
    cpu_primed: bool,
    components: Components,
    networks: Networks,
    disks: Disks,
    last_network_refresh: Instant,
    last_network_stats: Vec<NetworkStats>,
}

/// Metrics source backed by `sysinfo` (and the `battery` crate for charge).
pub struct SysinfoSource {
    probe: Mutex<Probe>,
}

impl SysinfoSource {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        let probe = Probe {
            system: System::new_with_specifics(refresh_kind),
            cpu_primed: false,
            components: Components::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            disks: Disks::new_with_refreshed_list(),
            last_network_refresh: Instant::now(),
            last_network_stats: Vec::new(),
        };

        Self {
            probe: Mutex::new(probe),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSource for SysinfoSource {
    fn current_load(&self) -> Result<f64> {
        let mut probe = self.probe.lock();

        // CPU usage is a delta between two refreshes
        if !probe.cpu_primed {
            probe.system.refresh_cpu_usage();
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            probe.cpu_primed = true;
        }
        probe.system.refresh_cpu_usage();

        if probe.system.cpus().is_empty() {
            return Err(PluginError::metric("no CPU reported by the system"));
        }

        Ok(f64::from(probe.system.global_cpu_usage()))
    }

    fn cpu_temperature(&self) -> Result<CpuTemperature> {
        let mut probe = self.probe.lock();
        probe.components.refresh(true);

        let sensors: Vec<(String, Option<f32>)> = probe
            .components
            .iter()
            .map(|comp| (comp.label().to_string(), comp.temperature()))
            .collect();

        Ok(CpuTemperature {
            main: main_cpu_temperature(&sensors),
        })
    }

    fn memory(&self) -> Result<MemoryStats> {
        let mut probe = self.probe.lock();
        probe.system.refresh_memory();

        Ok(MemoryStats {
            total: probe.system.total_memory(),
            available: probe.system.available_memory(),
        })
    }

    fn network_stats(&self) -> Result<Vec<NetworkStats>> {
        let mut probe = self.probe.lock();

        let now = Instant::now();
        let elapsed = now.duration_since(probe.last_network_refresh);
        if elapsed < MIN_NETWORK_SAMPLE && !probe.last_network_stats.is_empty() {
            return Ok(probe.last_network_stats.clone());
        }

        probe.networks.refresh(true);

        let samples: Vec<InterfaceSample> = probe
            .networks
            .iter()
            .map(|(name, data)| InterfaceSample {
                name: name.to_string(),
                received: data.received(),
                transmitted: data.transmitted(),
                total_bytes: data.total_received() + data.total_transmitted(),
            })
            .collect();

        let stats = build_network_stats(samples, elapsed.as_secs_f64());

        probe.last_network_refresh = now;
        probe.last_network_stats = stats.clone();

        Ok(stats)
    }

    fn battery(&self) -> Result<BatteryStats> {
        read_battery()
    }

    fn fs_size(&self) -> Result<Vec<FsSize>> {
        let mut probe = self.probe.lock();
        probe.disks.refresh(true);

        Ok(probe
            .disks
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                let available = disk.available_space();

                FsSize {
                    fs: disk.name().to_string_lossy().to_string(),
                    mount: disk.mount_point().to_string_lossy().to_string(),
                    size: total,
                    used: total.saturating_sub(available),
                }
            })
            .collect())
    }
}

/// Byte counters for one interface since the previous refresh.
#[derive(Debug, Clone)]
struct InterfaceSample {
    name: String,
    received: u64,
    transmitted: u64,
    total_bytes: u64,
}

/// Convert counters into per-second rates, busiest non-loopback interface first.
fn build_network_stats(mut samples: Vec<InterfaceSample>, elapsed_secs: f64) -> Vec<NetworkStats> {
    samples.sort_by(|a, b| {
        is_loopback(&a.name)
            .cmp(&is_loopback(&b.name))
            .then(b.total_bytes.cmp(&a.total_bytes))
            .then(a.name.cmp(&b.name))
    });

    samples
        .into_iter()
        .map(|sample| {
            let rate = |bytes: u64| (elapsed_secs > 0.0).then(|| bytes as f64 / elapsed_secs);

            NetworkStats {
                rx_sec: rate(sample.received),
                tx_sec: rate(sample.transmitted),
                iface: sample.name,
            }
        })
        .collect()
}

fn is_loopback(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower == "lo" || lower == "lo0" || lower.contains("loopback")
}

/// Average of the sensors that look like the CPU package; falls back to
/// per-core sensors when no package sensor exists.
fn main_cpu_temperature(sensors: &[(String, Option<f32>)]) -> Option<f64> {
    CPU_SENSOR_KEYWORDS.iter().find_map(|keywords| {
        let readings: Vec<f64> = sensors
            .iter()
            .filter(|(label, _)| {
                let label = label.to_ascii_lowercase();
                keywords.iter().any(|kw| label.contains(kw))
            })
            .filter_map(|(_, temp)| temp.map(f64::from))
            .filter(|temp| temp.is_finite())
            .collect();

        if readings.is_empty() {
            None
        } else {
            Some(readings.iter().sum::<f64>() / readings.len() as f64)
        }
    })
}
