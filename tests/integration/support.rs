//! Test doubles for the metrics source and the host surface.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use easy_sysinfo::core::system_monitor::{
    BatteryStats, CpuTemperature, FsSize, MemoryStats, MetricsSource, NetworkStats,
};
use easy_sysinfo::deck::ButtonSurface;
use easy_sysinfo::{PluginError, Result};
use parking_lot::Mutex;

/// Metrics source returning fixed values, with optional injected failures.
pub struct MockSource {
    pub load: f64,
    pub temperature: Option<f64>,
    pub memory: MemoryStats,
    pub network: Vec<NetworkStats>,
    pub battery: BatteryStats,
    pub filesystems: Vec<FsSize>,
    fail_next: AtomicUsize,
    panic_next: AtomicBool,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            load: 12.34,
            temperature: Some(54.26),
            memory: MemoryStats {
                total: 100,
                available: 40,
            },
            network: vec![NetworkStats {
                iface: "eth0".to_string(),
                rx_sec: Some(2_097_152.0),
                tx_sec: Some(1_048_576.0),
            }],
            battery: BatteryStats {
                has_battery: true,
                percent: Some(87.4),
            },
            filesystems: vec![fs("/dev/sda1", 100, 50), fs("/dev/sdb1", 200, 100)],
            fail_next: AtomicUsize::new(0),
            panic_next: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// The next `count` getter calls fail
    pub fn failing(self, count: usize) -> Self {
        self.fail_next.store(count, Ordering::SeqCst);
        self
    }

    /// The next getter call panics
    pub fn panicking(self) -> Self {
        self.panic_next.store(true, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.panic_next.swap(false, Ordering::SeqCst) {
            panic!("sensor driver crashed");
        }

        let failing = self
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(PluginError::metric("sensor unavailable"));
        }
        Ok(())
    }
}

impl MetricsSource for MockSource {
    fn current_load(&self) -> Result<f64> {
        self.record()?;
        Ok(self.load)
    }

    fn cpu_temperature(&self) -> Result<CpuTemperature> {
        self.record()?;
        Ok(CpuTemperature {
            main: self.temperature,
        })
    }

    fn memory(&self) -> Result<MemoryStats> {
        self.record()?;
        Ok(self.memory)
    }

    fn network_stats(&self) -> Result<Vec<NetworkStats>> {
        self.record()?;
        Ok(self.network.clone())
    }

    fn battery(&self) -> Result<BatteryStats> {
        self.record()?;
        Ok(self.battery)
    }

    fn fs_size(&self) -> Result<Vec<FsSize>> {
        self.record()?;
        Ok(self.filesystems.clone())
    }
}

pub fn fs(name: &str, size: u64, used: u64) -> FsSize {
    FsSize {
        fs: name.to_string(),
        mount: format!("/mnt/{}", name.trim_start_matches("/dev/")),
        size,
        used,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Push {
    Image { context: String, image: String },
    Title { context: String, title: String },
}

/// Surface that records every push.
#[derive(Default)]
pub struct RecordingSurface {
    pushes: Mutex<Vec<Push>>,
}

impl RecordingSurface {
    pub fn pushes(&self) -> Vec<Push> {
        self.pushes.lock().clone()
    }

    pub fn titles_for(&self, context: &str) -> Vec<String> {
        self.pushes
            .lock()
            .iter()
            .filter_map(|push| match push {
                Push::Title { context: c, title } if c == context => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn images_for(&self, context: &str) -> Vec<String> {
        self.pushes
            .lock()
            .iter()
            .filter_map(|push| match push {
                Push::Image { context: c, image } if c == context => Some(image.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ButtonSurface for RecordingSurface {
    fn set_image(&self, context: &str, image: String) -> Result<()> {
        self.pushes.lock().push(Push::Image {
            context: context.to_string(),
            image,
        });
        Ok(())
    }

    fn set_title(&self, context: &str, title: String) -> Result<()> {
        self.pushes.lock().push(Push::Title {
            context: context.to_string(),
            title,
        });
        Ok(())
    }
}

/// Decode a `data:image/svg+xml;base64,` URL back to markup.
pub fn decode_image(image: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let payload = image
        .strip_prefix("data:image/svg+xml;base64,")
        .expect("image is not an SVG data URL");
    String::from_utf8(STANDARD.decode(payload).expect("invalid base64")).expect("invalid UTF-8")
}
