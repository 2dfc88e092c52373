//! One fetch-format-render pass for a single button.

use std::sync::Arc;

use crate::core::system_monitor::{MetricsSource, Reading, Stat};
use crate::deck::ButtonSurface;
use crate::error::Result;
use crate::ui::formatters::{format_fixed, format_rate_mb, percent_of};
use crate::ui::svg::render_reading;

use super::settings::Selection;

/// Title shown while a button has no statistic configured
pub const PLACEHOLDER_TITLE: &str = "Select Stat";

/// What a tick decided to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Placeholder,
    Reading(Reading),
}

/// Query the source for one statistic and format it.
pub fn fetch_reading(stat: Stat, source: &dyn MetricsSource) -> Result<Reading> {
    let value = match stat {
        Stat::CpuUsage => format_fixed(source.current_load()?, 1),
        Stat::CpuTemp => source
            .cpu_temperature()?
            .main
            .map(|celsius| format_fixed(celsius, 1))
            .unwrap_or_else(|| "N/A".to_string()),
        Stat::MemUsage => {
            let mem = source.memory()?;
            format_fixed(percent_of(mem.total.saturating_sub(mem.available), mem.total), 1)
        }
        Stat::NetUpload => {
            let tx_sec = source
                .network_stats()?
                .first()
                .and_then(|iface| iface.tx_sec)
                .unwrap_or(0.0);
            format_rate_mb(tx_sec)
        }
        Stat::NetDownload => {
            let rx_sec = source
                .network_stats()?
                .first()
                .and_then(|iface| iface.rx_sec)
                .unwrap_or(0.0);
            format_rate_mb(rx_sec)
        }
        Stat::Battery => source
            .battery()?
            .percent
            .map(|percent| format_fixed(percent.round(), 0))
            .unwrap_or_else(|| "N/A".to_string()),
        Stat::DiskSpace => {
            let filesystems = source.fs_size()?;
            // Ties keep the first filesystem reported
            let largest = filesystems
                .iter()
                .reduce(|largest, fs| if fs.size > largest.size { fs } else { largest });

            match largest {
                Some(fs) => format_fixed(percent_of(fs.used, fs.size), 1),
                None => return Ok(Reading::unavailable()),
            }
        }
    };

    Ok(Reading::new(value, stat))
}

/// Decide what to draw for a selection; fetch failures become the error reading.
pub fn collect_frame(selection: &Selection, source: &dyn MetricsSource) -> Frame {
    match selection {
        Selection::Unset => Frame::Placeholder,
        Selection::Unknown(key) => {
            log::debug!("Unknown statistic key '{}'", key);
            Frame::Reading(Reading::unavailable())
        }
        Selection::Stat(stat) => match fetch_reading(*stat, source) {
            Ok(reading) => Frame::Reading(reading),
            Err(e) => {
                log::error!("Failed to read {}: {}", stat, e);
                Frame::Reading(Reading::error())
            }
        },
    }
}

/// Push a frame to the button: image then title, or just the placeholder title.
pub fn push_frame(context: &str, frame: &Frame, surface: &dyn ButtonSurface) -> Result<()> {
    match frame {
        Frame::Placeholder => surface.set_title(context, PLACEHOLDER_TITLE.to_string()),
        Frame::Reading(reading) => {
            surface.set_image(context, render_reading(reading))?;
            surface.set_title(context, reading.label.clone())
        }
    }
}

/// Run one complete tick for a button.
///
/// The source is queried on the blocking pool so a slow sensor read only
/// delays this button. A panic inside the source is reported like any other
/// fetch failure.
pub async fn run_tick(
    context: &str,
    selection: &Selection,
    source: &Arc<dyn MetricsSource>,
    surface: &dyn ButtonSurface,
) {
    let frame = match selection {
        Selection::Stat(_) => {
            let source = Arc::clone(source);
            let selection = selection.clone();
            tokio::task::spawn_blocking(move || collect_frame(&selection, source.as_ref()))
                .await
                .unwrap_or_else(|e| {
                    log::error!("Metrics fetch for {} aborted: {}", context, e);
                    Frame::Reading(Reading::error())
                })
        }
        _ => collect_frame(selection, source.as_ref()),
    };

    log::trace!("Tick for {}: {:?}", context, frame);

    if let Err(e) = push_frame(context, &frame, surface) {
        log::warn!("Could not update button {}: {}", context, e);
    }
}
