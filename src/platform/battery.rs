//! Battery charge via the cross-platform `battery` crate.

use battery::units::ratio::percent;

use crate::core::system_monitor::BatteryStats;
use crate::error::Result;

/// Read the state of charge of the first battery.
///
/// Machines without a battery are not an error: they report
/// `has_battery: false` and no percentage.
pub fn read_battery() -> Result<BatteryStats> {
    let manager = battery::Manager::new()?;

    match manager.batteries()?.next() {
        Some(battery) => {
            let battery = battery?;
            let charge = battery.state_of_charge().get::<percent>();

            Ok(BatteryStats {
                has_battery: true,
                percent: Some(f64::from(charge)),
            })
        }
        None => Ok(BatteryStats::default()),
    }
}
