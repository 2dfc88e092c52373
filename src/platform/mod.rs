// OS probes that sysinfo does not cover

pub mod battery;

pub use self::battery::read_battery;
