//! Launch arguments passed by the Stream Deck application.
//!
//! The host starts the plugin as
//! `easy-sysinfo -port 28196 -pluginUUID <uuid> -registerEvent registerPlugin -info <json>`.
//! Those single-dash long flags are rewritten to `--port` style before clap
//! sees them.

use clap::{Arg, ArgMatches, Command};
use serde::Deserialize;

use crate::error::{PluginError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct LaunchArgs {
    pub port: u16,
    pub plugin_uuid: String,
    pub register_event: String,
    pub info: RegistrationInfo,
}

/// Subset of the `-info` JSON blob the plugin cares about.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RegistrationInfo {
    pub application: ApplicationInfo,
    pub plugin: PluginInfo,
    #[serde(rename = "devicePixelRatio")]
    pub device_pixel_ratio: Option<u32>,
    pub devices: Vec<DeviceInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApplicationInfo {
    pub version: String,
    pub platform: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PluginInfo {
    pub uuid: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u32,
}

pub fn build_cli() -> Command {
    Command::new("easy-sysinfo")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Stream Deck plugin that shows a live system statistic on a button")
        .arg(
            Arg::new("port")
                .long("port")
                .value_name("PORT")
                .help("WebSocket port of the Stream Deck application")
                .required(true)
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("pluginUUID")
                .long("pluginUUID")
                .value_name("UUID")
                .help("Identifier used to register with the Stream Deck application")
                .required(true),
        )
        .arg(
            Arg::new("registerEvent")
                .long("registerEvent")
                .value_name("EVENT")
                .help("Event name of the registration message")
                .required(true),
        )
        .arg(
            Arg::new("info")
                .long("info")
                .value_name("JSON")
                .help("Application and device information")
                .allow_hyphen_values(true),
        )
}

/// Rewrite `-flag` into `--flag` for multi-letter flags.
pub fn normalize_args<I, T>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            let is_long_flag = i > 0
                && arg.len() > 2
                && arg.starts_with('-')
                && !arg.starts_with("--")
                && arg[1..].chars().all(|c| c.is_ascii_alphabetic());

            if is_long_flag {
                format!("-{}", arg)
            } else {
                arg
            }
        })
        .collect()
}

/// Parse raw process arguments without exiting on failure.
pub fn parse_launch_args<I, T>(args: I) -> Result<LaunchArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let matches = build_cli()
        .try_get_matches_from(normalize_args(args))
        .map_err(|e| PluginError::args(e.to_string()))?;

    LaunchArgs::from_matches(&matches)
}

impl LaunchArgs {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let port = matches
            .get_one::<u16>("port")
            .copied()
            .ok_or_else(|| PluginError::args("missing -port"))?;

        let plugin_uuid = matches
            .get_one::<String>("pluginUUID")
            .cloned()
            .ok_or_else(|| PluginError::args("missing -pluginUUID"))?;

        let register_event = matches
            .get_one::<String>("registerEvent")
            .cloned()
            .ok_or_else(|| PluginError::args("missing -registerEvent"))?;

        let info = matches
            .get_one::<String>("info")
            .map(|raw| parse_info(raw))
            .unwrap_or_default();

        Ok(Self {
            port,
            plugin_uuid,
            register_event,
            info,
        })
    }

    pub fn websocket_url(&self) -> String {
        format!("ws://127.0.0.1:{}", self.port)
    }
}

fn parse_info(raw: &str) -> RegistrationInfo {
    match serde_json::from_str(raw) {
        Ok(info) => info,
        Err(e) => {
            log::warn!("Could not parse -info payload, using defaults: {}", e);
            RegistrationInfo::default()
        }
    }
}
