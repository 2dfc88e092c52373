use anyhow::{Context, Result};
use std::sync::Arc;

use easy_sysinfo::core::system_monitor::{MetricsSource, SysinfoSource};
use easy_sysinfo::deck::{build_cli, normalize_args, run_plugin, LaunchArgs};
use easy_sysinfo::PluginConfig;

fn main() -> Result<()> {
    let matches = build_cli().get_matches_from(normalize_args(std::env::args()));
    let args = LaunchArgs::from_matches(&matches)?;

    let config = PluginConfig::load().context("Failed to load plugin configuration")?;
    easy_sysinfo::init_logging(&config.log_level);

    log::info!(
        "easy-sysinfo {} starting (plugin {}, poll every {} ms)",
        env!("CARGO_PKG_VERSION"),
        args.plugin_uuid,
        config.poll_interval_ms
    );

    // Single-threaded event loop; sensor reads run on the blocking pool
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let source: Arc<dyn MetricsSource> = Arc::new(SysinfoSource::new());
        run_plugin(args, &config, source).await
    })?;

    Ok(())
}
