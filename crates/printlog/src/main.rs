use log::{error, info};

use printlog::{load_config, run};

const DEFAULT_CONFIG_PATH: &str = "printlog.json";

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    info!("Starting printlog v{}", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load config '{}': {}", config_path, e);
            std::process::exit(1);
        }
    };

    match run(&config) {
        Ok(summary) => {
            info!(
                "Run complete: {} archives staged, {} files loaded, {} rows inserted, {} rows skipped, {} rows enriched ({} updates failed)",
                summary.archives_staged,
                summary.files_loaded,
                summary.rows_inserted,
                summary.rows_skipped,
                summary.rows_updated,
                summary.failed_updates
            );
        }
        Err(e) => {
            error!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}
