//! Server startup utilities.

use roster_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____            __
   / __ \____  _____/ /____  _____
  / /_/ / __ \/ ___/ __/ _ \/ ___/
 / _, _/ /_/ (__  ) /_/  __/ /
/_/ |_|\____/____/\__/\___/_/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let rest_addr = config.server.rest_addr();
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/users", rest_addr);
    info!("Health:    http://{}/health", rest_addr);
    info!("API Docs:  http://{}/swagger-ui", rest_addr);
    info!("Store:     {}", store_label(config));
    info!("Cache:     {}", cache_label(config));
    info!("Statuses:  {}", config.server.status_policy);
    info!("{}", separator);
}

fn store_label(config: &AppConfig) -> &'static str {
    if config.database.is_in_memory() {
        "in-memory"
    } else {
        "mysql"
    }
}

fn cache_label(config: &AppConfig) -> String {
    if !config.redis.enabled {
        return "disabled".to_string();
    }
    match config.cache.ttl_secs {
        Some(secs) => format!("redis (ttl {}s)", secs),
        None => "redis (no expiry)".to_string(),
    }
}
