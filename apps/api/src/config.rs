use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare environment starts cleanly.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Minutes a cache entry stays servable before it reads as a miss.
    pub cache_ttl_minutes: u64,
    /// Minutes between sweeps that physically drop expired cache entries.
    pub cache_sweep_interval_minutes: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            cache_ttl_minutes: env_or("CACHE_TTL_MINUTES", "30")
                .parse::<u64>()
                .context("CACHE_TTL_MINUTES must be a whole number of minutes")?,
            cache_sweep_interval_minutes: env_or("CACHE_SWEEP_INTERVAL_MINUTES", "5")
                .parse::<u64>()
                .context("CACHE_SWEEP_INTERVAL_MINUTES must be a whole number of minutes")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
