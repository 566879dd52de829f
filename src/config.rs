use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    /// `memory:` runs against the in-process store.
    pub database_url: String,
    pub seed_demo_data: bool,

    // Photo storage
    pub storage_url: Option<String>,
    pub storage_key: Option<String>,
    pub storage_bucket: String,
    pub max_photo_bytes: usize,

    pub request_timeout_secs: u64,
    pub utc_offset_hours: i32,
    pub site_cache_ttl_secs: u64,

    // Rate limiting
    pub rate_submit_per_min: u32,
    pub rate_read_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let utc_offset_hours: i32 = parse_or("UTC_OFFSET_HOURS", 8)?;
        if !(-12..=14).contains(&utc_offset_hours) {
            return Err(anyhow!(
                "UTC_OFFSET_HOURS must be between -12 and 14, got {}",
                utc_offset_hours
            ));
        }

        Ok(Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            seed_demo_data: parse_or("SEED_DEMO_DATA", false)?,

            storage_url: env::var("STORAGE_URL").ok().filter(|v| !v.is_empty()),
            storage_key: env::var("STORAGE_KEY").ok().filter(|v| !v.is_empty()),
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "attendance-photos".to_string()),
            max_photo_bytes: parse_or("MAX_PHOTO_BYTES", 10 * 1024 * 1024)?, // 10 MiB

            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", 15)?,
            utc_offset_hours,
            site_cache_ttl_secs: parse_or("SITE_CACHE_TTL_SECS", 300)?,

            rate_submit_per_min: parse_or("RATE_SUBMIT_PER_MIN", 30)?,
            rate_read_per_min: parse_or("RATE_READ_PER_MIN", 600)?,

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: parse_or("LOG_LEVEL", tracing::Level::DEBUG)?,
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with("memory:")
    }

    /// JSON body cap: the photo after base64 inflation plus room for the other fields.
    pub fn json_body_limit(&self) -> usize {
        self.max_photo_bytes / 3 * 4 + 64 * 1024
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value {:?}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}
