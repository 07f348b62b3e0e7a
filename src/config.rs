//! Process configuration loaded once at startup.

use crate::{Error, Result};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

/// Immutable run configuration, passed by reference into every component.
#[derive(Debug, Clone)]
pub struct Config {
    pub line_channel_access_token: String,
    pub gemini_api_key: String,
    pub openweathermap_api_key: String,
    pub unsplash_access_key: Option<String>,
    pub pexels_api_key: Option<String>,
    pub imgbb_api_key: Option<String>,
    pub text_model: String,
    pub vision_model: String,
    pub utc_offset_hours: i32,
    pub weather_lat: f64,
    pub weather_lon: f64,
    pub content_max_retries: u32,
    pub content_initial_backoff: Duration,
    pub media_max_candidates: usize,
    pub media_per_page: u32,
    pub dry_run: bool,
}

impl Config {
    /// Load `.env` (if any) and read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Every missing required key is reported in a single error so a broken
    /// deployment shows all of its gaps at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                tracing::error!("Required environment variable {} is not set", key);
                missing.push(key);
                String::new()
            })
        };

        let line_channel_access_token = required("LINE_CHANNEL_ACCESS_TOKEN");
        let gemini_api_key = required("GEMINI_API_KEY");
        let openweathermap_api_key = required("OPENWEATHERMAP_API_KEY");

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required variables: {}",
                missing.join(", ")
            )));
        }

        let unsplash_access_key = get("UNSPLASH_ACCESS_KEY");
        let pexels_api_key = get("PEXELS_API_KEY");
        if unsplash_access_key.is_none() && pexels_api_key.is_none() {
            tracing::warn!(
                "Neither UNSPLASH_ACCESS_KEY nor PEXELS_API_KEY is set; themed images are disabled"
            );
        }

        let imgbb_api_key = get("IMGBB_API_KEY");
        if imgbb_api_key.is_none() {
            tracing::warn!("IMGBB_API_KEY is not set; the calendar card will be skipped");
        }

        Ok(Self {
            line_channel_access_token,
            gemini_api_key,
            openweathermap_api_key,
            unsplash_access_key,
            pexels_api_key,
            imgbb_api_key,
            text_model: get("GEMINI_TEXT_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            vision_model: get("GEMINI_VISION_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            utc_offset_hours: parse_or(&get, "UTC_OFFSET_HOURS", 8)?,
            weather_lat: parse_or(&get, "WEATHER_LAT", 35.6895)?,
            weather_lon: parse_or(&get, "WEATHER_LON", 139.6917)?,
            content_max_retries: parse_or(&get, "CONTENT_MAX_RETRIES", 3)?,
            content_initial_backoff: Duration::from_secs(parse_or(
                &get,
                "CONTENT_INITIAL_BACKOFF_SECS",
                10,
            )?),
            media_max_candidates: parse_or(&get, "MEDIA_MAX_CANDIDATES", 2)?,
            media_per_page: parse_or(&get, "MEDIA_PER_PAGE", 3)?,
            dry_run: get("DRY_RUN")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}
