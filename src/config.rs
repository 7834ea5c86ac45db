use std::env;
use std::time::Duration;

use crate::filter::{
    DEFAULT_FETCH_LIMIT, DEFAULT_GOAL_XG_THRESHOLD, DEFAULT_HEX_RADIUS, MAX_HEX_RADIUS,
    MIN_HEX_RADIUS,
};
use crate::heatmap::DEFAULT_HIGH_VALUE_XG;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CANVAS_WIDTH: f64 = 800.0;
const DEFAULT_CANVAS_HEIGHT: f64 = 400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // None when no live shot source is configured; CSV and sample data still work.
    pub api: Option<ApiConfig>,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub hex_radius: f64,
    pub high_value_xg: f64,
    pub goal_xg_threshold: f64,
    pub fetch_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: None,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            hex_radius: DEFAULT_HEX_RADIUS,
            high_value_xg: DEFAULT_HIGH_VALUE_XG,
            goal_xg_threshold: DEFAULT_GOAL_XG_THRESHOLD,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load `.env.local` / `.env` if present, then read the environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        let api = opt_env("SHOTS_API_URL").map(|base_url| ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: opt_env("SHOTS_API_KEY"),
            timeout: Duration::from_secs(
                env_parse::<u64>("REQUEST_TIMEOUT_SECS")
                    .unwrap_or(DEFAULT_TIMEOUT_SECS)
                    .clamp(1, 120),
            ),
        });
        Self {
            api,
            canvas_width: env_parse::<f64>("HEATMAP_WIDTH")
                .unwrap_or(DEFAULT_CANVAS_WIDTH)
                .clamp(200.0, 4000.0),
            canvas_height: env_parse::<f64>("HEATMAP_HEIGHT")
                .unwrap_or(DEFAULT_CANVAS_HEIGHT)
                .clamp(100.0, 2000.0),
            hex_radius: env_parse::<f64>("HEX_RADIUS")
                .unwrap_or(DEFAULT_HEX_RADIUS)
                .clamp(MIN_HEX_RADIUS, MAX_HEX_RADIUS),
            high_value_xg: env_parse::<f64>("HIGH_VALUE_XG")
                .unwrap_or(DEFAULT_HIGH_VALUE_XG)
                .clamp(0.0, 1.0),
            goal_xg_threshold: env_parse::<f64>("GOAL_XG_THRESHOLD")
                .unwrap_or(DEFAULT_GOAL_XG_THRESHOLD)
                .clamp(0.0, 1.0),
            fetch_limit: env_parse::<usize>("SHOT_FETCH_LIMIT")
                .unwrap_or(DEFAULT_FETCH_LIMIT)
                .clamp(1, 50_000),
        }
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .and_then(|val| if val.trim().is_empty() { None } else { Some(val) })
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    opt_env(key).and_then(|val| val.trim().parse::<T>().ok())
}
