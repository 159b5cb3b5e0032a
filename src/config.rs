use std::str::FromStr;
use std::time::Duration;

use eframe::egui::Color32;

/// Default prediction service address (local development server)
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Environment variables read by `AppConfig::from_env`
pub const API_URL_ENV: &str = "PREDICTOR_API_URL";
pub const TIMEOUT_ENV: &str = "PREDICTOR_TIMEOUT_SECS";
pub const STALE_POLICY_ENV: &str = "PREDICTOR_STALE_POLICY";
pub const LOG_LEVEL_ENV: &str = "PREDICTOR_LOG_LEVEL";

/// Shown whenever a request fails without a server-provided message
pub const GENERIC_ERROR_MESSAGE: &str = "Could not connect to the server.";

/// Window geometry
pub const WINDOW_SIZE: [f32; 2] = [1100.0, 860.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [640.0, 560.0];

/// Historical chart styling
pub const CHART_TITLE: &str = "1-Year Historical Price";
pub const CHART_TITLE_SIZE: f32 = 18.0;
pub const CHART_HEIGHT: f32 = 400.0;
pub const CHART_LINE_COLOR: Color32 = Color32::from_rgb(56, 189, 248);
pub const CHART_LINE_TENSION: f64 = 0.3;
pub const CHART_SAMPLES_PER_SEGMENT: usize = 6;
pub const CHART_TITLE_COLOR: Color32 = Color32::from_rgb(229, 231, 235);
pub const CHART_TICK_COLOR: Color32 = Color32::from_rgb(156, 163, 175);

/// Which completions the controller applies when several requests overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    /// Only the most recently dispatched request may update the view.
    #[default]
    LastDispatched,
    /// Every completion is applied in arrival order.
    LastArrived,
}

impl FromStr for StaleResponsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-dispatched" | "last_dispatched" => Ok(Self::LastDispatched),
            "last-arrived" | "last_arrived" => Ok(Self::LastArrived),
            other => Err(format!("unknown stale response policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,
    pub stale_policy: StaleResponsePolicy,
    pub log_level: tracing::Level,
    /// Values that were ignored while parsing; logged once tracing is up.
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            stale_policy: StaleResponsePolicy::default(),
            log_level: tracing::Level::INFO,
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment, loading a `.env`
    /// file from the working directory first if one exists.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Values that fail
    /// to parse fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV) {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.api_base_url = url.to_string();
            }
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(0) => {}
                Ok(secs) => config.request_timeout = Some(Duration::from_secs(secs)),
                Err(e) => config
                    .warnings
                    .push(format!("Ignoring {}={:?}: {}", TIMEOUT_ENV, raw, e)),
            }
        }

        if let Some(raw) = lookup(STALE_POLICY_ENV) {
            match raw.parse() {
                Ok(policy) => config.stale_policy = policy,
                Err(e) => config
                    .warnings
                    .push(format!("Ignoring {}: {}", STALE_POLICY_ENV, e)),
            }
        }

        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            match raw.trim().parse::<tracing::Level>() {
                Ok(level) => config.log_level = level,
                Err(e) => config
                    .warnings
                    .push(format!("Ignoring {}={:?}: {}", LOG_LEVEL_ENV, raw, e)),
            }
        }

        config
    }

    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.predict_url(), "http://127.0.0.1:5000/predict");
    }

    #[test]
    fn test_api_url_trailing_slash_stripped() {
        let config = AppConfig::from_lookup(lookup_from(&[(API_URL_ENV, "https://forecast.local:8443/")]));
        assert_eq!(config.api_base_url, "https://forecast.local:8443");
        assert_eq!(config.predict_url(), "https://forecast.local:8443/predict");
    }

    #[test]
    fn test_timeout_parsing() {
        let config = AppConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "45")]));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(45)));

        let zero = AppConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "0")]));
        assert_eq!(zero.request_timeout, None);

        let bad = AppConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]));
        assert_eq!(bad.request_timeout, None);
        assert_eq!(bad.warnings.len(), 1);
    }

    #[test]
    fn test_stale_policy_parsing() {
        let config = AppConfig::from_lookup(lookup_from(&[(STALE_POLICY_ENV, "Last-Arrived")]));
        assert_eq!(config.stale_policy, StaleResponsePolicy::LastArrived);

        let bad = AppConfig::from_lookup(lookup_from(&[(STALE_POLICY_ENV, "random")]));
        assert_eq!(bad.stale_policy, StaleResponsePolicy::LastDispatched);
    }

    #[test]
    fn test_log_level_parsing() {
        let config = AppConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "debug")]));
        assert_eq!(config.log_level, tracing::Level::DEBUG);

        let bad = AppConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")]));
        assert_eq!(bad.log_level, tracing::Level::INFO);
    }
}
