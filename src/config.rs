use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::ads::AffiliateLink;
use crate::scoring::{is_convex, PerformanceConfig, SeoConfig};
use crate::trend::TrendConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdsConfig {
    pub publisher_id: Option<String>,
    pub default_ad_slot: Option<String>,
    pub enable_affiliate_links: bool,
}

impl AdsConfig {
    /// Tracked URL for `link`, or `None` while affiliate links are disabled
    /// or the link itself is inactive.
    pub fn affiliate_url(
        &self,
        link: &AffiliateLink,
        affiliate_id: &str,
        product_id: &str,
    ) -> Option<String> {
        if !self.enable_affiliate_links {
            return None;
        }
        link.link_for(affiliate_id, product_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    pub log_level: String,
    pub performance: PerformanceConfig,
    pub seo: SeoConfig,
    pub trend: TrendConfig,
    pub ads: AdsConfig,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            performance: PerformanceConfig::default(),
            seo: SeoConfig::default(),
            trend: TrendConfig::default(),
            ads: AdsConfig::default(),
        }
    }
}

impl AnalyticsConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::read(path)?,
            _ => AnalyticsConfig::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Weights must form a convex combination and saturation points must be
    /// positive, otherwise composite scores leave the 0–100 scale.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_convex(&self.performance.weights.to_vec()) {
            return Err(ConfigError::Invalid(
                "performance weights must be non-negative and sum to 1.0".to_string(),
            ));
        }
        if !is_convex(&self.seo.weights.to_vec()) {
            return Err(ConfigError::Invalid(
                "seo weights must be non-negative and sum to 1.0".to_string(),
            ));
        }

        let saturation_points = [
            ("performance.views_saturation", self.performance.views_saturation),
            (
                "performance.time_saturation_seconds",
                self.performance.time_saturation_seconds,
            ),
            ("performance.likes_saturation", self.performance.likes_saturation),
            ("seo.time_saturation_seconds", self.seo.time_saturation_seconds),
        ];
        for (name, value) in saturation_points {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }

        if !(self.trend.threshold_percent.is_finite() && self.trend.threshold_percent >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "trend.threshold_percent must be non-negative, got {}",
                self.trend.threshold_percent
            )));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("ANALYTICS_LOG_LEVEL") {
            if !level.trim().is_empty() {
                self.log_level = level;
            }
        }
        if let Ok(threshold) = env::var("TREND_THRESHOLD_PERCENT") {
            if let Ok(value) = threshold.parse::<f64>() {
                self.trend.threshold_percent = value;
            }
        }
        if let Ok(window) = env::var("TREND_WINDOW_DAYS") {
            if let Ok(value) = window.parse::<u32>() {
                self.trend.window_days = value;
            }
        }
        if let Ok(publisher_id) = env::var("ADSENSE_PUBLISHER_ID") {
            if !publisher_id.trim().is_empty() {
                self.ads.publisher_id = Some(publisher_id.trim().to_string());
            }
        }
        if let Ok(slot) = env::var("ADSENSE_AD_SLOT") {
            if !slot.trim().is_empty() {
                self.ads.default_ad_slot = Some(slot.trim().to_string());
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ANALYTICS_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analytics.toml")))
}
