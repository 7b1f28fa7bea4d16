//! Allocator configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::units::{APP_CACHE_SHARE_DIVISOR, ORIGIN_DEFAULT_QUOTA, QUOTA_INCREASE_STEP};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotaConfig {
    /// Initial quota handed to an origin that has none yet.
    pub origin_default_quota: i64,

    /// Upper bound on each subsequent quota increase for an origin.
    pub quota_increase_step: i64,

    /// The app cache starts at `global_limit / app_cache_share_divisor`.
    pub app_cache_share_divisor: i64,

    /// Directory on the partition that holds web storage; used for statfs.
    pub storage_path: String,

    /// Directory containing the application cache database file.
    pub app_cache_path: String,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            origin_default_quota: ORIGIN_DEFAULT_QUOTA,
            quota_increase_step: QUOTA_INCREASE_STEP,
            app_cache_share_divisor: APP_CACHE_SHARE_DIVISOR,
            storage_path: "/data/webstorage".to_string(),
            app_cache_path: "/data/webstorage/appcache".to_string(),
        }
    }
}

/// The numeric subset of `QuotaConfig` the allocator reads on every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaPolicy {
    pub origin_default_quota: i64,
    pub quota_increase_step: i64,
    pub app_cache_share_divisor: i64,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            origin_default_quota: ORIGIN_DEFAULT_QUOTA,
            quota_increase_step: QUOTA_INCREASE_STEP,
            app_cache_share_divisor: APP_CACHE_SHARE_DIVISOR,
        }
    }
}

impl QuotaPolicy {
    /// Every knob must be strictly positive.
    pub fn validate(&self) -> Result<()> {
        let knobs = [
            ("origin_default_quota", self.origin_default_quota),
            ("quota_increase_step", self.quota_increase_step),
            ("app_cache_share_divisor", self.app_cache_share_divisor),
        ];
        for (name, value) in knobs {
            if value <= 0 {
                return Err(Error::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl QuotaConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `WEBQUOTA_ORIGIN_DEFAULT_QUOTA`: initial origin quota in bytes
    /// - `WEBQUOTA_QUOTA_INCREASE_STEP`: per-request increase cap in bytes
    /// - `WEBQUOTA_APP_CACHE_SHARE_DIVISOR`: app cache share of the global limit
    /// - `WEBQUOTA_STORAGE_PATH`: web storage directory
    /// - `WEBQUOTA_APP_CACHE_PATH`: app cache directory
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("WEBQUOTA_ORIGIN_DEFAULT_QUOTA") {
            if let Ok(v) = s.parse::<i64>() {
                cfg.origin_default_quota = v;
            }
        }

        if let Ok(s) = std::env::var("WEBQUOTA_QUOTA_INCREASE_STEP") {
            if let Ok(v) = s.parse::<i64>() {
                cfg.quota_increase_step = v;
            }
        }

        if let Ok(s) = std::env::var("WEBQUOTA_APP_CACHE_SHARE_DIVISOR") {
            if let Ok(v) = s.parse::<i64>() {
                cfg.app_cache_share_divisor = v;
            }
        }

        if let Ok(s) = std::env::var("WEBQUOTA_STORAGE_PATH") {
            cfg.storage_path = s;
        }

        if let Ok(s) = std::env::var("WEBQUOTA_APP_CACHE_PATH") {
            cfg.app_cache_path = s;
        }

        cfg
    }

    /// Parse a config document; missing fields keep their defaults.
    pub fn from_json(doc: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(doc)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject knobs that would make the allocator grant nothing or divide by zero.
    pub fn validate(&self) -> Result<()> {
        self.policy().validate()
    }

    /// Produce the policy snapshot handed to the allocator.
    pub fn policy(&self) -> QuotaPolicy {
        QuotaPolicy {
            origin_default_quota: self.origin_default_quota,
            quota_increase_step: self.quota_increase_step,
            app_cache_share_divisor: self.app_cache_share_divisor,
        }
    }
}
