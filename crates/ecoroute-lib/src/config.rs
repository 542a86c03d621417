//! Provider configuration sourced from the environment.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::provider::{
    AqicnWeatherProvider, RetryPolicy, TomTomTrafficProvider, DEFAULT_AQICN_BASE_URL,
    DEFAULT_TOMTOM_BASE_URL,
};

pub const TOMTOM_API_KEY_ENV: &str = "TOMTOM_API_KEY";
pub const AQICN_API_KEY_ENV: &str = "AQICN_API_KEY";
pub const TOMTOM_BASE_URL_ENV: &str = "ECOROUTE_TOMTOM_BASE_URL";
pub const AQICN_BASE_URL_ENV: &str = "ECOROUTE_AQICN_BASE_URL";

/// HTTP behaviour shared by the live providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    /// Honour `HTTP_PROXY` / `HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            retry: RetryPolicy::default(),
            use_system_proxy: true,
        }
    }
}

/// Everything needed to construct the live providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tomtom_api_key: String,
    pub aqicn_api_key: String,
    pub tomtom_base_url: String,
    pub aqicn_base_url: String,
    pub settings: ProviderSettings,
}

impl Config {
    /// Read credentials and endpoint overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`] but reads variables through `lookup`, so
    /// tests do not have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |variable: &'static str| {
            lookup(variable)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(Error::MissingCredential { variable })
        };
        let optional = |variable: &str, default: &str| {
            lookup(variable)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            tomtom_api_key: required(TOMTOM_API_KEY_ENV)?,
            aqicn_api_key: required(AQICN_API_KEY_ENV)?,
            tomtom_base_url: optional(TOMTOM_BASE_URL_ENV, DEFAULT_TOMTOM_BASE_URL),
            aqicn_base_url: optional(AQICN_BASE_URL_ENV, DEFAULT_AQICN_BASE_URL),
            settings: ProviderSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: ProviderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn traffic_provider(&self) -> Result<TomTomTrafficProvider> {
        Ok(
            TomTomTrafficProvider::new(self.tomtom_api_key.clone(), &self.settings)?
                .with_base_url(self.tomtom_base_url.clone()),
        )
    }

    pub fn weather_provider(&self) -> Result<AqicnWeatherProvider> {
        Ok(
            AqicnWeatherProvider::new(self.aqicn_api_key.clone(), &self.settings)?
                .with_base_url(self.aqicn_base_url.clone()),
        )
    }
}
