use tracing::{debug, warn};

use crate::config::ProviderSettings;
use crate::error::{Error, Result};
use crate::model::Location;

use super::http::HttpFetcher;
use super::{WeatherDataProvider, WeatherResponse};

pub const DEFAULT_AQICN_BASE_URL: &str = "https://api.aqicn.org/v2";
const PROVIDER: &str = "aqicn";

/// Weather and air quality at the monitoring station nearest to a stop.
#[derive(Debug, Clone)]
pub struct AqicnWeatherProvider {
    token: String,
    base_url: String,
    http: HttpFetcher,
}

impl AqicnWeatherProvider {
    pub fn new(token: impl Into<String>, settings: &ProviderSettings) -> Result<Self> {
        Ok(Self {
            token: token.into(),
            base_url: DEFAULT_AQICN_BASE_URL.to_string(),
            http: HttpFetcher::new(settings)?,
        })
    }

    /// Point the provider at a different API root (trailing slashes are ignored).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl WeatherDataProvider for AqicnWeatherProvider {
    fn get_conditions(&self, location: &Location) -> Result<WeatherResponse> {
        let url = format!("{}/nearest", self.base_url);
        let query = [
            ("token", self.token.clone()),
            ("lat", location.lat.to_string()),
            ("lon", location.lon.to_string()),
        ];

        match self.http.get_json("aqicn nearest", &url, &query) {
            Ok(payload) => {
                let response = WeatherResponse::from_payload(PROVIDER, &payload)?;
                debug!(at = %location.address, "received conditions from AQICN");
                Ok(response)
            }
            Err(err) if err.is_unavailable() => {
                warn!(
                    at = %location.address,
                    error = %err,
                    "Weather API unavailable; using simulated conditions"
                );
                Ok(WeatherResponse::fallback())
            }
            Err(err) => Err(Error::data_format(PROVIDER, err.to_string())),
        }
    }
}
