use tracing::{debug, warn};

use crate::config::ProviderSettings;
use crate::error::{Error, Result};
use crate::model::Location;

use super::http::HttpFetcher;
use super::{TrafficDataProvider, TrafficResponse};

pub const DEFAULT_TOMTOM_BASE_URL: &str = "https://api.tomtom.com/routing/1";
const PROVIDER: &str = "tomtom";

/// Truck routing with live traffic from the TomTom Routing API.
#[derive(Debug, Clone)]
pub struct TomTomTrafficProvider {
    api_key: String,
    base_url: String,
    http: HttpFetcher,
}

impl TomTomTrafficProvider {
    pub fn new(api_key: impl Into<String>, settings: &ProviderSettings) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_TOMTOM_BASE_URL.to_string(),
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

    fn endpoint(&self, start: &Location, end: &Location) -> String {
        format!(
            "{base}/calculateRoute/{},{}:{},{}/json",
            start.lat,
            start.lon,
            end.lat,
            end.lon,
            base = self.base_url
        )
    }
}

impl TrafficDataProvider for TomTomTrafficProvider {
    fn get_route(&self, start: &Location, end: &Location) -> Result<TrafficResponse> {
        let query = [
            ("key", self.api_key.clone()),
            ("traffic", "true".to_string()),
            ("travelMode", "truck".to_string()),
        ];

        match self
            .http
            .get_json("tomtom calculateRoute", &self.endpoint(start, end), &query)
        {
            Ok(payload) => {
                let response = TrafficResponse::from_payload(PROVIDER, &payload)?;
                debug!(
                    from = %start.address,
                    to = %end.address,
                    meters = response.length_in_meters,
                    "received route from TomTom"
                );
                Ok(response)
            }
            Err(err) if err.is_unavailable() => {
                warn!(
                    from = %start.address,
                    to = %end.address,
                    error = %err,
                    "TomTom API unavailable; using simulated route data"
                );
                Ok(TrafficResponse::fallback())
            }
            Err(err) => Err(Error::data_format(PROVIDER, err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_embeds_both_coordinates() {
        let provider = TomTomTrafficProvider::new("k", &ProviderSettings::default())
            .unwrap()
            .with_base_url("http://localhost:9999/routing/1/");
        let url = provider.endpoint(
            &Location::new(52.52, 13.405, "Berlin"),
            &Location::new(48.1374, 11.5755, "Munich"),
        );
        assert_eq!(
            url,
            "http://localhost:9999/routing/1/calculateRoute/52.52,13.405:48.1374,11.5755/json"
        );
    }
}
