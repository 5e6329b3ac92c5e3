use crate::config::NominatimConfig;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use crate::services::land_check::LandVerifier;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Land verifier backed by Nominatim reverse geocoding.
/// A point is on land when the reverse lookup resolves to a country.
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(config: &NominatimConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build Nominatim client: {}", e)))?;

        Ok(NominatimClient {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn reverse(&self, point: &Coordinates) -> Result<ReverseResponse> {
        let url = format!("{}/reverse", self.base_url);

        tracing::debug!(
            lat = point.lat,
            lng = point.lng,
            "Nominatim reverse lookup: ({:.5}, {:.5})",
            point.lat, point.lng
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", point.lat.to_string()),
                ("lon", point.lng.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::LandCheck("Request timed out".to_string())
                } else {
                    AppError::LandCheck(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::LandCheck(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::LandCheck(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl LandVerifier for NominatimClient {
    async fn is_on_land(&self, point: &Coordinates) -> Result<bool> {
        let reverse = self.reverse(point).await?;
        let on_land = reverse.country().is_some();

        tracing::debug!(
            lat = point.lat,
            lng = point.lng,
            on_land,
            country = reverse.country().unwrap_or("-"),
            "Land check ({:.5}, {:.5}): {}",
            point.lat, point.lng, if on_land { "land" } else { "water" }
        );

        Ok(on_land)
    }
}

// Nominatim API response types

#[derive(Debug, Deserialize)]
pub struct ReverseResponse {
    #[serde(default)]
    pub address: Option<ReverseAddress>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReverseAddress {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl ReverseResponse {
    /// Country name, when the lookup resolved to one
    pub fn country(&self) -> Option<&str> {
        self.address
            .as_ref()
            .and_then(|a| a.country.as_deref())
            .filter(|c| !c.trim().is_empty())
    }
}
