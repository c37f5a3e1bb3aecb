//! HTTP adapter for the vehicle image lookup service.

use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::{debug, warn};

use super::dto::SearchEnvelope;
use crate::domain::errors::LookupError;
use crate::domain::ports::{LookupHit, VehicleLookupPort};
use crate::infrastructure::config::ResolverConfig;

/// HTTP client for the externally hosted vehicle image service.
///
/// One `GET {base}/search?name={query}` per call, bounded by the configured
/// request timeout. Connectivity failures and 5xx answers surface as
/// [`LookupError::Transport`]; a 4xx or a well-formed empty payload is a
/// clean [`LookupError::NotFound`].
pub struct HttpVehicleLookup {
    client: Client,
    base_url: String,
}

impl HttpVehicleLookup {
    /// Creates a client from the resolver configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ResolverConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| LookupError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn transport_from(e: &reqwest::Error) -> LookupError {
        if e.is_timeout() {
            LookupError::transport("request timed out")
        } else if e.is_connect() {
            LookupError::transport("failed to connect to lookup service")
        } else {
            LookupError::transport(e.to_string())
        }
    }

    fn hit_from_envelope(envelope: SearchEnvelope, query: &str) -> Result<LookupHit, LookupError> {
        let data = match envelope.data {
            Some(data) if envelope.success => data,
            _ => return Err(LookupError::not_found(query)),
        };

        match data.image_url {
            Some(image_url) if !image_url.trim().is_empty() => Ok(LookupHit {
                image_url,
                normalized_name: data.normalized_name,
                vehicle_type: data.vehicle_type,
                year: data.year,
                alternate_images: data.all_images,
                found_source: data.source,
            }),
            _ => Err(LookupError::not_found(query)),
        }
    }

    fn health_url(&self) -> String {
        // The health endpoint lives next to the API root, not under it
        let root = self.base_url.trim_end_matches("/api/vehicle-images");
        format!("{}/health", root.trim_end_matches('/'))
    }
}

#[async_trait]
impl VehicleLookupPort for HttpVehicleLookup {
    async fn search(&self, query: &str) -> Result<LookupHit, LookupError> {
        let url = format!("{}/search", self.base_url);

        debug!(query, "Searching vehicle image");

        let response = self
            .client
            .get(&url)
            .query(&[("name", query)])
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Lookup service request failed");
                Self::transport_from(&e)
            })?;

        let status = response.status();

        if status.is_client_error() {
            debug!(%status, query, "Lookup service reported no match");
            return Err(LookupError::not_found(query));
        }

        if !status.is_success() {
            warn!(%status, "Lookup service returned a failure status");
            return Err(LookupError::transport(format!(
                "lookup service returned {status}"
            )));
        }

        let envelope: SearchEnvelope = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse lookup response");
            LookupError::transport(format!("failed to parse response: {e}"))
        })?;

        let hit = Self::hit_from_envelope(envelope, query)?;

        debug!(
            query,
            source = hit.found_source.as_deref().unwrap_or("unknown"),
            "Vehicle image found"
        );

        Ok(hit)
    }

    async fn health_check(&self) -> Result<(), LookupError> {
        let url = self.health_url();

        debug!("Checking lookup service health");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::transport_from(&e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(LookupError::transport(format!(
                "lookup service returned {}",
                response.status()
            )))
        }
    }
}
