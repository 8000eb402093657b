//! Minimal Supabase client.
//!
//! The backend only needs to know whether the data store is configured and
//! reachable; it does not read or write rows.

use anyhow::anyhow;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;
use std::time::Duration;

#[derive(Clone)]
pub struct SupabaseClient {
    base_url: String,
    service_key: Secret<String>,
    client: Client,
}

impl SupabaseClient {
    pub fn new(url: &str, service_key: Secret<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| {
                AppError::ConfigError(anyhow!("Failed to create Supabase client: {}", e))
            })?;

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            service_key,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probes the PostgREST root with the service key.
    pub async fn health_check(&self) -> Result<(), AppError> {
        let key = self.service_key.expose_secret();
        let response = self
            .client
            .get(format!("{}/rest/v1/", self.base_url))
            .header("apikey", key)
            .bearer_auth(key)
            .send()
            .await
            .map_err(|e| AppError::InternalError(anyhow!("Supabase unreachable: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::InternalError(anyhow!(
                "Supabase health check failed: {}",
                response.status()
            )))
        }
    }
}
