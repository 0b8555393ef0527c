// Copyright (c) 2025 - Cowboy AI, Inc.

//! MetaKube REST client
//!
//! Implements [`ReferenceClient`] against the MetaKube API:
//!
//! ```text
//! list_master_versions   = GET /api/v1/upgrades/cluster
//! list_cluster_upgrades  = GET /api/v2/projects/{project}/clusters/{cluster}/upgrades
//! list_networks          = GET /api/v1/providers/openstack/networks
//! list_subnets           = GET /api/v1/providers/openstack/subnets?network_id={id}
//! ```
//!
//! OpenStack context is passed as request headers (see
//! [`OpenstackParams::headers`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use metakube_validation::client::{MetakubeClient, MetakubeConfig, ReferenceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MetakubeConfig {
//!         base_url: "https://metakube.syseleven.de".to_string(),
//!         api_token: "your-token-here".to_string(),
//!         timeout_secs: 30,
//!     };
//!
//!     let client = MetakubeClient::new(config)?;
//!     for v in client.list_master_versions().await? {
//!         println!("{}", v.version);
//!     }
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{MasterVersion, OpenstackNetwork, OpenstackParams, OpenstackSubnet, ReferenceClient};
use crate::errors::{ClientError, ClientResult};

/// Configuration for the MetaKube API connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetakubeConfig {
    /// MetaKube base URL (e.g., "https://metakube.syseleven.de")
    pub base_url: String,

    /// Bearer token for authentication
    pub api_token: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for MetakubeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://metakube.syseleven.de".to_string(),
            api_token: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl MetakubeConfig {
    /// Load configuration from `METAKUBE_HOST`, `METAKUBE_TOKEN` and
    /// `METAKUBE_TIMEOUT_SECS`
    pub fn from_env() -> ClientResult<Self> {
        let defaults = Self::default();

        let base_url = std::env::var("METAKUBE_HOST").unwrap_or(defaults.base_url);
        let api_token = std::env::var("METAKUBE_TOKEN")
            .map_err(|_| ClientError::Configuration("METAKUBE_TOKEN not set".to_string()))?;
        let timeout_secs = match std::env::var("METAKUBE_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                ClientError::Configuration(format!("invalid METAKUBE_TIMEOUT_SECS: {}", raw))
            })?,
            Err(_) => defaults.timeout_secs,
        };

        Ok(Self {
            base_url,
            api_token,
            timeout_secs,
        })
    }
}

/// [`ReferenceClient`] backed by the MetaKube REST API
pub struct MetakubeClient {
    config: MetakubeConfig,
    client: Client,
}

impl MetakubeClient {
    pub fn new(config: MetakubeConfig) -> ClientResult<Self> {
        info!("Connecting to MetaKube at {}", config.base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {}", config.api_token)
                        .parse()
                        .map_err(|e| {
                            ClientError::Configuration(format!("Invalid API token: {}", e))
                        })?,
                );
                headers
            })
            .build()
            .map_err(|e| {
                ClientError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn with_openstack_params(request: RequestBuilder, params: &OpenstackParams) -> RequestBuilder {
        params
            .headers()
            .into_iter()
            .fold(request, |request, (name, value)| request.header(name, value))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::from_response(status.as_u16(), &body))
        }
    }
}

#[async_trait]
impl ReferenceClient for MetakubeClient {
    async fn list_master_versions(&self) -> ClientResult<Vec<MasterVersion>> {
        let url = self.url("/api/v1/upgrades/cluster");
        debug!("Listing master versions: {}", url);
        self.fetch(self.client.get(&url)).await
    }

    async fn list_cluster_upgrades(
        &self,
        project_id: &str,
        cluster_id: &str,
    ) -> ClientResult<Vec<MasterVersion>> {
        let url = self.url(&format!(
            "/api/v2/projects/{}/clusters/{}/upgrades",
            urlencoding::encode(project_id),
            urlencoding::encode(cluster_id)
        ));
        debug!("Listing cluster upgrades: {}", url);
        self.fetch(self.client.get(&url)).await
    }

    async fn list_networks(&self, params: &OpenstackParams) -> ClientResult<Vec<OpenstackNetwork>> {
        let url = self.url("/api/v1/providers/openstack/networks");
        debug!("Listing OpenStack networks: {}", url);
        let request = Self::with_openstack_params(self.client.get(&url), params);
        self.fetch(request).await
    }

    async fn list_subnets(
        &self,
        params: &OpenstackParams,
        network_id: &str,
    ) -> ClientResult<Vec<OpenstackSubnet>> {
        let url = self.url("/api/v1/providers/openstack/subnets");
        debug!("Listing OpenStack subnets of {}: {}", network_id, url);
        let request = Self::with_openstack_params(
            self.client.get(&url).query(&[("network_id", network_id)]),
            params,
        );
        self.fetch(request).await
    }
}
