// Copyright (c) 2025 - Cowboy AI, Inc.
//! Remote Reference Client
//!
//! Typed queries against the MetaKube control plane that the validation rules
//! need as reference data.
//!
//! # Architecture
//!
//! ```text
//! ClusterValidator
//!     ↓
//! RequestContext (deadline per call)
//!     ↓
//! ReferenceClient (trait)
//!     ↓
//! MetakubeClient (REST, feature "http") / test doubles
//! ```
//!
//! OpenStack queries carry an immutable [`OpenstackParams`] value instead of a
//! mutable request object, so the same parameters can be reused by every call
//! within one validation pass.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::{ClientError, ClientResult};

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{MetakubeClient, MetakubeConfig};

/// Kubernetes master version offered by the control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterVersion {
    pub version: String,
    #[serde(default)]
    pub default: bool,
}

/// OpenStack network visible to the configured credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenstackNetwork {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external: bool,
}

/// OpenStack subnet of a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenstackSubnet {
    pub id: String,
    pub name: String,
}

/// Existing cluster as returned by the control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub spec: ClusterSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSpec {
    pub version: String,
}

/// Datacenter and credential context for OpenStack queries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpenstackParams {
    pub datacenter_name: Option<String>,
    pub domain: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tenant: Option<String>,
    pub application_credential_id: Option<String>,
    pub application_credential_secret: Option<String>,
}

impl OpenstackParams {
    /// Request headers carrying the parameters, skipping unset ones
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        [
            ("DatacenterName", &self.datacenter_name),
            ("Domain", &self.domain),
            ("Username", &self.username),
            ("Password", &self.password),
            ("Tenant", &self.tenant),
            ("ApplicationCredentialID", &self.application_credential_id),
            ("ApplicationCredentialSecret", &self.application_credential_secret),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

/// Caller-supplied deadline propagated through every remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
}

impl RequestContext {
    /// Context without a deadline
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Await a remote call, aborting it once the deadline passes
    pub async fn run<T, F>(&self, operation: &str, call: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, call)
                .await
                .map_err(|_| ClientError::DeadlineExceeded(operation.to_string()))?,
            None => call.await,
        }
    }
}

/// Typed queries against the MetaKube control plane
#[async_trait]
pub trait ReferenceClient: Send + Sync {
    /// Kubernetes versions a new cluster may be created with
    async fn list_master_versions(&self) -> ClientResult<Vec<MasterVersion>>;

    /// Versions the given cluster may be upgraded to
    async fn list_cluster_upgrades(
        &self,
        project_id: &str,
        cluster_id: &str,
    ) -> ClientResult<Vec<MasterVersion>>;

    /// Networks visible with the given OpenStack context
    async fn list_networks(&self, params: &OpenstackParams) -> ClientResult<Vec<OpenstackNetwork>>;

    /// Subnets of one network
    async fn list_subnets(
        &self,
        params: &OpenstackParams,
        network_id: &str,
    ) -> ClientResult<Vec<OpenstackSubnet>>;
}
