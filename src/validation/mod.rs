// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster Specification Validation
//!
//! Cross-checks a cluster resource's configuration against the MetaKube
//! control plane before the resource is created or updated.
//!
//! # Architecture
//!
//! ```text
//! ResourceData
//!     ↓
//! ConfigSnapshot (credential extractor)
//!     ↓
//! Rules → OpenstackLookup → ReferenceClient
//!     ↓
//! Diagnostics (in rule order)
//! ```
//!
//! # Rule Order
//!
//! 1. Version existence (always)
//! 2. Floating IP pool existence
//! 3. Network existence
//! 4. Credential exclusivity/completeness
//! 5. Subnet existence
//!
//! Rules 2-5 only run when an OpenStack cloud block is configured. A failing
//! rule never suppresses a later one.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use metakube_validation::client::{MetakubeClient, MetakubeConfig, RequestContext};
//! use metakube_validation::{ClusterValidator, ResourceData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MetakubeClient::new(MetakubeConfig::from_env()?)?;
//!     let validator = ClusterValidator::new(Arc::new(client));
//!
//!     let data = ResourceData::new(serde_json::json!({
//!         "spec": [{ "version": "1.26.0" }]
//!     }));
//!     for diag in validator.validate_cluster_fields(&RequestContext::background(), &data).await {
//!         eprintln!("{}", diag);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod lookup;
pub mod rules;
pub mod snapshot;

use std::sync::Arc;
use tracing::{debug, info};

use crate::client::{Cluster, ReferenceClient, RequestContext};
use crate::diagnostics::Diagnostics;
use crate::resource_data::ResourceData;

pub use lookup::{find_network, find_subnet, LookupError, OpenstackLookup};
pub use rules::NetworkRole;
pub use snapshot::{fields, ConfigSnapshot, DEFAULT_DOMAIN};

/// Runs the cluster validation rules against one reference client
#[derive(Clone)]
pub struct ClusterValidator {
    client: Arc<dyn ReferenceClient>,
}

impl ClusterValidator {
    pub fn new(client: Arc<dyn ReferenceClient>) -> Self {
        Self { client }
    }

    /// Validate the cluster fields of a resource being created or updated
    pub async fn validate_cluster_fields(
        &self,
        ctx: &RequestContext,
        data: &ResourceData,
    ) -> Diagnostics {
        let version = data.get_str(fields::VERSION).unwrap_or_default();
        let mut diagnostics =
            rules::validate_version_existence(self.client.as_ref(), ctx, version).await;

        if !data.has_block(fields::OPENSTACK) {
            debug!("No OpenStack cloud block configured, skipping OpenStack rules");
            return diagnostics;
        }

        let snapshot = ConfigSnapshot::from_resource(data);
        let lookup = OpenstackLookup::new(self.client.as_ref(), ctx, snapshot.openstack_params());

        diagnostics.extend(rules::validate_floating_ip_pool(&lookup, &snapshot).await);
        diagnostics.extend(rules::validate_network(&lookup, &snapshot).await);
        diagnostics.extend(rules::validate_access_credentials(&snapshot));
        diagnostics.extend(rules::validate_subnet_exists_if_set(&lookup, &snapshot).await);

        info!(
            "Validated cluster fields: {} diagnostic(s)",
            diagnostics.len()
        );
        diagnostics
    }

    /// Validate that an existing cluster may be upgraded to `new_version`
    pub async fn validate_version_upgrade(
        &self,
        ctx: &RequestContext,
        project_id: &str,
        new_version: &str,
        cluster: &Cluster,
    ) -> Diagnostics {
        rules::validate_version_upgrade(self.client.as_ref(), ctx, project_id, new_version, cluster)
            .await
    }

    /// Validate an update of an existing cluster
    ///
    /// Runs the field rules and, when the configured version differs from the
    /// running one, the upgrade rule.
    pub async fn validate_update(
        &self,
        ctx: &RequestContext,
        data: &ResourceData,
        project_id: &str,
        existing: &Cluster,
    ) -> Diagnostics {
        let mut diagnostics = self.validate_cluster_fields(ctx, data).await;

        match data.get_str(fields::VERSION) {
            Some(version) if version != existing.spec.version => {
                debug!(
                    "Cluster {} version changes {} -> {}",
                    existing.id, existing.spec.version, version
                );
                diagnostics.extend(
                    self.validate_version_upgrade(ctx, project_id, version, existing)
                        .await,
                );
            }
            _ => {}
        }

        diagnostics
    }
}
