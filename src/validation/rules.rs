// Copyright (c) 2025 - Cowboy AI, Inc.
//! Validation rules
//!
//! Each rule is independent and returns zero or more diagnostics. Remote
//! failures become a single diagnostic on the field the rule checks; nothing
//! is retried.

use tracing::{debug, warn};

use super::lookup::{LookupError, OpenstackLookup};
use super::snapshot::{fields, ConfigSnapshot};
use crate::client::{Cluster, ReferenceClient, RequestContext};
use crate::diagnostics::{format_list, AttributePath, Diagnostic, Diagnostics};

/// Which OpenStack network field a network rule checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkRole {
    /// External network used for floating IPs
    FloatingIpPool,
    /// Internal network the nodes attach to
    Network,
}

impl NetworkRole {
    pub fn external(self) -> bool {
        matches!(self, NetworkRole::FloatingIpPool)
    }

    pub fn field(self) -> &'static str {
        match self {
            NetworkRole::FloatingIpPool => fields::FLOATING_IP_POOL,
            NetworkRole::Network => fields::NETWORK,
        }
    }

    fn found_label(self) -> &'static str {
        match self {
            NetworkRole::FloatingIpPool => "floating IP pools",
            NetworkRole::Network => "networks",
        }
    }
}

/// The requested Kubernetes version must be offered by the control plane
pub async fn validate_version_existence(
    client: &dyn ReferenceClient,
    ctx: &RequestContext,
    version: &str,
) -> Diagnostics {
    let path = AttributePath::parse(fields::VERSION);

    let versions = match ctx
        .run("list master versions", client.list_master_versions())
        .await
    {
        Ok(versions) => versions,
        Err(err) => return vec![Diagnostic::error(err.to_string(), path)],
    };

    if versions.iter().any(|v| v.version == version) {
        return Vec::new();
    }

    let available: Vec<&str> = versions.iter().map(|v| v.version.as_str()).collect();
    vec![
        Diagnostic::error(format!("unknown version {}", version), path).with_detail(format!(
            "Please select one of available versions: {}",
            format_list(&available)
        )),
    ]
}

/// An existing cluster may only move to one of its offered upgrades
pub async fn validate_version_upgrade(
    client: &dyn ReferenceClient,
    ctx: &RequestContext,
    project_id: &str,
    new_version: &str,
    cluster: &Cluster,
) -> Diagnostics {
    let path = AttributePath::parse(fields::VERSION);

    let upgrades = match ctx
        .run(
            "list cluster upgrades",
            client.list_cluster_upgrades(project_id, &cluster.id),
        )
        .await
    {
        Ok(upgrades) => upgrades,
        Err(err) => return vec![Diagnostic::error(err.to_string(), path)],
    };

    if upgrades.iter().any(|v| v.version == new_version) {
        return Vec::new();
    }

    let available: Vec<&str> = upgrades.iter().map(|v| v.version.as_str()).collect();
    vec![Diagnostic::error(
        format!(
            "not allowed upgrade {}->{}",
            cluster.spec.version, new_version
        ),
        path,
    )
    .with_detail(format!(
        "Please select one of available upgrades: {}",
        format_list(&available)
    ))]
}

/// A set network field must name an existing network of the right kind
pub async fn validate_network_exists_if_set(
    lookup: &OpenstackLookup<'_>,
    value: Option<&str>,
    role: NetworkRole,
) -> Diagnostics {
    let Some(name) = value else {
        return Vec::new();
    };

    let err = match lookup.network(name, role.external()).await {
        Ok(network) => {
            debug!("Resolved {} to network {}", name, network.id);
            return Vec::new();
        }
        Err(err) => err,
    };

    let mut diagnostic = Diagnostic::error(
        format!("invalid value: {}", err),
        AttributePath::parse(role.field()),
    );

    if let LookupError::NetworkNotFound(_) = err {
        let candidates: Vec<&str> = lookup
            .fetched_networks()
            .unwrap_or_default()
            .iter()
            .filter(|network| network.external == role.external())
            .map(|network| network.name.as_str())
            .collect();
        if !candidates.is_empty() {
            diagnostic = diagnostic.with_detail(format!(
                "We found following {}: {}",
                role.found_label(),
                format_list(&candidates)
            ));
        }
    }

    vec![diagnostic]
}

/// Floating IP pool must be an existing external network
pub async fn validate_floating_ip_pool(
    lookup: &OpenstackLookup<'_>,
    snapshot: &ConfigSnapshot,
) -> Diagnostics {
    validate_network_exists_if_set(
        lookup,
        snapshot.floating_ip_pool.as_deref(),
        NetworkRole::FloatingIpPool,
    )
    .await
}

/// Network must be an existing internal network
pub async fn validate_network(
    lookup: &OpenstackLookup<'_>,
    snapshot: &ConfigSnapshot,
) -> Diagnostics {
    validate_network_exists_if_set(lookup, snapshot.network.as_deref(), NetworkRole::Network).await
}

/// Basic and application credentials are mutually exclusive and each must
/// be complete
pub fn validate_access_credentials(snapshot: &ConfigSnapshot) -> Diagnostics {
    let path = || AttributePath::parse(fields::OPENSTACK);

    let username = snapshot.username.is_some();
    let password = snapshot.password.is_some();
    let tenant = snapshot.tenant.is_some();
    let application_credentials_id = snapshot.application_credentials_id.is_some();
    let application_credentials_secret = snapshot.application_credentials_secret.is_some();

    let any_basic = username || password || tenant;
    let any_application = application_credentials_id || application_credentials_secret;

    if any_basic && any_application {
        return vec![Diagnostic::error(
            "Please use either username, password, tenant or application_credentials_id, application_credentials_secret, not both",
            path(),
        )];
    }

    if any_basic && !(username && password && tenant) {
        let missing = missing_fields(&[
            (username, "username"),
            (password, "password"),
            (tenant, "tenant"),
        ]);
        return vec![Diagnostic::error(
            "Please set all username, password, tenant fields or use application_credentials_id, application_credentials_secret fields",
            path(),
        )
        .with_detail(missing)];
    }

    if any_application && !(application_credentials_id && application_credentials_secret) {
        let missing = missing_fields(&[
            (application_credentials_id, "application_credentials_id"),
            (application_credentials_secret, "application_credentials_secret"),
        ]);
        return vec![Diagnostic::error(
            "Please set both application_credentials_id, application_credentials_secret fields",
            path(),
        )
        .with_detail(missing)];
    }

    Vec::new()
}

fn missing_fields(flags: &[(bool, &str)]) -> String {
    flags
        .iter()
        .filter(|(set, _)| !set)
        .map(|(_, name)| format!("{} not set", name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A set subnet id must belong to the configured network
///
/// Stays silent when the network cannot be resolved (the network rule reports
/// that) and when listing subnets fails.
pub async fn validate_subnet_exists_if_set(
    lookup: &OpenstackLookup<'_>,
    snapshot: &ConfigSnapshot,
) -> Diagnostics {
    let (Some(network_name), Some(subnet_id)) = (&snapshot.network, &snapshot.subnet_id) else {
        return Vec::new();
    };

    let Ok(network) = lookup
        .network(network_name, NetworkRole::Network.external())
        .await
    else {
        return Vec::new();
    };

    let subnets = match lookup.subnets(&network.id).await {
        Ok(subnets) => subnets,
        Err(err) => {
            warn!("Skipping subnet validation for {}: {}", subnet_id, err);
            return Vec::new();
        }
    };

    if subnets.iter().any(|subnet| &subnet.id == subnet_id) {
        return Vec::new();
    }

    let mut diagnostic = Diagnostic::error(
        format!("invalid value: subnet `{}` not found", subnet_id),
        AttributePath::parse(fields::SUBNET_ID),
    );
    if !subnets.is_empty() {
        let pairs: Vec<String> = subnets
            .iter()
            .map(|subnet| format!("{}/{}", subnet.name, subnet.id))
            .collect();
        diagnostic = diagnostic.with_detail(format!(
            "We found following subnets (name/id): {}",
            format_list(&pairs)
        ));
    }

    vec![diagnostic]
}
