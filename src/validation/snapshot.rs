// Copyright (c) 2025 - Cowboy AI, Inc.
//! Credential Extractor
//!
//! Shapes the raw resource configuration into an immutable [`ConfigSnapshot`].
//! No validation happens here.

use crate::client::OpenstackParams;
use crate::resource_data::ResourceData;

/// Domain used when the configuration does not name one
pub const DEFAULT_DOMAIN: &str = "Default";

/// Configuration paths read by the validation rules
pub mod fields {
    pub const DC_NAME: &str = "dc_name";
    pub const VERSION: &str = "spec.0.version";
    pub const OPENSTACK: &str = "spec.0.cloud.0.openstack.0";
    pub const DOMAIN: &str = "spec.0.cloud.0.openstack.0.domain";
    pub const USERNAME: &str = "spec.0.cloud.0.openstack.0.username";
    pub const PASSWORD: &str = "spec.0.cloud.0.openstack.0.password";
    pub const TENANT: &str = "spec.0.cloud.0.openstack.0.tenant";
    pub const APPLICATION_CREDENTIALS_ID: &str =
        "spec.0.cloud.0.openstack.0.application_credentials_id";
    pub const APPLICATION_CREDENTIALS_SECRET: &str =
        "spec.0.cloud.0.openstack.0.application_credentials_secret";
    pub const NETWORK: &str = "spec.0.cloud.0.openstack.0.network";
    pub const SUBNET_ID: &str = "spec.0.cloud.0.openstack.0.subnet_id";
    pub const FLOATING_IP_POOL: &str = "spec.0.cloud.0.openstack.0.floating_ip_pool";
}

/// Relevant subset of the cluster configuration at validation time
///
/// Absent and empty values both become `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    pub dc_name: Option<String>,
    pub domain: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub tenant: Option<String>,
    pub application_credentials_id: Option<String>,
    pub application_credentials_secret: Option<String>,
    pub network: Option<String>,
    pub subnet_id: Option<String>,
    pub floating_ip_pool: Option<String>,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            dc_name: None,
            domain: DEFAULT_DOMAIN.to_string(),
            username: None,
            password: None,
            tenant: None,
            application_credentials_id: None,
            application_credentials_secret: None,
            network: None,
            subnet_id: None,
            floating_ip_pool: None,
        }
    }
}

impl ConfigSnapshot {
    pub fn from_resource(data: &ResourceData) -> Self {
        let text = |path: &str| data.get_str(path).map(str::to_string);

        Self {
            dc_name: text(fields::DC_NAME),
            domain: text(fields::DOMAIN).unwrap_or_else(|| DEFAULT_DOMAIN.to_string()),
            username: text(fields::USERNAME),
            password: text(fields::PASSWORD),
            tenant: text(fields::TENANT),
            application_credentials_id: text(fields::APPLICATION_CREDENTIALS_ID),
            application_credentials_secret: text(fields::APPLICATION_CREDENTIALS_SECRET),
            network: text(fields::NETWORK),
            subnet_id: text(fields::SUBNET_ID),
            floating_ip_pool: text(fields::FLOATING_IP_POOL),
        }
    }

    /// Parameters for OpenStack reference queries
    pub fn openstack_params(&self) -> OpenstackParams {
        OpenstackParams {
            datacenter_name: self.dc_name.clone(),
            domain: Some(self.domain.clone()),
            username: self.username.clone(),
            password: self.password.clone(),
            tenant: self.tenant.clone(),
            application_credential_id: self.application_credentials_id.clone(),
            application_credential_secret: self.application_credentials_secret.clone(),
        }
    }
}
