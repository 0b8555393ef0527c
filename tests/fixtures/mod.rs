// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for metakube-validation
//!
//! Provides an in-memory [`ReferenceClient`] with fixed reference data and
//! builders for cluster resource configurations.
//!
//! # Design Principles
//! - All reference data is deterministic
//! - The fake client records every call so tests can assert on remote traffic
//! - Failures are configured per query, never random

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use metakube_validation::client::{
    Cluster, ClusterSpec, MasterVersion, OpenstackNetwork, OpenstackParams, OpenstackSubnet,
    ReferenceClient,
};
use metakube_validation::{ClientError, ClientResult, ResourceData};

pub const PROJECT_ID: &str = "proj-7x2k";
pub const CLUSTER_ID: &str = "cl-4hq9z";
pub const DC_NAME: &str = "syseleven-dbl1";

/// In-memory reference client
pub struct FakeReferenceClient {
    master_versions: ClientResult<Vec<MasterVersion>>,
    upgrades: ClientResult<Vec<MasterVersion>>,
    networks: ClientResult<Vec<OpenstackNetwork>>,
    subnets: HashMap<String, ClientResult<Vec<OpenstackSubnet>>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
    params: Mutex<Vec<OpenstackParams>>,
}

impl Default for FakeReferenceClient {
    fn default() -> Self {
        Self {
            master_versions: Ok(versions(&["1.25.0", "1.26.0"])),
            upgrades: Ok(Vec::new()),
            networks: Ok(Vec::new()),
            subnets: HashMap::new(),
            delay: None,
            calls: Mutex::new(Vec::new()),
            params: Mutex::new(Vec::new()),
        }
    }
}

impl FakeReferenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_master_versions(mut self, list: &[&str]) -> Self {
        self.master_versions = Ok(versions(list));
        self
    }

    pub fn with_master_versions_error(mut self, err: ClientError) -> Self {
        self.master_versions = Err(err);
        self
    }

    pub fn with_upgrades(mut self, list: &[&str]) -> Self {
        self.upgrades = Ok(versions(list));
        self
    }

    pub fn with_upgrades_error(mut self, err: ClientError) -> Self {
        self.upgrades = Err(err);
        self
    }

    pub fn with_networks(mut self, networks: Vec<OpenstackNetwork>) -> Self {
        self.networks = Ok(networks);
        self
    }

    pub fn with_networks_error(mut self, err: ClientError) -> Self {
        self.networks = Err(err);
        self
    }

    pub fn with_subnets(mut self, network_id: &str, subnets: Vec<OpenstackSubnet>) -> Self {
        self.subnets.insert(network_id.to_string(), Ok(subnets));
        self
    }

    pub fn with_subnets_error(mut self, network_id: &str, err: ClientError) -> Self {
        self.subnets.insert(network_id.to_string(), Err(err));
        self
    }

    /// Delay every response
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Names of the queries issued so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, query: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == query).count()
    }

    /// OpenStack parameters seen by network and subnet queries
    pub fn seen_params(&self) -> Vec<OpenstackParams> {
        self.params.lock().unwrap().clone()
    }

    async fn record(&self, query: String) {
        self.calls.lock().unwrap().push(query);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ReferenceClient for FakeReferenceClient {
    async fn list_master_versions(&self) -> ClientResult<Vec<MasterVersion>> {
        self.record("list_master_versions".to_string()).await;
        self.master_versions.clone()
    }

    async fn list_cluster_upgrades(
        &self,
        project_id: &str,
        cluster_id: &str,
    ) -> ClientResult<Vec<MasterVersion>> {
        self.record(format!("list_cluster_upgrades:{}/{}", project_id, cluster_id))
            .await;
        self.upgrades.clone()
    }

    async fn list_networks(&self, params: &OpenstackParams) -> ClientResult<Vec<OpenstackNetwork>> {
        self.params.lock().unwrap().push(params.clone());
        self.record("list_networks".to_string()).await;
        self.networks.clone()
    }

    async fn list_subnets(
        &self,
        params: &OpenstackParams,
        network_id: &str,
    ) -> ClientResult<Vec<OpenstackSubnet>> {
        self.params.lock().unwrap().push(params.clone());
        self.record(format!("list_subnets:{}", network_id)).await;
        self.subnets
            .get(network_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn versions(list: &[&str]) -> Vec<MasterVersion> {
    list.iter()
        .map(|v| MasterVersion {
            version: v.to_string(),
            default: false,
        })
        .collect()
}

pub fn network(id: &str, name: &str, external: bool) -> OpenstackNetwork {
    OpenstackNetwork {
        id: id.to_string(),
        name: name.to_string(),
        external,
    }
}

pub fn subnet(id: &str, name: &str) -> OpenstackSubnet {
    OpenstackSubnet {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn existing_cluster(version: &str) -> Cluster {
    Cluster {
        id: CLUSTER_ID.to_string(),
        name: "prod".to_string(),
        spec: ClusterSpec {
            version: version.to_string(),
        },
    }
}

/// Cluster resource without any cloud block
pub fn bare_resource(version: &str) -> ResourceData {
    ResourceData::new(json!({
        "dc_name": DC_NAME,
        "spec": [{ "version": version }]
    }))
}

/// Cluster resource with the given OpenStack block
pub fn openstack_resource(version: &str, openstack: Value) -> ResourceData {
    ResourceData::new(json!({
        "dc_name": DC_NAME,
        "spec": [{
            "version": version,
            "cloud": [{ "openstack": [openstack] }]
        }]
    }))
}

/// Complete basic-auth credentials merged with extra OpenStack fields
pub fn basic_auth_block(extra: Value) -> Value {
    let mut block = json!({
        "username": "alice",
        "password": "s3cret",
        "tenant": "team-a"
    });
    if let (Value::Object(block), Value::Object(extra)) = (&mut block, extra) {
        block.extend(extra);
    }
    block
}
