// Copyright (c) 2025 - Cowboy AI, Inc.
//! Lookup helpers over OpenStack reference data
//!
//! An [`OpenstackLookup`] lives for one validation pass. The network list is
//! fetched at most once per pass when it succeeds; failed fetches are not
//! remembered, so a later rule asks again.

use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::client::{
    OpenstackNetwork, OpenstackParams, OpenstackSubnet, ReferenceClient, RequestContext,
};
use crate::errors::ClientError;

/// Failure to resolve an OpenStack entity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("find network instance: {0}")]
    Networks(ClientError),

    #[error("network `{0}` not found")]
    NetworkNotFound(String),

    #[error("list network subnets: {0}")]
    Subnets(ClientError),
}

/// First network with the given name and external flag
pub fn find_network<'a>(
    networks: &'a [OpenstackNetwork],
    name: &str,
    external: bool,
) -> Option<&'a OpenstackNetwork> {
    networks
        .iter()
        .find(|network| network.name == name && network.external == external)
}

/// Subnet with the given id
pub fn find_subnet<'a>(subnets: &'a [OpenstackSubnet], id: &str) -> Option<&'a OpenstackSubnet> {
    subnets.iter().find(|subnet| subnet.id == id)
}

/// Per-pass access to OpenStack networks and subnets
pub struct OpenstackLookup<'a> {
    client: &'a dyn ReferenceClient,
    ctx: &'a RequestContext,
    params: OpenstackParams,
    networks: OnceCell<Vec<OpenstackNetwork>>,
}

impl<'a> OpenstackLookup<'a> {
    pub fn new(
        client: &'a dyn ReferenceClient,
        ctx: &'a RequestContext,
        params: OpenstackParams,
    ) -> Self {
        Self {
            client,
            ctx,
            params,
            networks: OnceCell::new(),
        }
    }

    /// All networks visible with the pass's credentials
    pub async fn networks(&self) -> Result<&[OpenstackNetwork], LookupError> {
        let networks = self
            .networks
            .get_or_try_init(|| async {
                let networks = self
                    .ctx
                    .run("list networks", self.client.list_networks(&self.params))
                    .await?;
                debug!("Fetched {} OpenStack networks", networks.len());
                Ok::<_, ClientError>(networks)
            })
            .await
            .map_err(LookupError::Networks)?;
        Ok(networks.as_slice())
    }

    /// Networks already fetched during this pass, if any
    pub fn fetched_networks(&self) -> Option<&[OpenstackNetwork]> {
        self.networks.get().map(Vec::as_slice)
    }

    /// Resolve a network by name and external flag
    pub async fn network(
        &self,
        name: &str,
        external: bool,
    ) -> Result<&OpenstackNetwork, LookupError> {
        let networks = self.networks().await?;
        find_network(networks, name, external)
            .ok_or_else(|| LookupError::NetworkNotFound(name.to_string()))
    }

    /// Subnets of a network; never memoized
    pub async fn subnets(&self, network_id: &str) -> Result<Vec<OpenstackSubnet>, LookupError> {
        let subnets = self
            .ctx
            .run(
                "list subnets",
                self.client.list_subnets(&self.params, network_id),
            )
            .await
            .map_err(LookupError::Subnets)?;
        debug!(
            "Fetched {} OpenStack subnets of network {}",
            subnets.len(),
            network_id
        );
        Ok(subnets)
    }
}
