// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster Validation CLI
//!
//! Validates a MetaKube cluster resource against the live MetaKube API and
//! prints the resulting diagnostics.
//!
//! Run with: cargo run --bin metakube-validate -- cluster.json
//!
//! The input document:
//!
//! ```json
//! {
//!   "resource": { "dc_name": "...", "spec": [{ "version": "1.26.0", "cloud": [...] }] },
//!   "project_id": "optional, required for updates",
//!   "existing_cluster": { "id": "...", "spec": { "version": "1.25.0" } }
//! }
//! ```
//!
//! Prerequisites:
//! 1. MetaKube API reachable (via METAKUBE_HOST environment variable)
//! 2. MetaKube API token set (via METAKUBE_TOKEN environment variable)

use anyhow::{bail, Context, Result};
use metakube_validation::client::{Cluster, MetakubeClient, MetakubeConfig, RequestContext};
use metakube_validation::diagnostics::has_errors;
use metakube_validation::{ClusterValidator, ResourceData};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Validation input read from disk
#[derive(Debug, Deserialize)]
struct ValidationInput {
    /// Declared resource configuration
    resource: serde_json::Value,
    #[serde(default)]
    project_id: Option<String>,
    /// Running cluster when validating an update
    #[serde(default)]
    existing_cluster: Option<Cluster>,
}

/// Overall deadline for one validation pass
fn validation_timeout() -> Result<Duration> {
    match std::env::var("METAKUBE_VALIDATION_TIMEOUT_SECS") {
        Ok(raw) => Ok(Duration::from_secs(
            raw.parse()
                .with_context(|| format!("invalid METAKUBE_VALIDATION_TIMEOUT_SECS: {}", raw))?,
        )),
        Err(_) => Ok(Duration::from_secs(120)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: metakube-validate <input.json>")?;

    let raw = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    let input: ValidationInput =
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path))?;

    let config = MetakubeConfig::from_env().context("Failed to load MetaKube configuration")?;
    info!("🔌 MetaKube URL: {}", config.base_url);

    let client = MetakubeClient::new(config).context("Failed to create MetaKube client")?;
    let validator = ClusterValidator::new(Arc::new(client));
    let ctx = RequestContext::with_timeout(validation_timeout()?);
    let data = ResourceData::new(input.resource);

    let diagnostics = match (&input.project_id, &input.existing_cluster) {
        (Some(project_id), Some(existing)) => {
            info!("🔄 Validating update of cluster {}", existing.id);
            validator.validate_update(&ctx, &data, project_id, existing).await
        }
        (None, Some(_)) => bail!("existing_cluster requires project_id"),
        _ => {
            info!("📋 Validating cluster fields");
            validator.validate_cluster_fields(&ctx, &data).await
        }
    };

    for diagnostic in &diagnostics {
        println!("{}", diagnostic);
    }

    if has_errors(&diagnostics) {
        warn!("❌ Validation failed with {} diagnostic(s)", diagnostics.len());
        std::process::exit(1);
    }

    info!("✅ Cluster specification is valid");
    Ok(())
}
