// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for version existence and orchestration
//!
//! Validation is async, so each case is driven with `tokio_test::block_on`.

use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

use metakube_validation::client::RequestContext;
use metakube_validation::ClusterValidator;

use crate::fixtures::{bare_resource, network, openstack_resource, FakeReferenceClient};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn version() -> impl Strategy<Value = String> {
    (1u8..2, 0u8..40, 0u8..10).prop_map(|(major, minor, patch)| format!("{}.{}.{}", major, minor, patch))
}

/// Distinct, non-empty version list small enough to be shown in full
fn available_versions() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(version(), 1..20).prop_map(|set: BTreeSet<String>| set.into_iter().collect())
}

fn client_with(versions: &[String]) -> FakeReferenceClient {
    let list: Vec<&str> = versions.iter().map(String::as_str).collect();
    FakeReferenceClient::new().with_master_versions(&list)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: An unknown version yields one diagnostic listing every version
    #[test]
    fn prop_unknown_version_lists_all(available in available_versions(), requested in version()) {
        prop_assume!(!available.contains(&requested));

        let client = Arc::new(client_with(&available));
        let validator = ClusterValidator::new(client.clone());

        let diags = tokio_test::block_on(
            validator.validate_cluster_fields(&RequestContext::background(), &bare_resource(&requested)),
        );

        prop_assert_eq!(diags.len(), 1);
        prop_assert_eq!(&diags[0].summary, &format!("unknown version {}", requested));
        let detail = diags[0].detail.clone().unwrap_or_default();
        for v in &available {
            prop_assert!(detail.contains(v.as_str()), "{} missing from {}", v, detail);
        }
    }

    /// Property: A known version yields no diagnostic
    #[test]
    fn prop_known_version_passes(available in available_versions(), pick in any::<prop::sample::Index>()) {
        let requested = pick.get(&available).clone();
        let client = Arc::new(client_with(&available));

        let diags = tokio_test::block_on(
            ClusterValidator::new(client.clone())
                .validate_cluster_fields(&RequestContext::background(), &bare_resource(&requested)),
        );

        prop_assert!(diags.is_empty());
    }

    /// Property: Without an OpenStack block no OpenStack query is made
    #[test]
    fn prop_no_openstack_block_no_network_calls(requested in version()) {
        let client = Arc::new(FakeReferenceClient::new().with_networks(vec![network("n1", "prod-net", false)]));

        let diags = tokio_test::block_on(
            ClusterValidator::new(client.clone())
                .validate_cluster_fields(&RequestContext::background(), &bare_resource(&requested)),
        );

        prop_assert!(diags.len() <= 1);
        prop_assert_eq!(client.calls(), vec!["list_master_versions".to_string()]);
    }

    /// Property: Repeated validation of unchanged input is identical
    #[test]
    fn prop_validation_is_idempotent(
        requested in version(),
        network_name in "[a-z]{3,8}",
        username in prop::option::of("[a-z]{1,8}"),
    ) {
        let client = Arc::new(
            FakeReferenceClient::new().with_networks(vec![network("n1", "prod-net", false)]),
        );
        let validator = ClusterValidator::new(client.clone());
        let data = openstack_resource(
            &requested,
            serde_json::json!({ "network": network_name, "username": username }),
        );
        let ctx = RequestContext::background();

        let first = tokio_test::block_on(validator.validate_cluster_fields(&ctx, &data));
        let second = tokio_test::block_on(validator.validate_cluster_fields(&ctx, &data));

        prop_assert_eq!(first, second);
    }
}
