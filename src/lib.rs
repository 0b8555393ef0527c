//! Plan-time validation of MetaKube cluster specifications
//!
//! This crate cross-checks a cluster resource's configuration (Kubernetes
//! version, OpenStack network, subnet, floating IP pool and credentials)
//! against the MetaKube control plane and returns attribute-pathed
//! diagnostics for the host tool's plan/apply cycle.

pub mod client;
pub mod diagnostics;
pub mod errors;
pub mod resource_data;
pub mod validation;

// Re-export commonly used types
pub use client::{ReferenceClient, RequestContext};
pub use diagnostics::{AttributePath, Diagnostic, Diagnostics, Severity};
pub use errors::{ClientError, ClientResult};
pub use resource_data::ResourceData;
pub use validation::{ClusterValidator, ConfigSnapshot};
