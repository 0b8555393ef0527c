// Copyright (c) 2025 - Cowboy AI, Inc.
//! Attribute-pathed validation diagnostics
//!
//! Diagnostics are plain values handed back to the host tool's plan/validate
//! pipeline. Each one points at the configuration field it concerns through an
//! [`AttributePath`], so the host can highlight the offending field.
//!
//! ```rust
//! use metakube_validation::diagnostics::{AttributePath, Diagnostic};
//!
//! let path = AttributePath::root("spec").index(0).attr("version");
//! let diag = Diagnostic::error("unknown version 1.99.0", path)
//!     .with_detail("Please select one of available versions: [1.25.0, 1.26.0]");
//!
//! assert_eq!(diag.attribute_path.to_string(), "spec.0.version");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of list entries embedded in a diagnostic detail
pub const MAX_DETAIL_ITEMS: usize = 50;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// One step of an attribute path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Named attribute of a block
    Attr(String),
    /// Element of a list block
    Index(usize),
}

/// Pointer into the nested configuration tree of the resource
///
/// Displayed (and serialized) in the same dotted form the configuration
/// accessor reads: `spec.0.cloud.0.openstack.0.network`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    /// Start a path at a top-level attribute
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            steps: vec![PathStep::Attr(name.into())],
        }
    }

    /// Parse a dotted path; purely numeric segments become list indices
    pub fn parse(dotted: &str) -> Self {
        let steps = dotted
            .split('.')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.parse::<usize>() {
                Ok(index) => PathStep::Index(index),
                Err(_) => PathStep::Attr(segment.to_string()),
            })
            .collect();
        Self { steps }
    }

    /// Append a named attribute
    pub fn attr(mut self, name: impl Into<String>) -> Self {
        self.steps.push(PathStep::Attr(name.into()));
        self
    }

    /// Append a list index
    pub fn index(mut self, index: usize) -> Self {
        self.steps.push(PathStep::Index(index));
        self
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match step {
                PathStep::Attr(name) => write!(f, "{}", name)?,
                PathStep::Index(index) => write!(f, "{}", index)?,
            }
        }
        Ok(())
    }
}

impl From<AttributePath> for String {
    fn from(path: AttributePath) -> Self {
        path.to_string()
    }
}

impl From<String> for AttributePath {
    fn from(dotted: String) -> Self {
        AttributePath::parse(&dotted)
    }
}

/// Structured validation result for a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub attribute_path: AttributePath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Ordered diagnostics produced by one validation call
pub type Diagnostics = Vec<Diagnostic>;

impl Diagnostic {
    /// Create an error-severity diagnostic
    pub fn error(summary: impl Into<String>, attribute_path: AttributePath) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            attribute_path,
            detail: None,
        }
    }

    /// Create a warning-severity diagnostic
    pub fn warning(summary: impl Into<String>, attribute_path: AttributePath) -> Self {
        Self {
            severity: Severity::Warning,
            summary: summary.into(),
            attribute_path,
            detail: None,
        }
    }

    /// Attach free-text elaboration
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (at {})",
            self.severity, self.summary, self.attribute_path
        )?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  {}", detail)?;
        }
        Ok(())
    }
}

/// Whether any diagnostic in the sequence is an error
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Render a list of remote values for a detail message, bounded to
/// [`MAX_DETAIL_ITEMS`] entries.
pub fn format_list<S: AsRef<str>>(items: &[S]) -> String {
    let shown: Vec<&str> = items
        .iter()
        .take(MAX_DETAIL_ITEMS)
        .map(AsRef::as_ref)
        .collect();
    let hidden = items.len().saturating_sub(MAX_DETAIL_ITEMS);

    if hidden > 0 {
        format!("[{}] and {} more", shown.join(", "), hidden)
    } else {
        format!("[{}]", shown.join(", "))
    }
}
