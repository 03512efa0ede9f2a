use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one execution target.
///
/// The value is opaque to the engine. Empty identifiers are rejected where
/// clusters enter the system (configuration, CLI flags), not here, so that an
/// empty identifier reaching the engine is reported as a failed expansion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(String);

impl ClusterId {
    /// Wrap a cluster name.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ClusterId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ClusterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Remove repeated identifiers, keeping the first occurrence of each.
pub fn dedup_clusters(clusters: impl IntoIterator<Item = ClusterId>) -> Vec<ClusterId> {
    let mut seen = std::collections::HashSet::new();
    clusters
        .into_iter()
        .filter(|cluster| seen.insert(cluster.clone()))
        .collect()
}
