use serde::{Deserialize, Serialize};

use crate::node::{Handle, Node};

/// Sensitivity filtering applied when listing a folder's children.
///
/// Derived from the user preference and feature-flag state at query
/// time; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterOption {
    /// No sensitivity filtering; sensitive nodes are listed.
    #[default]
    Disabled,
    /// Exclude nodes that are directly marked or inherit sensitivity.
    NonSensitiveOnly,
}

/// Query handed to the node-listing layer when enumerating children.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    parent: Option<Handle>,
    query: Option<String>,
    sensitivity: FilterOption,
}

impl SearchFilter {
    /// Filter scoped to the children of one folder.
    pub fn children_of(parent: Handle) -> Self {
        Self {
            parent: Some(parent),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: FilterOption) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn sensitivity(&self) -> FilterOption {
        self.sensitivity
    }

    /// Name and parent predicate; the sensitivity predicate needs the
    /// ancestor chain and stays with the provider.
    pub fn matches(&self, node: &Node) -> bool {
        if let Some(parent) = self.parent {
            if node.parent() != Some(parent) {
                return false;
            }
        }
        match self.query.as_deref() {
            Some(query) => node.name().to_lowercase().contains(&query.to_lowercase()),
            None => true,
        }
    }
}
