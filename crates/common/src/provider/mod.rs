use std::fmt::{Debug, Display};

use async_trait::async_trait;

use crate::filter::SearchFilter;
use crate::node::{Handle, Node};

mod memory;

pub use memory::{
    MemoryAccount, MemoryFeatureFlags, MemoryNodeProvider, MemoryNodeProviderError,
    MemoryPreferences, StaticSystemLocations,
};

/// Remotely togglable feature gates consulted by the visibility layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    /// The hidden-nodes capability. Everything in this workspace is a
    /// no-op while this is off.
    HiddenNodes,
}

/// Well-known system-generated containers, exempt from sensitivity
/// evaluation regardless of their flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownLocation {
    CameraUploads,
    ChatFiles,
    BackupsRoot,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeProviderError<T> {
    /// The underlying data source failed.
    #[error("unhandled node provider error: {0}")]
    Provider(#[from] T),
    /// A parent back-reference points at a node the provider cannot
    /// resolve.
    #[error("dangling parent reference: {0}")]
    DanglingParent(Handle),
}

/// Read access to the node graph.
///
/// Implementations sit in front of the storage backend; the visibility
/// layer only ever asks for single nodes, ancestor sensitivity, and
/// filtered child listings.
#[async_trait]
pub trait NodeProvider: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send + 'static;

    /// Look up a node by handle.
    async fn node(&self, handle: Handle) -> Result<Option<Node>, NodeProviderError<Self::Error>>;

    /// Whether any ancestor of the node is marked sensitive. The
    /// node's own flag is not consulted.
    ///
    /// # Arguments
    /// * `node` - The node whose ancestor chain to inspect
    ///
    /// # Returns
    /// * `Ok(bool)` - Whether sensitivity is inherited
    /// * `Err(NodeProviderError)` - The chain could not be walked
    async fn is_inheriting_sensitivity(
        &self,
        node: &Node,
    ) -> Result<bool, NodeProviderError<Self::Error>>;

    /// Last inherited-sensitivity value the provider has cached for
    /// the handle, if any. Used for synchronous first paints; a fresh
    /// value always arrives through the async query or change stream.
    fn cached_inherited_sensitivity(&self, _handle: Handle) -> Option<bool> {
        None
    }

    /// List nodes matching the filter. The sensitivity option must be
    /// honored: `NonSensitiveOnly` excludes directly marked nodes and
    /// nodes inheriting sensitivity.
    async fn search(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<Node>, NodeProviderError<Self::Error>>;
}

/// Registry of well-known system-generated locations, keyed by handle.
pub trait SystemLocationProvider: Send + Sync {
    fn location(&self, handle: Handle) -> Option<WellKnownLocation>;

    fn is_system_generated(&self, handle: Handle) -> bool {
        self.location(handle).is_some()
    }
}

pub trait FeatureFlagProvider: Send + Sync {
    /// Unset flags read as disabled.
    fn is_enabled(&self, flag: FeatureFlag) -> bool;
}

pub trait AccountProvider: Send + Sync {
    /// Whether the account tier grants sensitivity features: paid, or
    /// business/pro-flexi that has not expired.
    fn has_valid_entitlement(&self) -> bool;
}

/// The user-facing "show hidden nodes" toggle.
pub trait PreferenceProvider: Send + Sync {
    fn show_hidden_nodes(&self) -> bool;

    fn set_show_hidden_nodes(&self, show: bool);
}
