use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{
    AccountProvider, FeatureFlag, FeatureFlagProvider, NodeProvider, NodeProviderError,
    PreferenceProvider, SystemLocationProvider, WellKnownLocation,
};
use crate::filter::{FilterOption, SearchFilter};
use crate::node::{Handle, Node};

/// In-memory node provider backed by HashMaps.
///
/// Intended for tests and embedding consumers that mirror a remote
/// node graph locally; the ancestor walk runs over the parent
/// back-references of the nodes it holds.
#[derive(Debug, Clone, Default)]
pub struct MemoryNodeProvider {
    inner: Arc<RwLock<MemoryNodeProviderInner>>,
}

#[derive(Debug, Default)]
struct MemoryNodeProviderInner {
    nodes: HashMap<Handle, Node>,
    /// Last inherited-sensitivity value per handle, fed by whoever
    /// resolves them (typically the visibility monitor).
    inherited_cache: HashMap<Handle, bool>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryNodeProviderError {
    #[error("memory provider error: {0}")]
    Internal(String),
}

impl MemoryNodeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node.
    pub fn insert(&self, node: Node) {
        let mut inner = self.inner.write().expect("node provider lock poisoned");
        inner.nodes.insert(node.handle(), node);
    }

    pub fn remove(&self, handle: Handle) -> Option<Node> {
        let mut inner = self.inner.write().expect("node provider lock poisoned");
        inner.nodes.remove(&handle)
    }

    /// Flip a node's direct sensitivity mark, returning the updated
    /// node so callers can publish the change on the update bus.
    pub fn set_marked_sensitive(&self, handle: Handle, marked: bool) -> Option<Node> {
        let mut inner = self.inner.write().expect("node provider lock poisoned");
        let node = inner.nodes.get_mut(&handle)?;
        node.set_marked_sensitive(marked);
        Some(node.clone())
    }

    pub fn cache_inherited(&self, handle: Handle, inherited: bool) {
        let mut inner = self.inner.write().expect("node provider lock poisoned");
        inner.inherited_cache.insert(handle, inherited);
    }
}

impl MemoryNodeProviderInner {
    /// Walk the parent chain; true if any ancestor is marked.
    /// The node's own flag is not consulted.
    fn is_inheriting(
        &self,
        node: &Node,
    ) -> Result<bool, NodeProviderError<MemoryNodeProviderError>> {
        let mut seen = HashSet::new();
        let mut next = node.parent();
        while let Some(handle) = next {
            // a cyclic parent chain is malformed input, not a hang
            if !seen.insert(handle) {
                return Err(NodeProviderError::DanglingParent(handle));
            }
            let ancestor = self
                .nodes
                .get(&handle)
                .ok_or(NodeProviderError::DanglingParent(handle))?;
            if ancestor.is_marked_sensitive() {
                return Ok(true);
            }
            next = ancestor.parent();
        }
        Ok(false)
    }
}

#[async_trait]
impl NodeProvider for MemoryNodeProvider {
    type Error = MemoryNodeProviderError;

    async fn node(&self, handle: Handle) -> Result<Option<Node>, NodeProviderError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            NodeProviderError::Provider(MemoryNodeProviderError::Internal(format!(
                "failed to acquire read lock: {}",
                e
            )))
        })?;

        Ok(inner.nodes.get(&handle).cloned())
    }

    async fn is_inheriting_sensitivity(
        &self,
        node: &Node,
    ) -> Result<bool, NodeProviderError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            NodeProviderError::Provider(MemoryNodeProviderError::Internal(format!(
                "failed to acquire read lock: {}",
                e
            )))
        })?;

        inner.is_inheriting(node)
    }

    fn cached_inherited_sensitivity(&self, handle: Handle) -> Option<bool> {
        let inner = self.inner.read().ok()?;
        inner.inherited_cache.get(&handle).copied()
    }

    async fn search(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<Node>, NodeProviderError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            NodeProviderError::Provider(MemoryNodeProviderError::Internal(format!(
                "failed to acquire read lock: {}",
                e
            )))
        })?;

        let mut results = Vec::new();
        for node in inner.nodes.values() {
            if !filter.matches(node) {
                continue;
            }
            if filter.sensitivity() == FilterOption::NonSensitiveOnly
                && (node.is_marked_sensitive() || inner.is_inheriting(node)?)
            {
                continue;
            }
            results.push(node.clone());
        }
        results.sort_by_key(|node| node.handle());
        Ok(results)
    }
}

/// Feature flags held in a set; absent flags read as disabled.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeatureFlags {
    enabled: Arc<RwLock<HashSet<FeatureFlag>>>,
}

impl MemoryFeatureFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enabled(flags: impl IntoIterator<Item = FeatureFlag>) -> Self {
        Self {
            enabled: Arc::new(RwLock::new(flags.into_iter().collect())),
        }
    }

    pub fn enable(&self, flag: FeatureFlag) {
        if let Ok(mut enabled) = self.enabled.write() {
            enabled.insert(flag);
        }
    }

    pub fn disable(&self, flag: FeatureFlag) {
        if let Ok(mut enabled) = self.enabled.write() {
            enabled.remove(&flag);
        }
    }
}

impl FeatureFlagProvider for MemoryFeatureFlags {
    fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self.enabled
            .read()
            .map(|enabled| enabled.contains(&flag))
            .unwrap_or(false)
    }
}

/// Account entitlement held in a flag.
#[derive(Debug, Clone)]
pub struct MemoryAccount {
    entitled: Arc<AtomicBool>,
}

impl MemoryAccount {
    pub fn new(entitled: bool) -> Self {
        Self {
            entitled: Arc::new(AtomicBool::new(entitled)),
        }
    }

    pub fn set_entitled(&self, entitled: bool) {
        self.entitled.store(entitled, Ordering::SeqCst);
    }
}

impl AccountProvider for MemoryAccount {
    fn has_valid_entitlement(&self) -> bool {
        self.entitled.load(Ordering::SeqCst)
    }
}

/// The show-hidden-nodes toggle held in a flag.
#[derive(Debug, Clone)]
pub struct MemoryPreferences {
    show_hidden: Arc<AtomicBool>,
}

impl MemoryPreferences {
    pub fn new(show_hidden: bool) -> Self {
        Self {
            show_hidden: Arc::new(AtomicBool::new(show_hidden)),
        }
    }
}

impl Default for MemoryPreferences {
    fn default() -> Self {
        Self::new(false)
    }
}

impl PreferenceProvider for MemoryPreferences {
    fn show_hidden_nodes(&self) -> bool {
        self.show_hidden.load(Ordering::SeqCst)
    }

    fn set_show_hidden_nodes(&self, show: bool) {
        self.show_hidden.store(show, Ordering::SeqCst);
    }
}

/// Fixed handle-to-location registry, built once at startup from the
/// backend's well-known handles.
#[derive(Debug, Clone, Default)]
pub struct StaticSystemLocations {
    locations: HashMap<Handle, WellKnownLocation>,
}

impl StaticSystemLocations {
    pub fn new(entries: impl IntoIterator<Item = (Handle, WellKnownLocation)>) -> Self {
        Self {
            locations: entries.into_iter().collect(),
        }
    }
}

impl SystemLocationProvider for StaticSystemLocations {
    fn location(&self, handle: Handle) -> Option<WellKnownLocation> {
        self.locations.get(&handle).copied()
    }
}
