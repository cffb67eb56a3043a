use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use common::filter::SearchFilter;
use common::node::{Handle, Node};
use common::provider::{NodeProvider, NodeProviderError};

/// Node provider returning scripted answers.
///
/// Inherited-sensitivity results are looked up per handle, then fall
/// back to the default result; with nothing scripted the query fails,
/// which keeps accidental lookups loud in tests.
#[derive(Debug, Clone, Default)]
pub struct MockNodeProvider {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    nodes: HashMap<Handle, Node>,
    inherited: HashMap<Handle, Result<bool, String>>,
    inherited_default: Option<Result<bool, String>>,
    cached_inherited: HashMap<Handle, bool>,
    search_results: Vec<Node>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MockNodeProviderError {
    #[error("scripted error: {0}")]
    Scripted(String),
    #[error("no scripted result")]
    Unscripted,
}

impl MockNodeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(self, node: Node) -> Self {
        self.inner.write().nodes.insert(node.handle(), node);
        self
    }

    pub fn with_inherited(self, handle: Handle, result: Result<bool, &str>) -> Self {
        self.inner
            .write()
            .inherited
            .insert(handle, result.map_err(String::from));
        self
    }

    pub fn with_inherited_default(self, result: Result<bool, &str>) -> Self {
        self.inner.write().inherited_default = Some(result.map_err(String::from));
        self
    }

    pub fn with_cached_inherited(self, handle: Handle, inherited: bool) -> Self {
        self.inner.write().cached_inherited.insert(handle, inherited);
        self
    }

    pub fn with_search_results(self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.inner.write().search_results = nodes.into_iter().collect();
        self
    }

    /// Re-script the inherited result mid-test, e.g. between two
    /// published updates.
    pub fn script_inherited(&self, handle: Handle, result: Result<bool, &str>) {
        self.inner
            .write()
            .inherited
            .insert(handle, result.map_err(String::from));
    }
}

#[async_trait]
impl NodeProvider for MockNodeProvider {
    type Error = MockNodeProviderError;

    async fn node(&self, handle: Handle) -> Result<Option<Node>, NodeProviderError<Self::Error>> {
        Ok(self.inner.read().nodes.get(&handle).cloned())
    }

    async fn is_inheriting_sensitivity(
        &self,
        node: &Node,
    ) -> Result<bool, NodeProviderError<Self::Error>> {
        let inner = self.inner.read();
        let result = inner
            .inherited
            .get(&node.handle())
            .or(inner.inherited_default.as_ref())
            .cloned();
        match result {
            Some(Ok(inherited)) => Ok(inherited),
            Some(Err(message)) => Err(NodeProviderError::Provider(
                MockNodeProviderError::Scripted(message),
            )),
            None => Err(NodeProviderError::Provider(
                MockNodeProviderError::Unscripted,
            )),
        }
    }

    fn cached_inherited_sensitivity(&self, handle: Handle) -> Option<bool> {
        self.inner.read().cached_inherited.get(&handle).copied()
    }

    async fn search(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<Node>, NodeProviderError<Self::Error>> {
        Ok(self
            .inner
            .read()
            .search_results
            .iter()
            .filter(|node| filter.matches(node))
            .cloned()
            .collect())
    }
}
