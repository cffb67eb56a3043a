use common::node::Node;
use common::provider::{NodeProvider, NodeProviderError};

/// Folds a node's direct sensitivity mark with its ancestor chain.
#[derive(Debug, Clone)]
pub struct InheritanceResolver<N: NodeProvider> {
    nodes: N,
}

impl<N: NodeProvider> InheritanceResolver<N> {
    pub fn new(nodes: N) -> Self {
        Self { nodes }
    }

    /// Direct mark OR inherited sensitivity. Short-circuits on the
    /// direct mark so a marked node never pays for the ancestor walk.
    pub async fn is_sensitive(&self, node: &Node) -> Result<bool, NodeProviderError<N::Error>> {
        if node.is_marked_sensitive() {
            return Ok(true);
        }
        self.nodes.is_inheriting_sensitivity(node).await
    }

    pub fn nodes(&self) -> &N {
        &self.nodes
    }
}
