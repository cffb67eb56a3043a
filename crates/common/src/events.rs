use tokio::sync::broadcast;

use crate::node::{Handle, Node};

/// What changed about a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeUpdateKind {
    /// The node's own sensitivity mark flipped.
    SensitivityChanged(bool),
    /// The node was reparented.
    Moved { new_parent: Option<Handle> },
    /// The node was removed from the graph.
    Removed,
}

/// A single node-graph change, as delivered by the storage backend's
/// update callbacks. `node` is the post-update record.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeUpdate {
    pub node: Node,
    pub kind: NodeUpdateKind,
}

impl NodeUpdate {
    pub fn sensitivity_changed(node: Node, sensitive: bool) -> Self {
        Self {
            node,
            kind: NodeUpdateKind::SensitivityChanged(sensitive),
        }
    }

    pub fn moved(node: Node, new_parent: Option<Handle>) -> Self {
        Self {
            node,
            kind: NodeUpdateKind::Moved { new_parent },
        }
    }

    pub fn removed(node: Node) -> Self {
        Self {
            node,
            kind: NodeUpdateKind::Removed,
        }
    }
}

/// Fan-out hub for node updates.
///
/// Every subscriber observes every update, in publish order. A
/// subscriber that falls behind the channel buffer sees a lag marker
/// and is expected to resynchronize by re-querying, not to error.
#[derive(Debug, Clone)]
pub struct UpdateBus {
    sender: broadcast::Sender<NodeUpdate>,
}

impl UpdateBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an update to all current subscribers. Returns how many
    /// subscribers received it; zero subscribers is not an error.
    pub fn publish(&self, update: NodeUpdate) -> usize {
        let receivers = self.sender.send(update).unwrap_or(0);
        tracing::trace!(receivers, "published node update");
        receivers
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NodeUpdate> {
        self.sender.subscribe()
    }
}

impl Default for UpdateBus {
    fn default() -> Self {
        Self::new(256)
    }
}
