use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use common::events::{NodeUpdate, NodeUpdateKind, UpdateBus};
use common::node::{Handle, Node, NodeKind};
use common::provider::{NodeProvider, NodeProviderError};

/// Change streams derived from the node update bus.
///
/// Every stream ends when the consumer drops it; nothing here runs
/// detached. A subscriber that falls behind the bus buffer treats the
/// lag as a potential change and re-queries rather than erroring, so
/// last-value-wins is preserved without unbounded buffering.
#[derive(Clone)]
pub struct SensitivityMonitor<N: NodeProvider> {
    bus: UpdateBus,
    nodes: N,
}

/// Updates that could change a node's inherited sensitivity: anything
/// happening to some *other* node. The node's own mark is direct, not
/// inherited.
fn affects_ancestry(update: &NodeUpdate, node: &Node) -> bool {
    if update.node.handle() == node.handle() {
        return false;
    }
    matches!(
        update.kind,
        NodeUpdateKind::SensitivityChanged(_)
            | NodeUpdateKind::Moved { .. }
            | NodeUpdateKind::Removed
    )
}

impl<N: NodeProvider> SensitivityMonitor<N> {
    pub fn new(bus: UpdateBus, nodes: N) -> Self {
        Self { bus, nodes }
    }

    pub fn bus(&self) -> &UpdateBus {
        &self.bus
    }

    pub fn nodes(&self) -> &N {
        &self.nodes
    }

    /// Transitions of the node's own sensitivity mark.
    pub fn sensitivity_changes(&self, handle: Handle) -> BoxStream<'static, bool> {
        stream::unfold(self.bus.subscribe(), move |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(update) if update.node.handle() == handle => {
                        if let NodeUpdateKind::SensitivityChanged(sensitive) = update.kind {
                            return Some((sensitive, rx));
                        }
                    }
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, %handle, "update subscriber lagged");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }

    /// Fresh inherited-sensitivity values for the node, re-queried on
    /// every update that could have changed its ancestor chain.
    /// Consecutive equal values are deduped.
    pub fn inherited_changes(
        &self,
        node: &Node,
    ) -> BoxStream<'static, Result<bool, NodeProviderError<N::Error>>> {
        stream::unfold(
            (self.bus.subscribe(), self.nodes.clone(), node.clone(), None::<bool>),
            |(mut rx, nodes, node, mut last)| async move {
                loop {
                    let relevant = match rx.recv().await {
                        Ok(update) => affects_ancestry(&update, &node),
                        Err(RecvError::Lagged(skipped)) => {
                            // missed updates may include ancestry changes
                            tracing::warn!(
                                skipped,
                                handle = %node.handle(),
                                "update subscriber lagged, re-querying inherited sensitivity"
                            );
                            true
                        }
                        Err(RecvError::Closed) => return None,
                    };
                    if !relevant {
                        continue;
                    }
                    match nodes.is_inheriting_sensitivity(&node).await {
                        Ok(value) => {
                            if last == Some(value) {
                                continue;
                            }
                            last = Some(value);
                            return Some((Ok(value), (rx, nodes, node, last)));
                        }
                        Err(e) => return Some((Err(e), (rx, nodes, node, last))),
                    }
                }
            },
        )
        .boxed()
    }

    /// Direct and inherited transitions folded into one stream; feeds
    /// thumbnail re-annotation.
    pub fn merged_changes(
        &self,
        node: &Node,
    ) -> BoxStream<'static, Result<bool, NodeProviderError<N::Error>>> {
        let direct = self.sensitivity_changes(node.handle()).map(Ok).boxed();
        let inherited = self.inherited_changes(node);
        stream::select(direct, inherited).boxed()
    }

    /// Coarse signal that some folder's sensitivity mark changed;
    /// drives listing refreshes upstream.
    pub fn folder_sensitivity_changed(&self) -> BoxStream<'static, ()> {
        stream::unfold(self.bus.subscribe(), |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(update) => {
                        if update.node.kind() == NodeKind::Folder
                            && matches!(update.kind, NodeUpdateKind::SensitivityChanged(_))
                        {
                            return Some(((), rx));
                        }
                    }
                    // missed updates may include folder changes; signal once
                    Err(RecvError::Lagged(_)) => return Some(((), rx)),
                    Err(RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }
}
