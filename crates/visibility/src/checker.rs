use std::sync::Arc;

use common::display::DisplayMode;
use common::node::{Node, NodeKind};
use common::provider::{
    AccountProvider, FeatureFlag, FeatureFlagProvider, NodeProvider, NodeProviderError,
    SystemLocationProvider,
};
use common::sensitivity::Sensitivity;

use crate::inheritance::InheritanceResolver;

/// Decides whether the folder a screen is presenting should be
/// treated as sensitive.
///
/// The outcome drives view-level gating (e.g. whether to offer the
/// "unhide" banner). `Unknown` suppresses that UI entirely; an
/// explicit `NotSensitive` means the question applied and the answer
/// is no. An unentitled account always gets `NotSensitive` -- lack of
/// entitlement forces visibility, it does not suppress the signal.
#[derive(Clone)]
pub struct SensitivityChecker<N: NodeProvider> {
    flags: Arc<dyn FeatureFlagProvider>,
    locations: Arc<dyn SystemLocationProvider>,
    account: Arc<dyn AccountProvider>,
    resolver: InheritanceResolver<N>,
}

impl<N: NodeProvider> SensitivityChecker<N> {
    pub fn new(
        flags: Arc<dyn FeatureFlagProvider>,
        locations: Arc<dyn SystemLocationProvider>,
        account: Arc<dyn AccountProvider>,
        nodes: N,
    ) -> Self {
        Self {
            flags,
            locations,
            account,
            resolver: InheritanceResolver::new(nodes),
        }
    }

    /// Evaluate the parent folder of the current listing.
    ///
    /// Inheritance lookups can fail on transient data errors; the
    /// error is propagated so the call site picks the fallback (views
    /// use [`evaluate_or_unknown`](Self::evaluate_or_unknown)).
    pub async fn evaluate(
        &self,
        parent: Option<&Node>,
        mode: DisplayMode,
        from_shared_item: bool,
    ) -> Result<Sensitivity, NodeProviderError<N::Error>> {
        if !self.flags.is_enabled(FeatureFlag::HiddenNodes) {
            return Ok(Sensitivity::Unknown);
        }
        if mode != DisplayMode::CloudDrive {
            return Ok(Sensitivity::Unknown);
        }
        if from_shared_item {
            // sensitivity is the owner's view, not the recipient's
            return Ok(Sensitivity::Unknown);
        }
        let Some(parent) = parent else {
            return Ok(Sensitivity::Unknown);
        };
        match parent.kind() {
            NodeKind::Folder => {}
            // only folders qualify as a parent for this check
            NodeKind::File | NodeKind::Root => return Ok(Sensitivity::Unknown),
        }
        if let Some(location) = self.locations.location(parent.handle()) {
            tracing::debug!(
                handle = %parent.handle(),
                ?location,
                "system-generated container, sensitivity suppressed"
            );
            return Ok(Sensitivity::Unknown);
        }
        if !self.account.has_valid_entitlement() {
            tracing::debug!(handle = %parent.handle(), "no entitlement, forcing visible");
            return Ok(Sensitivity::NotSensitive);
        }

        let sensitive = self.resolver.is_sensitive(parent).await?;
        Ok(Sensitivity::from_flag(sensitive))
    }

    /// [`evaluate`](Self::evaluate), degrading provider failures to
    /// `Unknown`.
    pub async fn evaluate_or_unknown(
        &self,
        parent: Option<&Node>,
        mode: DisplayMode,
        from_shared_item: bool,
    ) -> Sensitivity {
        match self.evaluate(parent, mode, from_shared_item).await {
            Ok(sensitivity) => sensitivity,
            Err(e) => {
                tracing::warn!("sensitivity evaluation degraded to unknown: {}", e);
                Sensitivity::Unknown
            }
        }
    }
}
