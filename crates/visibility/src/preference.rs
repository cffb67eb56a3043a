use std::sync::Arc;

use parking_lot::Mutex;

use common::provider::{FeatureFlag, FeatureFlagProvider, PreferenceProvider};

/// Process-wide memo of the "exclude sensitive items" setting.
///
/// The value is the inverse of the user-facing "show hidden nodes"
/// toggle, gated on the hidden-nodes flag. It is computed on first
/// query and held until [`reset`](Self::reset), which the owning
/// screen issues before a fresh search; toggling the preference alone
/// does not invalidate in-flight listings.
#[derive(Clone)]
pub struct ExcludeSensitivePreference {
    flags: Arc<dyn FeatureFlagProvider>,
    preferences: Arc<dyn PreferenceProvider>,
    memo: Arc<Mutex<Option<bool>>>,
}

impl ExcludeSensitivePreference {
    pub fn new(flags: Arc<dyn FeatureFlagProvider>, preferences: Arc<dyn PreferenceProvider>) -> Self {
        Self {
            flags,
            preferences,
            memo: Arc::new(Mutex::new(None)),
        }
    }

    /// Whether sensitive items should be excluded from listings.
    pub fn get(&self) -> bool {
        let mut memo = self.memo.lock();
        *memo.get_or_insert_with(|| self.compute())
    }

    /// Drop the memo; the next query recomputes from the providers.
    pub fn reset(&self) {
        *self.memo.lock() = None;
    }

    fn compute(&self) -> bool {
        if !self.flags.is_enabled(FeatureFlag::HiddenNodes) {
            return false;
        }
        !self.preferences.show_hidden_nodes()
    }
}
