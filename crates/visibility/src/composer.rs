use common::display::DisplayMode;
use common::filter::{FilterOption, SearchFilter};
use common::node::Handle;

use crate::preference::ExcludeSensitivePreference;

/// Builds the sensitivity filter the node-listing layer applies when
/// enumerating a folder's children.
#[derive(Clone)]
pub struct DisplayFilterComposer {
    preference: ExcludeSensitivePreference,
}

impl DisplayFilterComposer {
    pub fn new(preference: ExcludeSensitivePreference) -> Self {
        Self { preference }
    }

    /// Filter option for listing children on the given surface.
    pub fn filter_option(&self, mode: DisplayMode) -> FilterOption {
        match mode {
            // the bin and backups always show everything they hold
            DisplayMode::RubbishBin | DisplayMode::Backup => FilterOption::Disabled,
            _ if self.preference.get() => FilterOption::NonSensitiveOnly,
            _ => FilterOption::Disabled,
        }
    }

    /// Assemble the search filter for a folder listing.
    pub fn search_filter(
        &self,
        parent: Handle,
        query: Option<&str>,
        mode: DisplayMode,
    ) -> SearchFilter {
        let mut filter =
            SearchFilter::children_of(parent).with_sensitivity(self.filter_option(mode));
        if let Some(query) = query {
            filter = filter.with_query(query);
        }
        filter
    }

    /// Screens call this before a fresh search so the next
    /// [`filter_option`](Self::filter_option) reflects the current
    /// preference.
    pub fn reset_sensitivity_setting(&self) {
        self.preference.reset();
    }
}
