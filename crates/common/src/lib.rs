/**
 * Display surfaces a node listing can be presented on.
 *  Sensitivity decisions only apply to some of them.
 */
pub mod display;
/**
 * Node update events and the broadcast bus that fans
 *  them out to visibility subscribers.
 */
pub mod events;
/**
 * Filter options and the search filter handed to the
 *  node-listing layer when enumerating children.
 */
pub mod filter;
/**
 * Node records as this layer sees them: an opaque handle,
 *  a kind, a direct sensitivity flag, and a parent
 *  back-reference for ancestor lookups.
 */
pub mod node;
/**
 * Provider contracts consumed by the visibility layer,
 *  one narrow trait per responsibility, plus in-memory
 *  implementations.
 */
pub mod provider;
/**
 * The tri-state sensitivity outcome. `Unknown` is a
 *  suppressed signal, distinct from an explicit
 *  `NotSensitive`.
 */
pub mod sensitivity;

pub mod prelude {
    pub use crate::display::DisplayMode;
    pub use crate::events::{NodeUpdate, NodeUpdateKind, UpdateBus};
    pub use crate::filter::{FilterOption, SearchFilter};
    pub use crate::node::{Handle, Node, NodeKind};
    pub use crate::provider::{
        AccountProvider, FeatureFlag, FeatureFlagProvider, NodeProvider, NodeProviderError,
        PreferenceProvider, SystemLocationProvider, WellKnownLocation,
    };
    pub use crate::sensitivity::Sensitivity;
}
