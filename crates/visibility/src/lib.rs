/**
 * Decides whether the folder a screen is presenting should be
 *  treated as sensitive, as a tri-state outcome.
 */
pub mod checker;
/**
 * Builds the sensitivity filter option and search filter that the
 *  node-listing layer applies when enumerating children.
 */
pub mod composer;
/**
 * Folds a node's direct sensitivity mark with its ancestor chain.
 */
pub mod inheritance;
/**
 * Change streams derived from the node update bus: direct flag
 *  transitions, inherited-sensitivity re-queries, and the merged
 *  feed the thumbnail decorator re-annotates on.
 */
pub mod monitor;
/**
 * Process-wide memo of the "exclude sensitive items" setting,
 *  invalidated by an explicit reset before a new search.
 */
pub mod preference;
/**
 * Scripted providers for exercising the decision layer in tests.
 */
pub mod testkit;
/**
 * Thumbnail decoration: image assets and the loader wrapper that
 *  annotates every resolved image with current sensitivity.
 */
pub mod thumbnail;

pub mod prelude {
    pub use crate::checker::SensitivityChecker;
    pub use crate::composer::DisplayFilterComposer;
    pub use crate::inheritance::InheritanceResolver;
    pub use crate::monitor::SensitivityMonitor;
    pub use crate::preference::ExcludeSensitivePreference;
    pub use crate::thumbnail::{
        ImageAsset, ImageKind, SensitiveImage, SensitiveThumbnailLoader, ThumbnailLoader,
    };
}
