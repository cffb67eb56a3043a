/// Scripted providers for exercising the decision layer in tests.
///
/// Unlike the in-memory providers in `common`, these do not model a
/// node graph: every answer is whatever the test scripted, including
/// errors, so failure paths are as easy to drive as happy paths.
///
/// # Example
///
/// ```rust,ignore
/// use visibility::testkit::MockNodeProvider;
///
/// let nodes = MockNodeProvider::new()
///     .with_inherited(folder.handle(), Ok(true))
///     .with_cached_inherited(file.handle(), false);
/// ```
mod loader;
mod nodes;

pub use loader::{MockThumbnailLoader, MockThumbnailLoaderError};
pub use nodes::{MockNodeProvider, MockNodeProviderError};
