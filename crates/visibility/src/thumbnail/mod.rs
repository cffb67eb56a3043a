use std::fmt::{Debug, Display};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future;
use futures::stream::{self, BoxStream, StreamExt};

use common::node::Node;
use common::provider::{AccountProvider, NodeProvider, NodeProviderError};

use crate::monitor::SensitivityMonitor;

mod asset;

pub use asset::{ImageAsset, ImageKind, MaybeMime, SensitiveImage};

/// Source of thumbnail and preview images for nodes.
#[async_trait]
pub trait ThumbnailLoader: Send + Sync + 'static {
    type Error: Display + Debug + Send + 'static;

    /// Image to show immediately, before any loading completes. When
    /// nothing is resolved yet this is the provided placeholder.
    fn initial_image(&self, node: &Node, kind: ImageKind, placeholder: &ImageAsset) -> ImageAsset;

    /// Ongoing image updates for the node, typically a fast thumbnail
    /// followed by a sharper preview. The stream ends when the loader
    /// has nothing further to deliver or the consumer drops it.
    async fn load_image(
        &self,
        node: &Node,
        kind: ImageKind,
    ) -> Result<BoxStream<'static, ImageAsset>, Self::Error>;
}

enum Feed<E> {
    Image(ImageAsset),
    Change(Result<bool, E>),
}

/// Decorates a thumbnail loader so every resolved image carries the
/// node's current sensitivity.
///
/// For an unentitled account images pass through unannotated. A
/// directly marked node annotates every resolved emission sensitive.
/// Otherwise the annotation tracks *inherited* sensitivity: the image
/// stream is merged with the node's sensitivity change stream, and
/// whichever side updates, the latest image is re-emitted with the
/// latest known value.
pub struct SensitiveThumbnailLoader<L, N: NodeProvider> {
    loader: Arc<L>,
    account: Arc<dyn AccountProvider>,
    monitor: SensitivityMonitor<N>,
}

// not derived: the base loader sits behind an Arc and need not be
// Clone itself
impl<L, N: NodeProvider> Clone for SensitiveThumbnailLoader<L, N> {
    fn clone(&self) -> Self {
        Self {
            loader: self.loader.clone(),
            account: self.account.clone(),
            monitor: self.monitor.clone(),
        }
    }
}

impl<L, N> SensitiveThumbnailLoader<L, N>
where
    L: ThumbnailLoader,
    N: NodeProvider,
{
    pub fn new(loader: L, account: Arc<dyn AccountProvider>, monitor: SensitivityMonitor<N>) -> Self {
        Self {
            loader: Arc::new(loader),
            account,
            monitor,
        }
    }

    fn nodes(&self) -> &N {
        self.monitor.nodes()
    }

    /// Image to show before loading completes, annotated from what is
    /// already known: the direct mark, then the provider's cached
    /// inherited value.
    pub fn initial_image(
        &self,
        node: &Node,
        kind: ImageKind,
        placeholder: &ImageAsset,
    ) -> SensitiveImage {
        let image = self.loader.initial_image(node, kind, placeholder);
        if !self.account.has_valid_entitlement() {
            return SensitiveImage::unannotated(image);
        }
        let sensitive = node.is_marked_sensitive()
            || self
                .nodes()
                .cached_inherited_sensitivity(node.handle())
                .unwrap_or(false);
        SensitiveImage::annotated(image, sensitive)
    }

    /// Stream of images annotated with the node's current sensitivity.
    ///
    /// Errors from the base loader surface here; inherited-sensitivity
    /// lookup failures inside the stream degrade to the last known
    /// value instead of tearing the stream down, and the next node
    /// update re-queries.
    pub async fn load_image(
        &self,
        node: &Node,
        kind: ImageKind,
    ) -> Result<BoxStream<'static, SensitiveImage>, L::Error> {
        let images = self.loader.load_image(node, kind).await?;
        if !self.account.has_valid_entitlement() {
            return Ok(images.map(SensitiveImage::unannotated).boxed());
        }
        if node.is_marked_sensitive() {
            return Ok(images
                .map(|image| SensitiveImage::annotated(image, true))
                .boxed());
        }

        let initial = match self.nodes().is_inheriting_sensitivity(node).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    handle = %node.handle(),
                    "inherited sensitivity lookup failed, treating as visible: {}",
                    e
                );
                false
            }
        };
        let changes = self.monitor.merged_changes(node);
        Ok(Self::annotate(images, changes, initial))
    }

    /// Merge image updates with sensitivity updates, last-value-wins
    /// on both sides. Only resolved images are retained for
    /// re-emission; placeholders are emitted once, unblurred.
    fn annotate(
        images: BoxStream<'static, ImageAsset>,
        changes: BoxStream<'static, Result<bool, NodeProviderError<N::Error>>>,
        initial: bool,
    ) -> BoxStream<'static, SensitiveImage> {
        let feed = stream::select(images.map(Feed::Image), changes.map(Feed::Change));
        feed.scan(
            (initial, None::<ImageAsset>),
            |(sensitive, last_image), item| {
                let out = match item {
                    Feed::Image(image) => {
                        let annotated = SensitiveImage::annotated(image.clone(), *sensitive);
                        if !image.kind().is_placeholder() {
                            *last_image = Some(image);
                        }
                        Some(annotated)
                    }
                    Feed::Change(Ok(value)) => {
                        if *sensitive == value {
                            None
                        } else {
                            *sensitive = value;
                            last_image
                                .clone()
                                .map(|image| SensitiveImage::annotated(image, value))
                        }
                    }
                    Feed::Change(Err(e)) => {
                        tracing::warn!(
                            "inherited sensitivity update failed, keeping last value: {}",
                            e
                        );
                        None
                    }
                };
                future::ready(Some(out))
            },
        )
        .filter_map(future::ready)
        .boxed()
    }
}
