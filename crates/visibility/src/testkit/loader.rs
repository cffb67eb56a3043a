use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use common::node::Node;

use crate::thumbnail::{ImageAsset, ImageKind, ThumbnailLoader};

/// Thumbnail loader whose image stream is driven by the test through
/// a channel sender; yield images while the consumer is polling.
pub struct MockThumbnailLoader {
    initial: Option<ImageAsset>,
    images: Mutex<Option<mpsc::UnboundedReceiver<ImageAsset>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MockThumbnailLoaderError {
    #[error("image stream already taken")]
    StreamTaken,
}

impl MockThumbnailLoader {
    pub fn new() -> (Self, mpsc::UnboundedSender<ImageAsset>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                initial: None,
                images: Mutex::new(Some(rx)),
            },
            tx,
        )
    }

    /// Image reported as already resolved; without one, the
    /// placeholder handed to `initial_image` is echoed back.
    pub fn with_initial(mut self, image: ImageAsset) -> Self {
        self.initial = Some(image);
        self
    }
}

#[async_trait]
impl ThumbnailLoader for MockThumbnailLoader {
    type Error = MockThumbnailLoaderError;

    fn initial_image(&self, _node: &Node, _kind: ImageKind, placeholder: &ImageAsset) -> ImageAsset {
        self.initial.clone().unwrap_or_else(|| placeholder.clone())
    }

    async fn load_image(
        &self,
        _node: &Node,
        _kind: ImageKind,
    ) -> Result<BoxStream<'static, ImageAsset>, Self::Error> {
        let rx = self
            .images
            .lock()
            .take()
            .ok_or(MockThumbnailLoaderError::StreamTaken)?;
        Ok(stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|image| (image, rx))
        })
        .boxed())
    }
}
