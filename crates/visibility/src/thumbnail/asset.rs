use std::path::{Path, PathBuf};
use std::str::FromStr;

use mime::Mime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use common::sensitivity::Sensitivity;

/// Resolution stage of an image delivered for a node. Loaders
/// typically emit a fast thumbnail first and a sharper preview later;
/// a placeholder stands in before anything resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageKind {
    Placeholder,
    Thumbnail,
    Preview,
    Original,
}

impl ImageKind {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageKind::Placeholder)
    }
}

/// MIME type that may be absent, serialized as a bare string or null.
#[derive(Debug, Clone, PartialEq)]
pub struct MaybeMime(pub Option<Mime>);

impl MaybeMime {
    /// Guess from the file extension; unknown extensions stay `None`.
    pub fn from_path(path: &Path) -> Self {
        MaybeMime(mime_guess::from_path(path).first())
    }
}

impl Serialize for MaybeMime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0 {
            Some(mime) => serializer.serialize_str(mime.as_ref()),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for MaybeMime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(deserializer)?;
        match opt {
            Some(s) => {
                let mime = Mime::from_str(&s).map_err(serde::de::Error::custom)?;
                Ok(MaybeMime(Some(mime)))
            }
            None => Ok(MaybeMime(None)),
        }
    }
}

/// An image resolved (or pending) for a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    source: PathBuf,
    mime: MaybeMime,
    kind: ImageKind,
}

impl ImageAsset {
    pub fn new(source: impl Into<PathBuf>, kind: ImageKind) -> Self {
        let source = source.into();
        let mime = MaybeMime::from_path(&source);
        Self { source, mime, kind }
    }

    pub fn placeholder(source: impl Into<PathBuf>) -> Self {
        Self::new(source, ImageKind::Placeholder)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn mime(&self) -> Option<&Mime> {
        self.mime.0.as_ref()
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }
}

/// An image plus the sensitivity annotation rendering blurs on.
///
/// `Unknown` means annotation was suppressed for the whole stream
/// (unentitled account) and the image passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveImage {
    asset: ImageAsset,
    sensitivity: Sensitivity,
}

impl SensitiveImage {
    /// Pass-through without a sensitivity verdict.
    pub fn unannotated(asset: ImageAsset) -> Self {
        Self {
            asset,
            sensitivity: Sensitivity::Unknown,
        }
    }

    /// Annotate a resolved image. Placeholders are never blurred, so
    /// their annotation is pinned to `NotSensitive`.
    pub fn annotated(asset: ImageAsset, sensitive: bool) -> Self {
        let sensitivity = if asset.kind().is_placeholder() {
            Sensitivity::NotSensitive
        } else {
            Sensitivity::from_flag(sensitive)
        };
        Self { asset, sensitivity }
    }

    pub fn asset(&self) -> &ImageAsset {
        &self.asset
    }

    pub fn sensitivity(&self) -> Sensitivity {
        self.sensitivity
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitivity.is_sensitive()
    }
}
