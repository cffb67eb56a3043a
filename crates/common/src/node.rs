use std::fmt;

use serde::{Deserialize, Serialize};

/**
 * Nodes
 * =====
 * A node is the unit of a user's cloud drive: a file, a folder,
 *  or the drive root. This layer never owns the node graph --
 *  nodes are looked up by handle through a provider, and the
 *  parent field is a back-reference for ancestor walks, not an
 *  owning link.
 * The `marked_sensitive` flag is the owner's direct "hide this"
 *  mark. Whether a node is *treated* as sensitive also depends
 *  on its ancestors; that fold lives in the visibility layer.
 */

/// Opaque node identifier, assigned by the storage backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Handle(u64);

impl Handle {
    pub const fn new(raw: u64) -> Self {
        Handle(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    File,
    Folder,
    Root,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    handle: Handle,
    kind: NodeKind,
    name: String,
    marked_sensitive: bool,
    // back-reference only; None for the root
    parent: Option<Handle>,
}

impl Node {
    pub fn new_file(handle: Handle, name: impl Into<String>, parent: Handle) -> Self {
        Self {
            handle,
            kind: NodeKind::File,
            name: name.into(),
            marked_sensitive: false,
            parent: Some(parent),
        }
    }

    pub fn new_folder(handle: Handle, name: impl Into<String>, parent: Handle) -> Self {
        Self {
            handle,
            kind: NodeKind::Folder,
            name: name.into(),
            marked_sensitive: false,
            parent: Some(parent),
        }
    }

    pub fn root(handle: Handle) -> Self {
        Self {
            handle,
            kind: NodeKind::Root,
            name: String::new(),
            marked_sensitive: false,
            parent: None,
        }
    }

    /// Builder-style direct sensitivity mark.
    pub fn with_marked_sensitive(mut self, marked: bool) -> Self {
        self.marked_sensitive = marked;
        self
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owner's direct "hide this" mark. Ancestor sensitivity is
    /// not reflected here.
    pub fn is_marked_sensitive(&self) -> bool {
        self.marked_sensitive
    }

    pub fn set_marked_sensitive(&mut self, marked: bool) {
        self.marked_sensitive = marked;
    }

    pub fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File)
    }

    pub fn is_root(&self) -> bool {
        matches!(self.kind, NodeKind::Root)
    }
}
