//! Shared test utilities for visibility integration tests
#![allow(dead_code)]

use std::sync::Arc;

use common::events::UpdateBus;
use common::node::{Handle, Node};
use common::provider::{
    FeatureFlag, MemoryAccount, MemoryFeatureFlags, MemoryNodeProvider, MemoryPreferences,
    StaticSystemLocations, WellKnownLocation,
};
use visibility::checker::SensitivityChecker;
use visibility::composer::DisplayFilterComposer;
use visibility::monitor::SensitivityMonitor;
use visibility::preference::ExcludeSensitivePreference;

pub const ROOT: Handle = Handle::new(1);
pub const CAMERA_UPLOADS: Handle = Handle::new(0xCA);
pub const BACKUPS_ROOT: Handle = Handle::new(0xBA);

/// A small in-memory cloud drive with all providers wired up:
/// hidden-nodes flag on, entitled account, hidden nodes not shown,
/// camera-uploads and backups registered as system locations.
pub struct TestDrive {
    pub nodes: MemoryNodeProvider,
    pub bus: UpdateBus,
    pub flags: Arc<MemoryFeatureFlags>,
    pub account: Arc<MemoryAccount>,
    pub preferences: Arc<MemoryPreferences>,
    pub locations: Arc<StaticSystemLocations>,
}

/// Install a subscriber once so failing tests print decision traces
/// when `RUST_LOG` is set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn setup_test_drive() -> TestDrive {
    init_tracing();

    let nodes = MemoryNodeProvider::new();
    nodes.insert(Node::root(ROOT));
    nodes.insert(Node::new_folder(CAMERA_UPLOADS, "Camera Uploads", ROOT));
    nodes.insert(Node::new_folder(BACKUPS_ROOT, "Backups", ROOT));

    TestDrive {
        nodes,
        bus: UpdateBus::default(),
        flags: Arc::new(MemoryFeatureFlags::with_enabled([FeatureFlag::HiddenNodes])),
        account: Arc::new(MemoryAccount::new(true)),
        preferences: Arc::new(MemoryPreferences::new(false)),
        locations: Arc::new(StaticSystemLocations::new([
            (CAMERA_UPLOADS, WellKnownLocation::CameraUploads),
            (BACKUPS_ROOT, WellKnownLocation::BackupsRoot),
        ])),
    }
}

impl TestDrive {
    pub fn checker(&self) -> SensitivityChecker<MemoryNodeProvider> {
        SensitivityChecker::new(
            self.flags.clone(),
            self.locations.clone(),
            self.account.clone(),
            self.nodes.clone(),
        )
    }

    pub fn preference(&self) -> ExcludeSensitivePreference {
        ExcludeSensitivePreference::new(self.flags.clone(), self.preferences.clone())
    }

    pub fn composer(&self) -> DisplayFilterComposer {
        DisplayFilterComposer::new(self.preference())
    }

    pub fn monitor(&self) -> SensitivityMonitor<MemoryNodeProvider> {
        SensitivityMonitor::new(self.bus.clone(), self.nodes.clone())
    }

    /// Insert a folder under the given parent and return it.
    pub fn add_folder(&self, handle: u64, name: &str, parent: Handle, sensitive: bool) -> Node {
        let node =
            Node::new_folder(Handle::new(handle), name, parent).with_marked_sensitive(sensitive);
        self.nodes.insert(node.clone());
        node
    }

    /// Insert a file under the given parent and return it.
    pub fn add_file(&self, handle: u64, name: &str, parent: Handle) -> Node {
        let node = Node::new_file(Handle::new(handle), name, parent);
        self.nodes.insert(node.clone());
        node
    }
}
