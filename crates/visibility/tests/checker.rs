//! Integration tests for the sensitivity checker's decision cascade

mod common;

use std::sync::Arc;

use ::common::display::DisplayMode;
use ::common::node::{Handle, Node};
use ::common::provider::{FeatureFlag, MemoryAccount, MemoryFeatureFlags, StaticSystemLocations};
use ::common::sensitivity::Sensitivity;
use visibility::checker::SensitivityChecker;
use visibility::testkit::MockNodeProvider;

#[tokio::test]
async fn test_non_cloud_drive_modes_suppress() {
    let drive = common::setup_test_drive();
    let parent = drive.add_folder(10, "private", common::ROOT, true);
    let checker = drive.checker();

    for mode in [
        DisplayMode::RubbishBin,
        DisplayMode::SharedItem,
        DisplayMode::Backup,
        DisplayMode::Recents,
        DisplayMode::Favourites,
        DisplayMode::MediaDiscovery,
    ] {
        let result = checker.evaluate(Some(&parent), mode, false).await.unwrap();
        assert_eq!(result, Sensitivity::Unknown, "mode {:?}", mode);
    }
}

#[tokio::test]
async fn test_shared_item_entry_point_suppresses() {
    let drive = common::setup_test_drive();
    let checker = drive.checker();

    for sensitive in [true, false] {
        let parent = drive.add_folder(10, "folder", common::ROOT, sensitive);
        let result = checker
            .evaluate(Some(&parent), DisplayMode::CloudDrive, true)
            .await
            .unwrap();
        assert_eq!(result, Sensitivity::Unknown);
    }
}

#[tokio::test]
async fn test_missing_parent_suppresses() {
    let drive = common::setup_test_drive();
    let result = drive
        .checker()
        .evaluate(None, DisplayMode::CloudDrive, false)
        .await
        .unwrap();
    assert_eq!(result, Sensitivity::Unknown);
}

#[tokio::test]
async fn test_root_and_file_parents_suppress() {
    let drive = common::setup_test_drive();
    let checker = drive.checker();

    let root = Node::root(common::ROOT);
    let result = checker
        .evaluate(Some(&root), DisplayMode::CloudDrive, false)
        .await
        .unwrap();
    assert_eq!(result, Sensitivity::Unknown);

    let file = drive.add_file(20, "doc.pdf", common::ROOT);
    let result = checker
        .evaluate(Some(&file), DisplayMode::CloudDrive, false)
        .await
        .unwrap();
    assert_eq!(result, Sensitivity::Unknown);
}

#[tokio::test]
async fn test_system_generated_parent_suppresses_even_when_marked() {
    let drive = common::setup_test_drive();
    let camera = drive
        .nodes
        .set_marked_sensitive(common::CAMERA_UPLOADS, true)
        .unwrap();

    let result = drive
        .checker()
        .evaluate(Some(&camera), DisplayMode::CloudDrive, false)
        .await
        .unwrap();
    assert_eq!(result, Sensitivity::Unknown);
}

#[tokio::test]
async fn test_unentitled_account_forces_visible() {
    let drive = common::setup_test_drive();
    drive.account.set_entitled(false);
    let parent = drive.add_folder(10, "private", common::ROOT, true);

    // explicit non-sensitive, never a suppressed signal
    let result = drive
        .checker()
        .evaluate(Some(&parent), DisplayMode::CloudDrive, false)
        .await
        .unwrap();
    assert_eq!(result, Sensitivity::NotSensitive);
}

#[tokio::test]
async fn test_directly_marked_folder_skips_inheritance_query() {
    // the mock's inheritance query is scripted to fail, so a sensitive
    // verdict proves the short-circuit
    let nodes = MockNodeProvider::new().with_inherited_default(Err("graph unavailable"));
    let checker = SensitivityChecker::new(
        Arc::new(MemoryFeatureFlags::with_enabled([FeatureFlag::HiddenNodes])),
        Arc::new(StaticSystemLocations::default()),
        Arc::new(MemoryAccount::new(true)),
        nodes,
    );
    let parent =
        Node::new_folder(Handle::new(10), "private", Handle::new(1)).with_marked_sensitive(true);

    let result = checker
        .evaluate(Some(&parent), DisplayMode::CloudDrive, false)
        .await
        .unwrap();
    assert_eq!(result, Sensitivity::Sensitive);
}

#[tokio::test]
async fn test_marked_state_reflected_for_plain_folders() {
    let drive = common::setup_test_drive();
    let checker = drive.checker();

    for sensitive in [true, false] {
        let parent = drive.add_folder(10, "folder", common::ROOT, sensitive);
        let result = checker
            .evaluate(Some(&parent), DisplayMode::CloudDrive, false)
            .await
            .unwrap();
        assert_eq!(result, Sensitivity::from_flag(sensitive));
    }
}

#[tokio::test]
async fn test_inherited_sensitivity_counts() {
    let drive = common::setup_test_drive();
    let outer = drive.add_folder(10, "outer", common::ROOT, true);
    let inner = drive.add_folder(11, "inner", outer.handle(), false);

    let result = drive
        .checker()
        .evaluate(Some(&inner), DisplayMode::CloudDrive, false)
        .await
        .unwrap();
    assert_eq!(result, Sensitivity::Sensitive);
}

#[tokio::test]
async fn test_feature_flag_off_suppresses_everything() {
    let drive = common::setup_test_drive();
    drive.flags.disable(FeatureFlag::HiddenNodes);
    let parent = drive.add_folder(10, "private", common::ROOT, true);
    let checker = drive.checker();

    for mode in [
        DisplayMode::CloudDrive,
        DisplayMode::RubbishBin,
        DisplayMode::SharedItem,
    ] {
        let result = checker.evaluate(Some(&parent), mode, false).await.unwrap();
        assert_eq!(result, Sensitivity::Unknown);
    }
}
