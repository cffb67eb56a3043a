//! Integration tests for display filter composition and the
//! exclude-sensitive preference memo

mod common;

use ::common::display::DisplayMode;
use ::common::filter::FilterOption;
use ::common::provider::{FeatureFlag, NodeProvider, PreferenceProvider};

#[tokio::test]
async fn test_flag_off_disables_filtering() {
    let drive = common::setup_test_drive();
    drive.flags.disable(FeatureFlag::HiddenNodes);
    let composer = drive.composer();

    for mode in [
        DisplayMode::CloudDrive,
        DisplayMode::RubbishBin,
        DisplayMode::Backup,
        DisplayMode::Recents,
    ] {
        assert_eq!(composer.filter_option(mode), FilterOption::Disabled);
    }
}

#[tokio::test]
async fn test_bin_and_backups_never_filter() {
    // hidden nodes are not shown, so exclude-sensitive is true
    let drive = common::setup_test_drive();
    let composer = drive.composer();

    assert_eq!(
        composer.filter_option(DisplayMode::CloudDrive),
        FilterOption::NonSensitiveOnly
    );
    assert_eq!(
        composer.filter_option(DisplayMode::RubbishBin),
        FilterOption::Disabled
    );
    assert_eq!(
        composer.filter_option(DisplayMode::Backup),
        FilterOption::Disabled
    );
}

#[tokio::test]
async fn test_show_hidden_preference_disables_filtering() {
    let drive = common::setup_test_drive();
    drive.preferences.set_show_hidden_nodes(true);
    let composer = drive.composer();

    assert_eq!(
        composer.filter_option(DisplayMode::CloudDrive),
        FilterOption::Disabled
    );
}

#[tokio::test]
async fn test_preference_memoized_until_reset() {
    let drive = common::setup_test_drive();
    let composer = drive.composer();

    assert_eq!(
        composer.filter_option(DisplayMode::CloudDrive),
        FilterOption::NonSensitiveOnly
    );

    // flipping the toggle alone leaves the memo in place
    drive.preferences.set_show_hidden_nodes(true);
    assert_eq!(
        composer.filter_option(DisplayMode::CloudDrive),
        FilterOption::NonSensitiveOnly
    );

    // the reset before a fresh search picks the change up
    composer.reset_sensitivity_setting();
    assert_eq!(
        composer.filter_option(DisplayMode::CloudDrive),
        FilterOption::Disabled
    );
}

#[tokio::test]
async fn test_composed_filter_drives_search() -> anyhow::Result<()> {
    let drive = common::setup_test_drive();
    let photos = drive.add_folder(10, "photos", common::ROOT, false);
    drive.add_file(11, "beach.jpg", photos.handle());
    let private = drive.add_folder(12, "private", photos.handle(), true);
    drive.add_file(13, "door-code.png", private.handle());

    let composer = drive.composer();

    // cloud drive hides the marked folder and its descendants
    let filter = composer.search_filter(photos.handle(), None, DisplayMode::CloudDrive);
    let listed = drive.nodes.search(&filter).await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), "beach.jpg");

    let filter = composer.search_filter(private.handle(), None, DisplayMode::CloudDrive);
    assert!(drive.nodes.search(&filter).await?.is_empty());

    // the rubbish bin would list everything it holds
    let filter = composer.search_filter(photos.handle(), None, DisplayMode::RubbishBin);
    assert_eq!(drive.nodes.search(&filter).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_name_query_composes_with_sensitivity() -> anyhow::Result<()> {
    let drive = common::setup_test_drive();
    let photos = drive.add_folder(10, "photos", common::ROOT, false);
    drive.add_file(11, "beach.jpg", photos.handle());
    drive.add_file(12, "notes.txt", photos.handle());

    let composer = drive.composer();
    let filter = composer.search_filter(photos.handle(), Some("beach"), DisplayMode::CloudDrive);
    let hits = drive.nodes.search(&filter).await?;

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name(), "beach.jpg");
    Ok(())
}
