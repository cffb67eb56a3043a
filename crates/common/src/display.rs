use serde::{Deserialize, Serialize};

/// Surface a node listing is presented on.
///
/// Sensitivity evaluation only applies to the cloud drive itself;
/// every other surface suppresses the signal. The rubbish bin and
/// backups additionally opt out of sensitivity *filtering*, since
/// those views must always show everything they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    CloudDrive,
    RubbishBin,
    SharedItem,
    Backup,
    Recents,
    Favourites,
    MediaDiscovery,
}
