pub mod resolve;
pub mod serve;

use anyhow::Context;
use sqlworker_core::logging_facility::Profile;
use sqlworker_core::WorkerConfig;
use std::path::Path;

/// File and environment settings with command-line flags applied last
pub(crate) fn load_config(
    path: Option<&Path>,
    builtin_asset_path: Option<String>,
    require_asset: bool,
    log_profile: Option<Profile>,
) -> anyhow::Result<WorkerConfig> {
    let mut config = WorkerConfig::resolve(path).context("failed to load worker configuration")?;
    if let Some(asset) = builtin_asset_path {
        anyhow::ensure!(!asset.trim().is_empty(), "--builtin-asset-path must not be empty");
        config.builtin_asset_path = asset;
    }
    if require_asset {
        config.require_asset = true;
    }
    if let Some(profile) = log_profile {
        config.log_profile = profile;
    }
    Ok(config)
}
