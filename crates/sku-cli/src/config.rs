//! Locating the configuration file.

use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "SKU_CONFIG";

/// File used when neither `--config` nor `SKU_CONFIG` is given.
pub const DEFAULT_CONFIG_FILE: &str = "sku_config.json";

/// `--config`, then `$SKU_CONFIG`, then `./sku_config.json`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    resolve_with_env(explicit, std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
}

fn resolve_with_env(explicit: Option<&Path>, from_env: Option<PathBuf>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| from_env.filter(|path| !path.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
