use std::path::Path;
use std::path::PathBuf;

use dash_core::config::ConfigError;
use dash_core::config::DashboardConfig;

const APP_DIR: &str = "dash";
const CONFIG_FILE: &str = "config.toml";

/// Loads the TOML config. An explicit path must exist; the default location
/// may be absent, in which case defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(DashboardConfig::default()),
        },
    };
    DashboardConfig::from_reader(&path, |raw| toml::from_str::<DashboardConfig>(raw))
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Storage directory: command-line override, then config, then platform data dir.
pub fn resolve_data_dir(config: &DashboardConfig, overridden: Option<&Path>) -> PathBuf {
    if let Some(dir) = overridden {
        return dir.to_path_buf();
    }
    if let Some(dir) = &config.storage.data_dir {
        return dir.clone();
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn explicit_toml_config_is_parsed() {
        let dir = tempdir().expect("tmpdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/tmp/dash-data\"\nslot_key = \"alt\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .expect("write");

        let config = load_config(Some(path.as_path())).expect("config");
        assert_eq!(config.storage.slot_key, "alt");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            resolve_data_dir(&config, None),
            PathBuf::from("/tmp/dash-data")
        );
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempdir().expect("tmpdir");
        let absent = dir.path().join("absent.toml");
        assert!(load_config(Some(absent.as_path())).is_err());
    }

    #[test]
    fn command_line_data_dir_wins() {
        let config = DashboardConfig::default();
        let dir = PathBuf::from("/override");
        assert_eq!(resolve_data_dir(&config, Some(dir.as_path())), dir);
    }
}
