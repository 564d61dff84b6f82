use crate::models::Config;
use std::fs;
use std::path::PathBuf;

fn config_file() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "livetv", "LiveTV")?;
    let dir = dirs.config_dir().to_path_buf();
    let _ = fs::create_dir_all(&dir);
    Some(dir.join("livetv.json"))
}

/// Read the config file, falling back to defaults when it is missing or broken.
pub fn read_config() -> Config {
    if let Some(path) = config_file() {
        if let Ok(content) = fs::read_to_string(&path) {
            match serde_json::from_str::<Config>(&content) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("ignoring invalid config {}: {}", path.display(), e),
            }
        }
    }
    Config::default()
}

pub fn save_config(cfg: &Config) {
    if let Some(path) = config_file() {
        let json = serde_json::to_string_pretty(cfg).unwrap_or_else(|_| "{}".into());
        if let Err(e) = fs::write(&path, json) {
            log::warn!("could not write config {}: {}", path.display(), e);
        }
    }
}
