//! Configuration and data directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Directory name used under the platform cache directory.
pub const APP_DIR_NAME: &str = "cyber-quiz";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CYBER_QUIZ_DIR";

/// Top-level cyber-quiz configuration (`config.toml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Where `users.json`, `questions.json` and `admin.json` live.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Clear the terminal before each screen.
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

fn default_true() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            clear_screen: true,
        }
    }
}

/// Load config from an explicit path, or from
/// `~/.config/cyber-quiz/config.toml` if it exists.
///
/// `CYBER_QUIZ_DIR` overrides `data_dir`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => config_home()
            .map(|dir| dir.join("config.toml"))
            .filter(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        config.data_dir = Some(PathBuf::from(dir));
    }

    Ok(config)
}

fn config_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config").join(APP_DIR_NAME))
}

/// Pick the data directory: explicit flag, then config (including the env
/// override), then the user cache directory, then a dot-directory in the
/// working directory when no home is known.
pub fn resolve_data_dir(flag: Option<&Path>, config: &QuizConfig) -> PathBuf {
    resolve_data_dir_with(flag, config, |key| std::env::var_os(key).map(PathBuf::from))
}

fn resolve_data_dir_with(
    flag: Option<&Path>,
    config: &QuizConfig,
    env: impl Fn(&str) -> Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    if let Some(cache) = env("XDG_CACHE_HOME").filter(|p| p.is_absolute()) {
        return cache.join(APP_DIR_NAME);
    }
    match env("HOME") {
        Some(home) => home.join(".cache").join(APP_DIR_NAME),
        None => PathBuf::from(format!(".{APP_DIR_NAME}")),
    }
}
