use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::core::DataMode;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Portal backend base URL; CLI flag and env var override this.
    pub api_base: Option<String>,

    /// Directories scanned for fixture JSON files.
    #[serde(default)]
    pub fixture_paths: Vec<String>,

    /// "fixture" or "api".
    pub data_mode: Option<String>,
}

impl Config {
    pub fn parsed_data_mode(&self) -> Option<DataMode> {
        parse_data_mode(self.data_mode.as_deref()?)
    }
}

pub fn parse_data_mode(value: &str) -> Option<DataMode> {
    match value.trim().to_lowercase().as_str() {
        "fixture" | "offline" => Some(DataMode::Fixture),
        "api" | "live" => Some(DataMode::Api),
        _ => None,
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("KHUDDAM_CONSOLE_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("khuddam-console").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("khuddam-console").join("config.toml"));
    }

    directories::ProjectDirs::from("org", "khuddam", "khuddam-console")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("khuddam-console"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("khuddam-console"));
    }
    directories::ProjectDirs::from("org", "khuddam", "khuddam-console")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn session_db_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("session.sqlite3"))
}

pub fn log_file_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("console.log"))
}

/// Base URL resolution order: CLI flag, env var, config file, default.
pub fn resolve_api_base(cli: Option<&str>, config: &Config) -> String {
    if let Some(base) = cli.map(str::trim).filter(|s| !s.is_empty()) {
        return base.to_string();
    }
    if let Ok(base) = std::env::var("KHUDDAM_API") {
        let base = base.trim().to_string();
        if !base.is_empty() {
            return base;
        }
    }
    if let Some(base) = config.api_base.as_deref().map(str::trim) {
        if !base.is_empty() {
            return base.to_string();
        }
    }
    DEFAULT_API_BASE.to_string()
}

pub fn fixture_roots(cli: &[String], config: &Config) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    for raw in cli.iter().chain(config.fixture_paths.iter()) {
        if let Some(path) = expand_path(raw) {
            roots.push(path);
        }
    }
    roots
}

fn expand_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(rest) = trimmed.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            return Some(home.join(rest));
        }
    }

    let mut buf = PathBuf::from(trimmed);
    if buf.is_relative() {
        if let Ok(cwd) = std::env::current_dir() {
            buf = cwd.join(buf);
        }
    }
    Some(buf)
}
