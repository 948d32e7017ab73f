//! Configuration loading and discovery.
//!
//! Sources are merged with figment, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config: `~/.config/texcheck/config.<ext>`
//! 3. Project config: `.texcheck.<ext>` or `texcheck.<ext>` in the search
//!    directory or the nearest parent that has one
//! 4. Files passed explicitly (`--config`)
//! 5. `TEXCHECK_*` environment variables
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use texcheck_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::from(".");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! assert!(config.skip_checks.is_empty());
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// The configuration for texcheck.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level when neither `RUST_LOG` nor `-q`/`-v` is given.
    pub log_level: LogLevel,
    /// Directory for log files. No file log is written when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Upper-case tokens that need no definition, on top of the built-in list.
    pub known_acronyms: Vec<String>,
    /// Tokens with two leading capitals that are fine, on top of the built-in list.
    pub allowed_double_caps: Vec<String>,
    /// Check ids never run (see `texcheck --list-checks`).
    pub skip_checks: Vec<String>,
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors only.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were loaded.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Project config files, ordered low→high precedence.
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file, if one exists.
    pub user_file: Option<Utf8PathBuf>,
    /// Files given explicitly.
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions, lowest precedence first.
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG lookup and config file names.
const APP_NAME: &str = "texcheck";

/// Prefix for environment overrides, e.g. `TEXCHECK_LOG_LEVEL=debug`.
const ENV_PREFIX: &str = "TEXCHECK_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    /// Stop walking up at a directory containing this entry.
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader that reads user config and stops at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/texcheck/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the project search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Deserialize`] if a source is malformed or an explicit
    /// file is missing.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = find_user_config()
        {
            figment = merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // TEXCHECK_LOG_PATH belongs to the file logger, not to Config.
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(&["LOG_PATH"])
                .lowercase(true),
        );

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            log_level = config.log_level.as_str(),
            skipped = config.skip_checks.len(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Config files in the closest directory that has any, dotfiles first.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
                .iter()
                .flat_map(|stem| CONFIG_EXTENSIONS.iter().map(move |ext| format!("{stem}.{ext}")))
                .map(|name| dir.join(name))
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }

            // A config beside the marker still counts.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let config_dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// The user config directory.
///
/// `~/.config/texcheck/` on Linux, `~/Library/Application Support/texcheck/`
/// on macOS.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes loader tests with the ones that set `TEXCHECK_*` variables.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path).unwrap()
    }

    fn load_file(path: &Utf8Path) -> Config {
        ConfigLoader::new()
            .with_user_config(false)
            .with_file(path)
            .load()
            .unwrap()
            .0
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.log_dir.is_none());
        assert!(config.known_acronyms.is_empty());
        assert!(config.allowed_double_caps.is_empty());
        assert!(config.skip_checks.is_empty());
    }

    #[test]
    fn test_loader_builds_with_defaults() {
        let _lock = lock_env();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn test_toml_file_fields() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"log_level = "debug"
log_dir = "/tmp/texcheck"
known_acronyms = ["NASA", "CERN"]
allowed_double_caps = ["THz"]
skip_checks = ["non-ascii"]
"#,
        )
        .unwrap();

        let config = load_file(&utf8(path));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_dir.as_deref().map(Utf8Path::as_str), Some("/tmp/texcheck"));
        assert_eq!(config.known_acronyms, vec!["NASA", "CERN"]);
        assert_eq!(config.allowed_double_caps, vec!["THz"]);
        assert_eq!(config.skip_checks, vec!["non-ascii"]);
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let base = tmp.path().join("base.toml");
        fs::write(&base, r#"log_level = "warn""#).unwrap();
        let over = tmp.path().join("override.json");
        fs::write(&over, r#"{"log_level": "error"}"#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(base))
            .with_file(utf8(over.clone()))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.primary_file(), Some(utf8(over).as_path()));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(tmp.path().join("absent.toml")))
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, r#"log_level = "loud""#).unwrap();
        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(utf8(path))
            .load();
        assert!(result.is_err());
    }

    #[test]
    fn test_project_config_discovery() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let project_dir = tmp.path().join("paper");
        let sub_dir = project_dir.join("figures").join("raw");
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(project_dir.join(".texcheck.toml"), r#"log_level = "debug""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(sub_dir))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn test_boundary_marker_stops_search() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".texcheck.toml"), r#"log_level = "warn""#).unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(utf8(work))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn test_config_beside_boundary_is_found() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join("texcheck.yaml"), "log_level: error\n").unwrap();

        let (config, _) = ConfigLoader::new()
            .with_user_config(false)
            .with_project_search(utf8(tmp.path().to_path_buf()))
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Error);
    }

    #[test]
    fn dotfile_before_regular() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".texcheck.toml"), r#"log_level = "debug""#).unwrap();
        fs::write(tmp.path().join("texcheck.toml"), r#"log_level = "error""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(tmp.path().to_path_buf()))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 2);
    }

    #[test]
    fn only_closest_directory_contributes() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(parent.join(".texcheck.toml"), "skip_checks = [\"non-ascii\"]\n").unwrap();
        fs::write(child.join(".texcheck.toml"), r#"log_level = "error""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(child))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert!(config.skip_checks.is_empty());
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn test_explicit_file_overrides_project_config() {
        let _lock = lock_env();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".texcheck.toml"), r#"log_level = "warn""#).unwrap();
        let over = tmp.path().join("override.toml");
        fs::write(&over, r#"log_level = "error""#).unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(utf8(tmp.path().to_path_buf()))
            .with_file(utf8(over))
            .load()
            .unwrap();

        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(sources.project_files.len(), 1);
        assert_eq!(sources.explicit_files.len(), 1);
    }

    #[test]
    fn test_user_config_dir() {
        if let Some(path) = user_config_dir() {
            assert!(path.as_str().contains("texcheck"));
        }
    }

    #[test]
    fn yaml_lists_deserialize() {
        let yaml = "known_acronyms:\n  - DFT\n  - GW\nskip_checks: [repetition]\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.known_acronyms, vec!["DFT", "GW"]);
        assert_eq!(config.skip_checks, vec!["repetition"]);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_env_var_overrides_file_config() {
        let _lock = lock_env();

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, r#"log_level = "warn""#).unwrap();

        // SAFETY: the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("TEXCHECK_LOG_LEVEL", "debug");
        }
        let config = load_file(&utf8(path));
        // SAFETY: as above.
        unsafe {
            std::env::remove_var("TEXCHECK_LOG_LEVEL");
        }

        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    #[allow(unsafe_code)]
    fn test_log_path_variable_is_not_config() {
        let _lock = lock_env();

        // SAFETY: the mutex serializes env access across tests.
        unsafe {
            std::env::set_var("TEXCHECK_LOG_PATH", "/tmp/texcheck.log");
        }
        let result = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load();
        // SAFETY: as above.
        unsafe {
            std::env::remove_var("TEXCHECK_LOG_PATH");
        }

        assert!(result.is_ok());
    }
}
