//! Configuration loading for seolens

mod schema;

pub use schema::{CliOverrides, Config, API_URL_ENV_VARS, DEFAULT_HISTORY_FILENAME};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".seolensrc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => load_config_with_extends(&path, &mut HashSet::new()),
        None => Ok(Config::default()),
    }
}

/// Load config, then layer environment and CLI values on top
pub fn resolve_config(
    work_dir: &Path,
    custom_path: Option<&Path>,
    cli: &CliOverrides,
) -> Result<Config> {
    Ok(load_config(work_dir, custom_path)?
        .merge_with_env(|name| std::env::var(name).ok())
        .merge_with_cli(cli))
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    // Prevent circular extends
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_config = resolve_extends(config_path, &extends, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Resolve an extends reference (relative to the referencing file, or absolute)
fn resolve_extends(
    config_path: &Path,
    extends: &str,
    visited: &mut HashSet<PathBuf>,
) -> Result<Config> {
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let extends_path = if Path::new(extends).is_absolute() {
        PathBuf::from(extends)
    } else {
        config_dir.join(extends)
    };

    // Ensure it has .json extension
    let extends_path = if extends_path.extension().is_none() {
        extends_path.with_extension("json")
    } else {
        extends_path
    };

    if !extends_path.exists() {
        anyhow::bail!(
            "Extended config not found: {} (referenced from {})",
            extends_path.display(),
            config_path.display()
        );
    }

    load_config_with_extends(&extends_path, visited)
}

/// Search for .seolensrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Default config written by `seolens init`
pub fn default_config_json(api_url: &str, threshold: Option<f64>) -> String {
    let value = serde_json::json!({
        "apiUrl": api_url,
        "timeoutSecs": crate::client::DEFAULT_TIMEOUT_SECS,
        "threshold": threshold,
        "history": true,
        "historyFile": DEFAULT_HISTORY_FILENAME,
    });
    let mut out = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path(), None).unwrap();
        let settings = config.client_settings();
        assert_eq!(settings.base_url, "http://localhost:5000/api");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert!(config.history_enabled());
    }

    #[test]
    fn explicit_missing_config_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(Path::new("nope.json"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn config_found_in_parent_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "apiUrl": "http://provider.internal/api", "timeoutSecs": 5 }"#,
        )
        .unwrap();
        let sub = dir.path().join("reports");
        fs::create_dir(&sub).unwrap();

        let config = load_config(&sub, None).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://provider.internal/api"));
        assert_eq!(config.client_settings().timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config: Config = serde_json::from_str(r#"{ "timeoutSecs": 0 }"#).unwrap();
        assert_eq!(config.client_settings().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_extends() {
        let dir = TempDir::new().unwrap();

        let base_path = dir.path().join("base.json");
        let mut base_file = fs::File::create(&base_path).unwrap();
        writeln!(
            base_file,
            r#"{{ "apiUrl": "http://base/api", "threshold": 6.0, "history": false }}"#
        )
        .unwrap();

        let child_path = dir.path().join(CONFIG_FILENAME);
        let mut child_file = fs::File::create(&child_path).unwrap();
        writeln!(child_file, r#"{{ "extends": "./base", "threshold": 8.0 }}"#).unwrap();

        let config = load_config(dir.path(), None).unwrap();
        // Child threshold overrides base
        assert_eq!(config.threshold, Some(8.0));
        // Base values are inherited
        assert_eq!(config.api_url.as_deref(), Some("http://base/api"));
        assert!(!config.history_enabled());
    }

    #[test]
    fn circular_extends_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), r#"{ "extends": "./b.json" }"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{ "extends": "./a.json" }"#).unwrap();

        let err = load_config(dir.path(), Some(Path::new("a.json"))).unwrap_err();
        assert!(format!("{:#}", err).contains("Circular extends"));
    }

    #[test]
    fn precedence_cli_over_env_over_file() {
        let file: Config = serde_json::from_str(r#"{ "apiUrl": "http://file/api" }"#).unwrap();

        let env_only = file
            .clone()
            .merge_with_env(|name| (name == "SEOLENS_API_URL").then(|| "http://env/api".to_string()));
        assert_eq!(env_only.api_url.as_deref(), Some("http://env/api"));

        let cli = CliOverrides {
            api_url: Some("http://cli/api".to_string()),
            no_history: true,
            ..CliOverrides::default()
        };
        let merged = env_only.merge_with_cli(&cli);
        assert_eq!(merged.api_url.as_deref(), Some("http://cli/api"));
        assert!(!merged.history_enabled());
    }

    #[test]
    fn legacy_env_name_is_honoured_and_blank_ignored() {
        let config = Config::default().merge_with_env(|name| match name {
            "SEOLENS_API_URL" => Some("  ".to_string()),
            "REACT_APP_API_URL" => Some("http://legacy/api".to_string()),
            _ => None,
        });
        assert_eq!(config.api_url.as_deref(), Some("http://legacy/api"));
    }

    #[test]
    fn history_path_relative_to_work_dir() {
        let config: Config = serde_json::from_str(r#"{ "historyFile": "data/h.json" }"#).unwrap();
        assert_eq!(
            config.history_path(Path::new("/work")),
            PathBuf::from("/work/data/h.json")
        );
        assert_eq!(
            Config::default().history_path(Path::new("/work")),
            PathBuf::from("/work").join(DEFAULT_HISTORY_FILENAME)
        );
    }

    #[test]
    fn default_config_json_parses_back() {
        let json = default_config_json("http://localhost:5000/api", Some(7.0));
        let config: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config.threshold, Some(7.0));
        assert_eq!(config.timeout_secs, Some(30));
    }
}
