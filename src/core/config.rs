//! Config file resolution, loading, and saving.

use crate::constants;
use crate::core::store::RestStoreConfig;
use crate::models::config::ConfigFile;
use crate::util::fs as cred_fs;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolve the config path from CLI arg/env (already merged by clap) or the platform default.
pub fn resolve_path(arg: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = arg {
        return Ok(path);
    }
    let Some(base) = dirs::config_dir() else {
        bail!("cannot determine config directory; pass --config or set CREDMAN_CONFIG");
    };
    Ok(base
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME))
}

pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let config: ConfigFile =
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    Ok(config)
}

/// Write the config atomically with owner-only permissions.
pub fn save(path: &Path, config: &ConfigFile) -> Result<()> {
    let content = toml::to_string_pretty(config).context("serialize config")?;
    cred_fs::ensure_parent_dir(path)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).context("create temp config")?;
    tmp.write_all(content.as_bytes()).context("write config")?;
    tmp.flush().context("flush config")?;
    cred_fs::set_permissions(tmp.path(), constants::CONFIG_FILE_MODE)?;
    tmp.persist(path)
        .map_err(|err| anyhow::anyhow!("persist config: {}", err))?;
    Ok(())
}

/// Merge file values with overrides from flags/env. Overrides win when non-empty.
pub fn store_config(
    file: &ConfigFile,
    url: Option<&str>,
    api_key: Option<&str>,
) -> RestStoreConfig {
    let pick = |over: Option<&str>, base: &Option<String>| {
        over.filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .or_else(|| base.clone())
            .unwrap_or_default()
    };
    RestStoreConfig {
        url: pick(url, &file.store.url),
        api_key: pick(api_key, &file.store.api_key),
        table: file.store.table.clone(),
        timeout: Duration::from_secs(file.store.timeout_secs.max(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = load(&dir.path().join("nope.toml")).unwrap();
        assert!(config.store.url.is_none());
        assert_eq!(config.store.table, "credentials");
        assert_eq!(config.store.timeout_secs, 10);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = ConfigFile::default();
        config.store.url = Some("https://abc.supabase.co".into());
        config.store.api_key = Some("anon".into());
        save(&path, &config).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.store.url.as_deref(), Some("https://abc.supabase.co"));
        assert_eq!(loaded.store.api_key.as_deref(), Some("anon"));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        save(&path, &ConfigFile::default()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[store]\nurl = \"https://x.example\"\n").unwrap();
        let config = load(&path).unwrap();
        assert_eq!(config.store.url.as_deref(), Some("https://x.example"));
        assert_eq!(config.store.table, "credentials");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[store\n").unwrap();
        assert!(load(&path).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut file = ConfigFile::default();
        file.store.url = Some("https://file.example".into());
        file.store.api_key = Some("file-key".into());

        let cfg = store_config(&file, Some("https://flag.example"), None);
        assert_eq!(cfg.url, "https://flag.example");
        assert_eq!(cfg.api_key, "file-key");

        let cfg = store_config(&file, Some("  "), Some("flag-key"));
        assert_eq!(cfg.url, "https://file.example");
        assert_eq!(cfg.api_key, "flag-key");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let p = resolve_path(Some(PathBuf::from("/tmp/x.toml"))).unwrap();
        assert_eq!(p, PathBuf::from("/tmp/x.toml"));
    }
}
