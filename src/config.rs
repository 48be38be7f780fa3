use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

fn default_server() -> String {
    "http://localhost:2443".to_string()
}

/// Client configuration stored under ~/.config/kbctl/kbctl.toml
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    /// Base URL of the wiki backend
    #[serde(default = "default_server")]
    pub server: String,
    /// Bearer token obtained via `kbctl login`
    #[serde(default)]
    pub token: Option<String>,
    /// Known knowledge-base ids; auth groups are scoped per kb
    #[serde(default)]
    pub kb_ids: Vec<String>,
    /// Preselected kb for the group screen when several are known
    #[serde(default)]
    pub default_kb: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: default_server(),
            token: None,
            kb_ids: Vec::new(),
            default_kb: None,
        }
    }
}

fn config_file_path() -> Result<PathBuf> {
    // KBCTL_CONFIG overrides the default location
    let cfg = match env::var("KBCTL_CONFIG") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => dirs::config_dir()
            .context("could not determine config directory")?
            .join("kbctl")
            .join("kbctl.toml"),
    };
    if let Some(parent) = cfg.parent() {
        fs::create_dir_all(parent).context("creating config directory")?;
    }
    Ok(cfg)
}

impl Config {
    /// Load the config from disk. If the config file does not exist,
    /// create a default config file and return the default.
    pub fn load() -> Result<Config> {
        let cfg_path = config_file_path()?;
        if !cfg_path.exists() {
            let default = Config::default();
            let toml = toml::to_string_pretty(&default).context("serializing default config")?;
            fs::write(&cfg_path, toml)
                .with_context(|| format!("writing default config to {}", cfg_path.display()))?;
            return Ok(default);
        }
        let s = fs::read_to_string(&cfg_path)
            .with_context(|| format!("reading config {}", cfg_path.display()))?;
        let c: Config = toml::from_str(&s).context("parsing config toml")?;
        Ok(c)
    }

    /// Save the current config to disk (overwrites file)
    pub fn save(&self) -> Result<()> {
        let cfg_path = config_file_path()?;
        let toml = toml::to_string_pretty(self).context("serializing config to toml")?;
        fs::write(cfg_path, toml).context("writing config file")?;
        Ok(())
    }

    /// Register a kb id if it is not already known and persist the change
    pub fn remember_kb(&mut self, kb_id: &str) -> Result<()> {
        if !self.kb_ids.iter().any(|id| id == kb_id) {
            self.kb_ids.push(kb_id.to_string());
            return self.save();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_config_path<F: FnOnce()>(path: &std::path::Path, f: F) {
        unsafe { env::set_var("KBCTL_CONFIG", path) };
        f();
        unsafe { env::remove_var("KBCTL_CONFIG") };
    }

    #[test]
    #[serial]
    fn load_writes_a_default_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kbctl.toml");
        with_config_path(&path, || {
            let cfg = Config::load().unwrap();
            assert!(path.exists());
            assert_eq!(cfg.server, default_server());
            assert!(cfg.token.is_none());
        });
    }

    #[test]
    #[serial]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kbctl.toml");
        with_config_path(&path, || {
            let mut cfg = Config::default();
            cfg.server = "https://wiki.example".to_string();
            cfg.token = Some("tok-123".to_string());
            cfg.kb_ids = vec!["kb-1".to_string()];
            cfg.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.server, "https://wiki.example");
            assert_eq!(loaded.token.as_deref(), Some("tok-123"));
            assert_eq!(loaded.kb_ids, vec!["kb-1"]);
        });
    }

    #[test]
    #[serial]
    fn remember_kb_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kbctl.toml");
        with_config_path(&path, || {
            let mut cfg = Config::default();
            cfg.remember_kb("kb-1").unwrap();
            cfg.remember_kb("kb-1").unwrap();
            cfg.remember_kb("kb-2").unwrap();
            assert_eq!(cfg.kb_ids, vec!["kb-1", "kb-2"]);
        });
    }

    #[test]
    fn default_round_trips_through_toml() {
        let default = Config::default();
        let s = toml::to_string_pretty(&default).unwrap();
        let parsed: Config = toml::from_str(&s).unwrap();
        assert_eq!(parsed.server, default.server);
        assert!(parsed.token.is_none());
        assert!(parsed.kb_ids.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("server = \"https://wiki.example\"").unwrap();
        assert_eq!(parsed.server, "https://wiki.example");
        assert!(parsed.token.is_none());
        assert!(parsed.default_kb.is_none());
    }
}
