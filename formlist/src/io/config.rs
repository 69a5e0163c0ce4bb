//! Host configuration stored under `.formlist/config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".formlist/config.toml";

/// Host configuration (TOML).
///
/// Missing fields default to writing submissions to stdout and re-rendering
/// the form after every event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormConfig {
    /// Append accepted submissions to this JSON Lines file instead of stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions_path: Option<PathBuf>,

    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Re-render the form after each applied event.
    pub after_each_event: bool,

    /// Print the state revision in the form header.
    pub show_revision: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            after_each_event: true,
            show_revision: false,
        }
    }
}

impl FormConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.submissions_path {
            if path.as_os_str().is_empty() {
                return Err(anyhow!("submissions_path must not be empty"));
            }
            if path.is_dir() {
                return Err(anyhow!(
                    "submissions_path {} is a directory",
                    path.display()
                ));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `FormConfig::default()`.
pub fn load_config(path: &Path) -> Result<FormConfig> {
    if !path.exists() {
        let cfg = FormConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FormConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &FormConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
