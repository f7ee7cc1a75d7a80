// ============================================================================
// src/config.rs – strict config loader
// ============================================================================

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditCfg {
    /// File receiving one line per created/read/written/appended event.
    #[serde(default = "default_log_path")]
    pub log_path: String,
}

fn default_log_path() -> String {
    "filewarden-audit.log".to_string()
}

impl Default for AuditCfg {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandleCfg {
    #[serde(default = "default_true")]
    pub create_if_missing: bool,
    /// Emit a newline after every written/appended line.
    #[serde(default = "default_true")]
    pub terminate_lines: bool,
}

fn default_true() -> bool {
    true
}

impl Default for HandleCfg {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            terminate_lines: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audit: AuditCfg,
    #[serde(default)]
    pub handle: HandleCfg,
}

impl Config {
    pub fn load<P: AsRef<Path>>(p: P) -> Result<Self> {
        let s = fs::read_to_string(&p)
            .with_context(|| format!("read config: {}", p.as_ref().display()))?;
        let cfg: Self = if p.as_ref().extension().and_then(|e| e.to_str()) == Some("toml") {
            toml::from_str(&s).context("toml parse")?
        } else {
            serde_yaml::from_str(&s).context("yaml parse")?
        };
        Ok(cfg)
    }

    /// Load `p` when given and present, otherwise fall back to defaults.
    pub fn load_or_default(p: Option<&Path>) -> Result<Self> {
        match p {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }
}
