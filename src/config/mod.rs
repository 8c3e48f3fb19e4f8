//! On-disk application preferences.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::core::estimate::DEFAULT_AVG_MONTHLY_CONTRIBUTION;
use crate::errors::{TrackerError, TrackerResult};

const APP_DIR: &str = "cofrinho";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Monthly pace used by the fixed contribution estimator.
    pub avg_monthly_contribution: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "pt-BR".into(),
            currency: "BRL".into(),
            avg_monthly_contribution: DEFAULT_AVG_MONTHLY_CONTRIBUTION,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> TrackerResult<Self> {
        let base = dirs::config_dir().ok_or_else(|| {
            TrackerError::Validation("could not resolve a configuration directory".into())
        })?;
        Self::from_base(base)
    }

    pub fn with_base_dir(base: PathBuf) -> TrackerResult<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> TrackerResult<Self> {
        let root = base.join(APP_DIR);
        ensure_dir(&root)?;
        Ok(Self {
            path: root.join(CONFIG_FILE),
        })
    }

    /// Loads the stored configuration, falling back to defaults when the
    /// file does not exist yet.
    pub fn load(&self) -> TrackerResult<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> TrackerResult<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ensure_dir(path: &Path) -> TrackerResult<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> TrackerResult<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
