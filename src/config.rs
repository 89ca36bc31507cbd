use crate::cli::OutputFormat;
use crate::error::{ClassifierError, Result};
use ledger_classifier_common::ZeroOverlapPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const TREE_PATH_ENV: &str = "LEDGER_CLASSIFIER_TREE";
pub const OUTPUT_PATH_ENV: &str = "LEDGER_CLASSIFIER_OUTPUT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tree_path: PathBuf,
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
    pub unknown_on_zero_overlap: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    /// 読み込めない設定ファイルは既定値で置き換える（`config`コマンドで修復するため）
    pub fn load_or_default() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                warn!("設定ファイルを読み込めないため既定値を使用します: {}", e);
                Self::default_config()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ClassifierError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ledger-classifier").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            tree_path: PathBuf::from("public/classification_tree.csv"),
            output_path: PathBuf::from("public/classified_entries.json"),
            output_format: OutputFormat::Json,
            unknown_on_zero_overlap: false,
        }
    }

    /// 分類マスタのパス（環境変数を優先）
    pub fn tree_path(&self) -> PathBuf {
        std::env::var_os(TREE_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| self.tree_path.clone())
    }

    /// 出力先のパス（環境変数を優先）
    pub fn output_path(&self) -> PathBuf {
        std::env::var_os(OUTPUT_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| self.output_path.clone())
    }

    pub fn zero_overlap_policy(&self) -> ZeroOverlapPolicy {
        if self.unknown_on_zero_overlap {
            ZeroOverlapPolicy::Unknown
        } else {
            ZeroOverlapPolicy::ReportBest
        }
    }
}
