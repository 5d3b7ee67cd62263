use crate::error::{IngredientAiError, Result};
use crate::history;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 成分辞書JSONのパス（未設定なら空辞書で動作）
    pub dictionary_path: Option<PathBuf>,
    /// 履歴の保持件数
    pub history_limit: usize,
    /// AI分析に使う外部CLIコマンド
    pub ai_command: String,
    pub timeout_seconds: u64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
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
            .ok_or_else(|| IngredientAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ingredient-ai").join("config.json"))
    }

    pub fn set_dictionary_path(&mut self, path: PathBuf) -> Result<()> {
        self.dictionary_path = Some(path);
        self.save()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_path: None,
            history_limit: history::DEFAULT_LIMIT,
            ai_command: "claude".into(),
            timeout_seconds: 120,
        }
    }
}
