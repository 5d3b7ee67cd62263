//! スキャン履歴モジュール
//!
//! スキャン結果をJSONファイルに保存する。新しい順に保持し、
//! 件数上限を超えた分は切り捨てる。スキャンテキストは2000文字まで。

use crate::error::{IngredientAiError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const HISTORY_FILE_NAME: &str = "history.json";

/// 履歴に保存するスキャンテキストの最大文字数
pub const MAX_TEXT_LEN: usize = 2000;

/// 既定の保持件数
pub const DEFAULT_LIMIT: usize = 50;

/// 履歴ファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFile {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 新しい順のエントリ
    entries: Vec<HistoryEntry>,
}

/// 履歴エントリ（スキャン1回分）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// 記録日時（RFC 3339）
    pub timestamp: String,
    /// スキャンテキスト（2000文字で切り詰め）
    pub ingredients: String,
    /// 検出したアレルギー警告
    #[serde(default)]
    pub allergies_found: Vec<String>,
    /// 一致した成分ID
    #[serde(default)]
    pub harmful_notes: Vec<String>,
}

impl HistoryFile {
    const CURRENT_VERSION: u32 = 1;

    /// 履歴ファイルの既定パス（`~/.config/ingredient-ai/history.json`）
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| IngredientAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("ingredient-ai").join(HISTORY_FILE_NAME))
    }

    /// 履歴ファイルを読み込み（なければ空の履歴）
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, HistoryFile>(reader) {
            Ok(history) => {
                if history.version != Self::CURRENT_VERSION {
                    eprintln!("履歴バージョン不一致、新規作成します");
                    return Self::default();
                }
                history
            }
            Err(_) => Self::default(),
        }
    }

    /// 履歴ファイルを保存
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)
            .map_err(|e| IngredientAiError::HistorySave(e.to_string()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| IngredientAiError::HistorySave(e.to_string()))?;
        Ok(())
    }

    /// 先頭（最新）にエントリを追加し、上限まで切り詰める
    pub fn push(&mut self, raw_text: &str, allergies_found: Vec<String>, harmful_notes: Vec<String>, limit: usize) {
        let entry = HistoryEntry {
            timestamp: chrono::Local::now().to_rfc3339(),
            ingredients: truncate_chars(raw_text, MAX_TEXT_LEN),
            allergies_found,
            harmful_notes,
        };
        self.entries.insert(0, entry);
        self.entries.truncate(limit);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 履歴ファイルを削除。存在しなかった場合は false
    pub fn clear(path: &Path) -> Result<bool> {
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

impl Default for HistoryFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: Vec::new(),
        }
    }
}

/// 文字数で安全に切り詰める（バイト境界ではなく文字境界）
fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_newest_first() {
        let mut history = HistoryFile::default();
        history.push("first scan", vec![], vec![], DEFAULT_LIMIT);
        history.push("second scan", vec![], vec!["E102".into()], DEFAULT_LIMIT);

        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].ingredients, "second scan");
        assert_eq!(history.entries()[0].harmful_notes, vec!["E102".to_string()]);
    }

    #[test]
    fn test_push_respects_limit() {
        let mut history = HistoryFile::default();
        for i in 0..10 {
            history.push(&format!("scan {}", i), vec![], vec![], 3);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.entries()[0].ingredients, "scan 9");
        assert_eq!(history.entries()[2].ingredients, "scan 7");
    }

    #[test]
    fn test_text_truncated_to_limit() {
        let mut history = HistoryFile::default();
        let long_text = "a".repeat(MAX_TEXT_LEN + 500);
        history.push(&long_text, vec![], vec![], DEFAULT_LIMIT);
        assert_eq!(history.entries()[0].ingredients.chars().count(), MAX_TEXT_LEN);
    }

    #[test]
    fn test_truncate_multibyte_safe() {
        let text = "あ".repeat(10);
        assert_eq!(truncate_chars(&text, 3), "あああ");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        let mut history = HistoryFile::default();
        history.push("Water, Red 40", vec!["peanut".into()], vec!["R40".into()], DEFAULT_LIMIT);
        history.save(&path).unwrap();

        let loaded = HistoryFile::load(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.entries()[0].allergies_found, vec!["peanut".to_string()]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let history = HistoryFile::load(Path::new("/nonexistent/history.json"));
        assert!(history.is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");

        assert!(!HistoryFile::clear(&path).unwrap());

        HistoryFile::default().save(&path).unwrap();
        assert!(HistoryFile::clear(&path).unwrap());
        assert!(!path.exists());
    }
}
