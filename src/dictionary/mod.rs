//! 成分辞書モジュール
//!
//! 有害成分マスタ（JSON）の読み込みと参照を担う。
//! - トップレベル配列 / `{"harmfulIngredients": [...]}` の両形式を受理
//! - `name` を欠くエントリや形式不正エントリはスキップ（致命エラーにしない）
//! - 読み込み後は不変。未読み込み状態は空の辞書として扱う

use crate::error::{IngredientAiError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// リスクレベル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// 毒性情報（急性・慢性）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Toxicity {
    #[serde(default)]
    pub acute: Option<String>,

    #[serde(default)]
    pub chronic: Option<String>,
}

/// 健康影響の1項目
///
/// 元データはオブジェクト形式（`{"effect": "..."}`）だが、
/// 文字列のみのエントリも受理する。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HealthEffect {
    Text(String),
    Detailed { effect: String },
}

impl HealthEffect {
    pub fn effect(&self) -> &str {
        match self {
            HealthEffect::Text(s) => s,
            HealthEffect::Detailed { effect } => effect,
        }
    }
}

/// 成分マスタのエントリ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    /// 一意なID（添加物コードを含むことがある。例: "E102"）
    #[serde(default)]
    pub id: String,

    /// 正式名称
    #[serde(default)]
    pub name: String,

    /// 別名・同義語
    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub risk_level: RiskLevel,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub toxicity: Option<Toxicity>,

    /// 法域名 → 規制状況
    #[serde(default)]
    pub regulatory_status: BTreeMap<String, String>,

    #[serde(default)]
    pub health_effects: Vec<HealthEffect>,

    /// 出典URL
    #[serde(default)]
    pub references: Vec<String>,
}

/// 成分辞書
///
/// スキャンの寿命を通して読み取り専用。`Default`（空）が「未読み込み」を表し、
/// 空辞書での照合は常にゼロ件となる。
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    records: Vec<IngredientRecord>,
}

impl Dictionary {
    /// JSONファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IngredientAiError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| IngredientAiError::DictionaryLoad(format!("JSONパースエラー: {}", e)))?;

        // 配列そのもの、または harmfulIngredients フィールドの配列を受理
        let entries = match &value {
            serde_json::Value::Array(arr) => arr.as_slice(),
            serde_json::Value::Object(obj) => match obj.get("harmfulIngredients") {
                Some(serde_json::Value::Array(arr)) => arr.as_slice(),
                _ => {
                    return Err(IngredientAiError::DictionaryLoad(
                        "配列または harmfulIngredients フィールドが必要です".into(),
                    ))
                }
            },
            _ => {
                return Err(IngredientAiError::DictionaryLoad(
                    "配列または harmfulIngredients フィールドが必要です".into(),
                ))
            }
        };

        let mut records = Vec::with_capacity(entries.len());
        let mut seen_ids = std::collections::HashSet::new();

        for entry in entries {
            // 形式不正エントリはスキップして継続
            let record: IngredientRecord = match serde_json::from_value(entry.clone()) {
                Ok(r) => r,
                Err(_) => continue,
            };

            // name欠落はエントリごとスキップ
            if record.name.trim().is_empty() {
                continue;
            }

            // IDは辞書内で一意（重複は先勝ち）
            if !record.id.is_empty() && !seen_ids.insert(record.id.clone()) {
                eprintln!("成分辞書: ID重複をスキップ: {}", record.id);
                continue;
            }

            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn iter(&self) -> impl Iterator<Item = &IngredientRecord> {
        self.records.iter()
    }

    /// ID検索
    pub fn find(&self, id: &str) -> Option<&IngredientRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
