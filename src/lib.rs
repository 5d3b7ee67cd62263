//! Ingredient AI
//!
//! 食品ラベルのOCRテキストから有害成分・アレルギー対象を検出するエンジン。
//! 照合は同期・純粋計算で、辞書読み込み・履歴保存・AI提案などの
//! コラボレータはその外側で非同期に行う。

pub mod advisor;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod history;
pub mod matcher;
pub mod normalizer;
pub mod report;

pub use dictionary::{Dictionary, IngredientRecord, RiskLevel};
pub use error::{IngredientAiError, Result};
pub use matcher::{find_allergy_alerts, IngredientMatcher, MatchResult};
pub use normalizer::{normalize, NormalizedScan};
pub use report::{build_report, render_text, ScanReport};
