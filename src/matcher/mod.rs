//! 成分照合エンジン
//!
//! ## 処理フロー
//! 1. アレルギーチェック（生テキストへの部分一致、照合より先）
//! 2. テキスト正規化
//! 3. 成分ごとの候補文字列生成（name / id / aliases）
//! 4. 汎用語ブラックリストによる候補除外
//! 5. フレーズ照合 → 保守的ファジー照合（トークン裏付けつき）
//! 6. IDで重複排除
//!
//! エンジンは同期・純粋で、辞書は読み取り専用。空入力・空辞書は
//! エラーではなくゼロ件として扱う。

pub mod fuzzy;
pub mod phrase;
pub mod types;

use crate::dictionary::{Dictionary, IngredientRecord};
use crate::normalizer::{normalize, NormalizedScan};
use lazy_static::lazy_static;
use std::collections::HashSet;
pub use types::MatchResult;

/// 単独では照合に使わない汎用語
///
/// `yellow` 単体で `Yellow 5` を誤検出しないための除外リスト。
/// 候補か成分IDに数字が含まれる場合（番号つき色素等）は除外しない。
pub const GENERIC_BLACKLIST: &[&str] = &[
    "yellow", "red", "blue", "white", "black", "green", "natural", "artificial", "flavour",
    "flavor", "colour", "color", "corn", "meal", "malted", "barley", "flour", "water", "sugar",
    "salt", "oil", "extract",
];

lazy_static! {
    static ref GENERIC_SET: HashSet<&'static str> = GENERIC_BLACKLIST.iter().copied().collect();
}

/// 成分照合エンジン
///
/// 読み込み済みの辞書を借用して構築する。辞書が空（未読み込み）の場合、
/// 照合は常にゼロ件を返す。
pub struct IngredientMatcher<'a> {
    dictionary: &'a Dictionary,
}

impl<'a> IngredientMatcher<'a> {
    pub fn new(dictionary: &'a Dictionary) -> Self {
        Self { dictionary }
    }

    /// スキャン1回分の照合を実行する
    ///
    /// アレルギーチェックは生テキストの小文字化に対する部分一致で、
    /// 有害成分照合に先立って行う。
    pub fn scan(&self, raw_text: &str, allergies: &[String]) -> MatchResult {
        MatchResult {
            allergy_alerts: find_allergy_alerts(raw_text, allergies),
            matched_ids: self.detect(raw_text),
        }
    }

    /// 有害成分を検出し、一致した成分IDを辞書順で返す
    pub fn detect(&self, raw_text: &str) -> Vec<String> {
        // 空入力は照合せずゼロ件
        if raw_text.trim().is_empty() {
            return Vec::new();
        }

        let scan = NormalizedScan::new(raw_text);
        // 記号のみ等、正規化で空になった場合も同様
        if scan.is_empty() {
            return Vec::new();
        }

        let mut matched_ids = Vec::new();
        let mut seen = HashSet::new();

        for record in self.dictionary.iter() {
            if record_matches(record, &scan) && seen.insert(record.id.clone()) {
                matched_ids.push(record.id.clone());
            }
        }

        matched_ids
    }

    /// 一致IDから成分レコードを引き直す（レポート生成用）
    pub fn matched_records(&self, result: &MatchResult) -> Vec<&'a IngredientRecord> {
        result
            .matched_ids
            .iter()
            .filter_map(|id| self.dictionary.find(id))
            .collect()
    }
}

/// アレルギー警告語を検出する
///
/// 生テキスト（正規化前）の小文字化に対する単純な部分一致。
pub fn find_allergy_alerts(raw_text: &str, allergies: &[String]) -> Vec<String> {
    let text_lower = raw_text.to_lowercase();
    allergies
        .iter()
        .filter(|a| !a.trim().is_empty())
        .filter(|a| text_lower.contains(&a.to_lowercase()))
        .cloned()
        .collect()
}

/// 成分1件がスキャンテキストに一致するか
fn record_matches(record: &IngredientRecord, scan: &NormalizedScan) -> bool {
    let candidates = build_candidates(record);

    // 1) 厳密なフレーズ照合（最初の一致で確定）
    for c in &candidates {
        if phrase::has_whole_phrase(c, &scan.text, &scan.tokens) {
            return true;
        }
    }

    // 2) 保守的ファジー照合（長い候補のみ）
    for c in &candidates {
        let stripped_len = c.chars().filter(|ch| !ch.is_whitespace()).count();
        if stripped_len < fuzzy::MIN_FUZZY_LEN {
            continue;
        }
        if fuzzy::conservative_fuzzy_match(c, &scan.text) {
            // 裏付け: 候補のいずれかの単語がトークンとして実在すること
            if c.split_whitespace().any(|w| scan.tokens.contains(w)) {
                return true;
            }
        }
    }

    false
}

/// 成分の候補文字列集合を構築する
///
/// name / id / aliases を個別に正規化し、挿入順を保って重複・空を除去。
/// 汎用語ブラックリストに該当する単独語はここで落とす。
fn build_candidates(record: &IngredientRecord) -> Vec<String> {
    let id_has_digit = record.id.chars().any(|c| c.is_ascii_digit());
    let mut candidates = Vec::new();

    for raw in std::iter::once(record.name.as_str())
        .chain(std::iter::once(record.id.as_str()))
        .chain(record.aliases.iter().map(String::as_str))
    {
        let c = normalize(raw);
        if c.is_empty() || candidates.contains(&c) {
            continue;
        }
        if is_blacklisted_generic(&c, id_has_digit) {
            continue;
        }
        candidates.push(c);
    }

    candidates
}

/// 候補が「単独の汎用語」としてブラックリストに該当するか
fn is_blacklisted_generic(candidate: &str, id_has_digit: bool) -> bool {
    if !GENERIC_SET.contains(candidate) {
        return false;
    }
    // 数字入り候補・数字入りIDの成分は番号つき表記なので除外しない
    let candidate_has_digit = candidate.chars().any(|c| c.is_ascii_digit());
    !candidate_has_digit && !id_has_digit
}
