//! OCRテキストの正規化モジュール
//!
//! スキャン由来のノイズを照合可能な形へ正規化する。
//! - 小文字化
//! - 引用符・ハイフン異体字の統一（`’` → `'`, U+2010〜U+2015 → `-`）
//! - `[a-z0-9 \-_]` 以外の文字をスペースに置換
//! - 連続空白の圧縮とトリム
//!
//! `normalize` は純粋関数であり冪等（`normalize(normalize(x)) == normalize(x)`）。

use std::collections::HashSet;

/// 生テキストを照合用の正規形に変換する
pub fn normalize(text: &str) -> String {
    // 引用符・ハイフン異体字をASCIIへ統一
    let unified: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '\u{2019}' => '\'',
            '\u{2010}'..='\u{2015}' => '-',
            _ => c,
        })
        .collect();

    // 許可文字以外はスペースへ
    let cleaned: String = unified
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | ' ' | '-' | '_' => c,
            _ => ' ',
        })
        .collect();

    // 空白の圧縮とトリム
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 正規化済みスキャンテキスト
///
/// 照合中は不変。正規形テキストと、空白区切りトークンの集合を保持する。
#[derive(Debug, Clone)]
pub struct NormalizedScan {
    /// 正規化済みテキスト
    pub text: String,
    /// トークン集合（完全一致判定用）
    pub tokens: HashSet<String>,
}

impl NormalizedScan {
    pub fn new(raw: &str) -> Self {
        let text = normalize(raw);
        let tokens = text.split_whitespace().map(str::to_string).collect();
        Self { text, tokens }
    }

    /// 正規化後に中身が残らなかった場合（記号のみ等）
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercase_and_trim() {
        assert_eq!(normalize("  Ascorbic  ACID  "), "ascorbic acid");
    }

    #[test]
    fn test_normalize_unicode_hyphens() {
        // en dash / em dash もASCIIハイフンへ
        assert_eq!(normalize("yellow\u{2013}5"), "yellow-5");
        assert_eq!(normalize("yellow\u{2014}5"), "yellow-5");
        assert_eq!(normalize("non\u{2011}fat"), "non-fat");
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(
            normalize("Ingredients: Water, Sugar, Red 40!"),
            "ingredients water sugar red 40"
        );
    }

    #[test]
    fn test_normalize_right_single_quote() {
        // `’` は一旦 `'` になり、許可外文字としてスペース化される
        assert_eq!(normalize("baker\u{2019}s yeast"), "baker s yeast");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "Contains Yellow 5 and water",
            "  E330（クエン酸）",
            "high–fructose corn syrup!!",
            "",
            "***",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_normalize_symbols_only_is_empty() {
        assert_eq!(normalize("!!??・・・"), "");
    }

    #[test]
    fn test_normalized_scan_tokens() {
        let scan = NormalizedScan::new("Water, Sugar, Red 40");
        assert!(scan.tokens.contains("water"));
        assert!(scan.tokens.contains("40"));
        assert!(!scan.tokens.contains("red 40"));
    }
}
