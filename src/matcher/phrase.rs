//! フレーズ照合モジュール
//!
//! 正規化済みテキストに対する決定的な照合を担う。
//! - 単語境界つき完全フレーズ一致
//! - 数字入り候補（添加物コード・色番号）の表記ゆれ展開
//! - 複数語フレーズの順序保持スキャン（OCRノイズ許容）

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref SPACES: Regex = Regex::new(r"\s+").unwrap();
    static ref HYPHEN_UNDERSCORE: Regex = Regex::new(r"[-_]+").unwrap();
}

/// 数字入りフレーズの表記ゆれ候補を生成する
///
/// 添加物コードや色番号はOCR出力で空白・ハイフンが揺れるため、
/// `yellow 5` / `yellow5` / `yellow-5` / （`yellow_5`→）`yellow 5` を試す。
/// 重複は挿入順を保って除去する。
pub fn digit_variants(phrase: &str) -> Vec<String> {
    let mut variants: Vec<String> = Vec::with_capacity(4);

    for v in [
        phrase.to_string(),
        SPACES.replace_all(phrase, "").into_owned(),
        SPACES.replace_all(phrase, "-").into_owned(),
        HYPHEN_UNDERSCORE.replace_all(phrase, " ").into_owned(),
    ] {
        if !variants.contains(&v) {
            variants.push(v);
        }
    }

    variants
}

/// 単語境界つきの部分一致判定
///
/// 大きなトークンの途中での一致（`red` vs `bored`）は拒否する。
fn has_whole_word(needle: &str, text: &str) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(needle));
    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// フレーズの各単語が左から右へ順番に現れるかを調べる
///
/// 各単語の探索は直前の一致の終端の直後から開始する（重複・後退なし）。
/// OCRノイズで単語間に余計な文字が挟まっても語順が保たれていれば拾える。
fn words_in_order(parts: &[&str], text: &str) -> bool {
    let mut pos = 0usize;

    for part in parts {
        let pattern = format!(r"\b{}\b", regex::escape(part));
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(_) => return false,
        };
        match re.find(&text[pos..]) {
            Some(m) => pos += m.end(),
            None => return false,
        }
    }

    true
}

/// フレーズがテキスト中に単語単位で現れるかを判定する
///
/// `candidate` と `text` は正規化済みであること。`tokens` は
/// `text` の空白区切りトークン集合（単語1つの場合の最終フォールバック）。
pub fn has_whole_phrase(candidate: &str, text: &str, tokens: &HashSet<String>) -> bool {
    let phrase = candidate.trim();
    if phrase.is_empty() {
        return false;
    }

    // 数字入り（`yellow 5` / `e330` 等）は表記ゆれ候補を順に試す
    if phrase.chars().any(|c| c.is_ascii_digit()) {
        return digit_variants(phrase)
            .iter()
            .any(|v| has_whole_word(v, text));
    }

    // 英字フレーズはまず完全一致
    if has_whole_word(phrase, text) {
        return true;
    }

    let parts: Vec<&str> = phrase.split_whitespace().collect();

    // 複数語なら順序保持スキャンで救済
    if parts.len() > 1 {
        return words_in_order(&parts, text);
    }

    // 単語1つならトークン完全一致
    tokens.contains(phrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::NormalizedScan;

    fn scan(text: &str) -> NormalizedScan {
        NormalizedScan::new(text)
    }

    #[test]
    fn test_digit_variants_spaced() {
        assert_eq!(
            digit_variants("yellow 5"),
            vec!["yellow 5", "yellow5", "yellow-5"]
        );
    }

    #[test]
    fn test_digit_variants_code() {
        // 空白なしのコードは変形の余地がなく1候補のみ
        assert_eq!(digit_variants("e330"), vec!["e330"]);
    }

    #[test]
    fn test_digit_variants_underscore() {
        let variants = digit_variants("yellow_5");
        assert!(variants.contains(&"yellow 5".to_string()));
    }

    #[test]
    fn test_whole_word_rejects_partial() {
        assert!(has_whole_word("red", "red dye"));
        assert!(!has_whole_word("red", "bored dye"));
    }

    #[test]
    fn test_phrase_exact_match() {
        let s = scan("contains ascorbic acid and water");
        assert!(has_whole_phrase("ascorbic acid", &s.text, &s.tokens));
    }

    #[test]
    fn test_phrase_digit_no_space() {
        let s = scan("color yellow5 added");
        assert!(has_whole_phrase("yellow 5", &s.text, &s.tokens));
    }

    #[test]
    fn test_phrase_digit_hyphenated() {
        let s = scan("contains yellow-5");
        assert!(has_whole_phrase("yellow 5", &s.text, &s.tokens));
    }

    #[test]
    fn test_phrase_words_in_order() {
        // OCRノイズで単語間にゴミが入っても語順が保たれていれば一致
        let s = scan("sodium xx benzoate");
        assert!(has_whole_phrase("sodium benzoate", &s.text, &s.tokens));
    }

    #[test]
    fn test_phrase_words_out_of_order() {
        let s = scan("benzoate of sodium");
        assert!(!has_whole_phrase("sodium benzoate", &s.text, &s.tokens));
    }

    #[test]
    fn test_phrase_single_word_token_fallback() {
        let s = scan("tartrazine");
        assert!(has_whole_phrase("tartrazine", &s.text, &s.tokens));
        assert!(!has_whole_phrase("tartrazin", &s.text, &s.tokens));
    }

    #[test]
    fn test_phrase_blank_candidate() {
        let s = scan("water");
        assert!(!has_whole_phrase("", &s.text, &s.tokens));
        assert!(!has_whole_phrase("   ", &s.text, &s.tokens));
    }
}
