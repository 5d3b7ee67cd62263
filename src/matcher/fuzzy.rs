//! 保守的ファジー照合
//!
//! OCRの軽微な読み誤り（1〜2文字の置換・脱落）だけを拾うための
//! 二次チェック。短い文字列は誤検出しやすいため一切対象にしない。

/// ファジー許容する最短文字列長（空白除去後）
pub const MIN_FUZZY_LEN: usize = 6;

/// 編集距離の許容比率（distance / max_len がこれ以下なら一致扱い）
pub const MAX_FUZZY_RATIO: f64 = 0.15;

/// Levenshtein編集距離（挿入・削除・置換 各コスト1）
///
/// 古典的なDPテーブル法。O(m·n)。
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}

/// 保守的ファジー照合
///
/// 候補とテキスト全体を空白除去した上で比較する。
/// 短い文字列（6文字未満）は対象外、許容比率は15%まで。
pub fn conservative_fuzzy_match(candidate: &str, text: &str) -> bool {
    let a: String = candidate.split_whitespace().collect();
    let b: String = text.split_whitespace().collect();

    let max_len = a.chars().count().max(b.chars().count());
    if max_len < MIN_FUZZY_LEN {
        return false;
    }

    let dist = levenshtein(&a, &b);
    (dist as f64 / max_len as f64) <= MAX_FUZZY_RATIO
}
