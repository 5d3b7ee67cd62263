/// 照合結果（スキャン1回ごとに生成され、レポート化・履歴保存後に破棄）
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// 一致した成分ID（辞書の反復順・重複なし）
    pub matched_ids: Vec<String>,
    /// 検出したアレルギー警告語
    pub allergy_alerts: Vec<String>,
}

impl MatchResult {
    /// 有害成分もアレルギー警告も検出されなかったか
    pub fn is_all_clear(&self) -> bool {
        self.matched_ids.is_empty() && self.allergy_alerts.is_empty()
    }
}
