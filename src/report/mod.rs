//! スキャンレポート生成モジュール
//!
//! 照合結果を表示・保存用の構造化レポートへ変換する。
//! I/Oは行わず、呼び出し側（CLI・履歴）がレンダリング結果を消費する。

use crate::dictionary::IngredientRecord;
use serde::{Deserialize, Serialize};

/// 毒性の未記載時に表示する既定値
const NOT_AVAILABLE: &str = "N/A";

/// スキャン1回分のレポート
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    /// 検出件数
    pub matched_count: usize,

    /// 検出した成分の詳細
    pub items: Vec<ReportItem>,

    /// アレルギー警告
    #[serde(default)]
    pub allergy_alerts: Vec<String>,
}

/// レポート1項目
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub risk_level: String,
    pub description: String,
    pub toxicity_acute: String,
    pub toxicity_chronic: String,
    /// (法域, 規制状況) の一覧
    pub regulatory_status: Vec<(String, String)>,
    pub health_effects: Vec<String>,
    pub references: Vec<String>,
}

impl ScanReport {
    /// 検出ゼロ（オールクリア）か
    pub fn is_all_clear(&self) -> bool {
        self.matched_count == 0 && self.allergy_alerts.is_empty()
    }
}

/// 照合済みレコードからレポートを組み立てる
pub fn build_report(records: &[&IngredientRecord], allergy_alerts: &[String]) -> ScanReport {
    let items = records.iter().map(|r| build_item(r)).collect::<Vec<_>>();

    ScanReport {
        matched_count: items.len(),
        items,
        allergy_alerts: allergy_alerts.to_vec(),
    }
}

fn build_item(record: &IngredientRecord) -> ReportItem {
    let (acute, chronic) = match &record.toxicity {
        Some(tox) => (
            tox.acute.clone().unwrap_or_else(|| NOT_AVAILABLE.into()),
            tox.chronic.clone().unwrap_or_else(|| NOT_AVAILABLE.into()),
        ),
        None => (NOT_AVAILABLE.into(), NOT_AVAILABLE.into()),
    };

    ReportItem {
        id: record.id.clone(),
        name: record.name.clone(),
        category: record.category.clone(),
        risk_level: record.risk_level.to_string(),
        description: record.description.clone(),
        toxicity_acute: acute,
        toxicity_chronic: chronic,
        regulatory_status: record
            .regulatory_status
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        health_effects: record.health_effects.iter().map(|h| h.effect().to_string()).collect(),
        references: record.references.clone(),
    }
}

/// コンソール表示用のテキストを生成する
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();

    if !report.allergy_alerts.is_empty() {
        out.push_str(&format!(
            "⚠️ アレルギー警告: {}\n\n",
            report.allergy_alerts.join(", ")
        ));
    }

    if report.matched_count == 0 {
        out.push_str("✨ 有害成分は検出されませんでした\n");
        return out;
    }

    out.push_str(&format!("⚠️ 有害成分を{}件検出\n", report.matched_count));

    for item in &report.items {
        out.push_str(&format!(
            "\n[{}] {} ({} / リスク: {})\n",
            item.id, item.name, item.category, item.risk_level
        ));
        if !item.description.is_empty() {
            out.push_str(&format!("  {}\n", item.description));
        }
        out.push_str(&format!(
            "  毒性: 急性 {} / 慢性 {}\n",
            item.toxicity_acute, item.toxicity_chronic
        ));
        for (region, status) in &item.regulatory_status {
            out.push_str(&format!("  規制 [{}]: {}\n", region, status));
        }
        if !item.health_effects.is_empty() {
            out.push_str("  健康影響:\n");
            for effect in &item.health_effects {
                out.push_str(&format!("    - {}\n", effect));
            }
        }
        for reference in &item.references {
            out.push_str(&format!("  出典: {}\n", reference));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;

    fn sample_dictionary() -> Dictionary {
        Dictionary::from_json(
            r#"[{
                "id": "E102",
                "name": "Tartrazine",
                "category": "Artificial Color",
                "riskLevel": "Moderate",
                "description": "Synthetic yellow azo dye.",
                "toxicity": {"acute": "low"},
                "regulatoryStatus": {"EU": "warning label required", "US": "approved"},
                "healthEffects": [{"effect": "hyperactivity"}],
                "references": ["https://example.org/e102"]
            }]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_build_report_fields() {
        let dict = sample_dictionary();
        let records: Vec<_> = dict.iter().collect();
        let report = build_report(&records, &[]);

        assert_eq!(report.matched_count, 1);
        let item = &report.items[0];
        assert_eq!(item.name, "Tartrazine");
        assert_eq!(item.risk_level, "Moderate");
        assert_eq!(item.toxicity_acute, "low");
        // chronic 未記載は N/A
        assert_eq!(item.toxicity_chronic, "N/A");
        assert_eq!(item.regulatory_status.len(), 2);
        assert_eq!(item.health_effects, vec!["hyperactivity".to_string()]);
    }

    #[test]
    fn test_toxicity_absent_defaults_na() {
        let dict = Dictionary::from_json(r#"[{"id": "X", "name": "Thing"}]"#).unwrap();
        let records: Vec<_> = dict.iter().collect();
        let report = build_report(&records, &[]);
        assert_eq!(report.items[0].toxicity_acute, "N/A");
        assert_eq!(report.items[0].toxicity_chronic, "N/A");
    }

    #[test]
    fn test_all_clear_report() {
        let report = build_report(&[], &[]);
        assert!(report.is_all_clear());
        assert!(render_text(&report).contains("検出されませんでした"));
    }

    #[test]
    fn test_render_text_with_matches() {
        let dict = sample_dictionary();
        let records: Vec<_> = dict.iter().collect();
        let report = build_report(&records, &["peanut".to_string()]);

        let text = render_text(&report);
        assert!(text.contains("アレルギー警告: peanut"));
        assert!(text.contains("1件検出"));
        assert!(text.contains("[E102] Tartrazine"));
        assert!(text.contains("急性 low / 慢性 N/A"));
    }

    #[test]
    fn test_report_json_round_trip() {
        let dict = sample_dictionary();
        let records: Vec<_> = dict.iter().collect();
        let report = build_report(&records, &[]);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"matchedCount\":1"));
        assert!(json.contains("\"riskLevel\":\"Moderate\""));
    }
}
