//! エントリ分類
//!
//! ## 処理フロー
//! 1. 勘定種別で分類マスタを絞り込み（大文字小文字を区別しない）
//! 2. 候補がなければ UNKNOWN（信頼度0.0）
//! 3. 候補があればマスタ照合で最適な行を選ぶ

use crate::hierarchy::ClassificationTree;
use crate::matcher::find_best_match;
use crate::types::{ClassificationResult, ClassificationRow, Entry};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 共通トークンが全くない場合の扱い
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroOverlapPolicy {
    /// 最初の候補行を信頼度0.0で報告
    #[default]
    ReportBest,
    /// UNKNOWNとして報告
    Unknown,
}

/// 分類オプション
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassifyOptions {
    pub zero_overlap: ZeroOverlapPolicy,
}

/// 分類器
pub struct Classifier<'a> {
    tree: &'a ClassificationTree,
    options: ClassifyOptions,
}

impl<'a> Classifier<'a> {
    pub fn new(tree: &'a ClassificationTree, options: ClassifyOptions) -> Self {
        Self { tree, options }
    }

    /// 1件のエントリを分類
    pub fn classify(&self, entry: &Entry) -> ClassificationResult {
        let candidates = self.tree.candidates(&entry.account_type);

        if candidates.is_empty() {
            warn!(
                "勘定種別 '{}' の分類がありません: {}",
                entry.account_type, entry.name
            );
            return ClassificationResult::unknown(entry);
        }

        let best = find_best_match(&entry.name, candidates);
        let Some(row) = best.row else {
            return ClassificationResult::unknown(entry);
        };

        if best.score == 0.0 {
            warn!("一致するトークンがありません: {}", entry.name);
            if self.options.zero_overlap == ZeroOverlapPolicy::Unknown {
                return ClassificationResult::unknown(entry);
            }
        }

        debug!(
            "{} → {} / {} / {} (score {:.2}, {:?}, 候補{}番目)",
            entry.name,
            row.primary,
            row.secondary,
            row.tertiary,
            best.score,
            best.level,
            best.index.map_or(0, |i| i + 1)
        );

        ClassificationResult::matched(entry, row, best.score)
    }

    /// 全エントリを入力順に分類
    pub fn classify_all(&self, entries: &[Entry]) -> Vec<ClassificationResult> {
        entries.iter().map(|entry| self.classify(entry)).collect()
    }
}

/// 既定のオプションで全エントリを分類
pub fn classify_entries(
    entries: &[Entry],
    rows: &[ClassificationRow],
) -> crate::error::Result<Vec<ClassificationResult>> {
    let tree = ClassificationTree::from_rows(rows.to_vec())?;
    Ok(Classifier::new(&tree, ClassifyOptions::default()).classify_all(entries))
}

/// 分類結果の集計
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub matched: usize,
    pub unknown: usize,
    /// 信頼度1.0の件数
    pub exact: usize,
    pub mean_confidence: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        let total = results.len();
        let unknown = results.iter().filter(|r| r.is_unknown()).count();
        let exact = results.iter().filter(|r| r.confidence == 1.0).count();
        let mean_confidence = if total == 0 {
            0.0
        } else {
            results.iter().map(|r| r.confidence).sum::<f64>() / total as f64
        };

        Self {
            total,
            matched: total - unknown,
            unknown,
            exact,
            mean_confidence,
        }
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}件中 照合{}件（完全一致{}件） / 不明{}件 / 平均信頼度 {:.2}",
            self.total, self.matched, self.exact, self.unknown, self.mean_confidence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNKNOWN;

    fn tree() -> ClassificationTree {
        ClassificationTree::from_rows(vec![
            ClassificationRow::new("Asset", "Cash", "Bank Accounts", "Cash in Bank"),
            ClassificationRow::new("Asset", "Current Assets", "Receivables", "Accounts Receivable"),
            ClassificationRow::new("Liability", "Current Liabilities", "Payables", "Accounts Payable"),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_tertiary_match() {
        let tree = tree();
        let classifier = Classifier::new(&tree, ClassifyOptions::default());
        let result = classifier.classify(&Entry::new("Cash in Bank", "Asset"));
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.primary_classification, "Cash");
        assert_eq!(result.secondary_classification, "Bank Accounts");
        assert_eq!(result.tertiary_classification, "Cash in Bank");
        assert_eq!(result.master_sheet, "Asset Master Sheet");
    }

    #[test]
    fn test_account_type_case_insensitive() {
        let tree = tree();
        let classifier = Classifier::new(&tree, ClassifyOptions::default());
        let result = classifier.classify(&Entry::new("Cash in Bank", "asset"));
        assert_eq!(result.tertiary_classification, "Cash in Bank");
        // 勘定種別とシート名はエントリの表記のまま
        assert_eq!(result.account_type, "asset");
        assert_eq!(result.master_sheet, "asset Master Sheet");
    }

    #[test]
    fn test_missing_account_type_is_unknown() {
        let tree = tree();
        let classifier = Classifier::new(&tree, ClassifyOptions::default());
        let result = classifier.classify(&Entry::new("Sales", "Revenue"));
        assert_eq!(result.primary_classification, UNKNOWN);
        assert_eq!(result.secondary_classification, UNKNOWN);
        assert_eq!(result.tertiary_classification, UNKNOWN);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.master_sheet, "Revenue Master Sheet");
    }

    #[test]
    fn test_empty_tree_is_unknown() {
        let tree = ClassificationTree::default();
        let classifier = Classifier::new(&tree, ClassifyOptions::default());
        let results = classifier.classify_all(&[
            Entry::new("Cash in Bank", "Asset"),
            Entry::new("Accounts Payable", "Liability"),
        ]);
        assert!(results.iter().all(|r| r.is_unknown() && r.confidence == 0.0));
    }

    #[test]
    fn test_zero_overlap_reports_best_by_default() {
        let tree = tree();
        let classifier = Classifier::new(&tree, ClassifyOptions::default());
        let result = classifier.classify(&Entry::new("Widget Inventory", "Asset"));
        assert_eq!(result.confidence, 0.0);
        assert!(!result.is_unknown());
        assert_eq!(result.tertiary_classification, "Cash in Bank");
    }

    #[test]
    fn test_zero_overlap_unknown_policy() {
        let tree = tree();
        let classifier = Classifier::new(
            &tree,
            ClassifyOptions {
                zero_overlap: ZeroOverlapPolicy::Unknown,
            },
        );
        let result = classifier.classify(&Entry::new("Widget Inventory", "Asset"));
        assert!(result.is_unknown());
        assert_eq!(result.confidence, 0.0);

        // 部分一致は影響を受けない
        let result = classifier.classify(&Entry::new("Accounts Receivable Trade", "Asset"));
        assert_eq!(result.tertiary_classification, "Accounts Receivable");
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_classify_entries_preserves_order() {
        let rows = tree().rows().to_vec();
        let entries = vec![
            Entry::new("Accounts Payable", "Liability"),
            Entry::new("Cash in Bank", "Asset"),
            Entry::new("Sales", "Revenue"),
        ];
        let results = classify_entries(&entries, &rows).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.entry_name.as_str()).collect();
        assert_eq!(names, vec!["Accounts Payable", "Cash in Bank", "Sales"]);
    }

    #[test]
    fn test_batch_summary() {
        let tree = tree();
        let classifier = Classifier::new(&tree, ClassifyOptions::default());
        let results = classifier.classify_all(&[
            Entry::new("Cash in Bank", "Asset"),
            Entry::new("Accounts Receivable Trade", "Asset"),
            Entry::new("Sales", "Revenue"),
        ]);
        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.exact, 1);
        assert!((summary.mean_confidence - (1.0 + 2.0 / 3.0) / 3.0).abs() < 1e-12);
        assert!(summary.to_string().contains("3件中"));
    }

    #[test]
    fn test_batch_summary_empty() {
        let summary = BatchSummary::from_results(&[]);
        assert_eq!(summary, BatchSummary::default());
    }
}
