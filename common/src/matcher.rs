//! マスタ照合
//!
//! エントリ名と各候補行の大分類・中分類・小分類を個別に比較し、
//! 最大値をその行のスコアとする。全候補で最もスコアの高い行を返す。
//! 同点の場合は先に現れた行を優先する。

use crate::normalizer::tokens;
use crate::similarity::token_similarity;
use crate::types::ClassificationRow;
use serde::Serialize;
use std::collections::BTreeSet;

/// スコアを決めた分類階層
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchLevel {
    Primary,
    Secondary,
    Tertiary,
}

impl std::fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchLevel::Primary => write!(f, "primary"),
            MatchLevel::Secondary => write!(f, "secondary"),
            MatchLevel::Tertiary => write!(f, "tertiary"),
        }
    }
}

/// 1行分のスコア
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowScore {
    pub score: f64,
    pub level: MatchLevel,
}

/// 照合結果
#[derive(Debug, Clone, Copy)]
pub struct BestMatch<'a> {
    /// 候補が空の場合のみNone
    pub row: Option<&'a ClassificationRow>,
    pub score: f64,
    pub level: Option<MatchLevel>,
    /// 入力スライス内の位置
    pub index: Option<usize>,
}

impl BestMatch<'_> {
    fn none() -> Self {
        Self {
            row: None,
            score: 0.0,
            level: None,
            index: None,
        }
    }
}

/// 1行のスコアを計算（3階層の最大値）
///
/// 同点なら詳細な階層（小分類 > 中分類 > 大分類）を報告する。
pub fn row_score(entry_tokens: &BTreeSet<String>, row: &ClassificationRow) -> RowScore {
    let [primary, secondary, tertiary] = row
        .labels()
        .map(|label| token_similarity(entry_tokens, &tokens(label)));

    let mut best = RowScore {
        score: tertiary,
        level: MatchLevel::Tertiary,
    };
    if secondary > best.score {
        best = RowScore {
            score: secondary,
            level: MatchLevel::Secondary,
        };
    }
    if primary > best.score {
        best = RowScore {
            score: primary,
            level: MatchLevel::Primary,
        };
    }
    best
}

/// 候補行から最適な分類を探す
///
/// # Arguments
/// * `entry_name` - エントリ名（内部で一度だけ正規化）
/// * `candidates` - 同じ勘定種別の候補行（入力順で走査）
pub fn find_best_match<'a, I>(entry_name: &str, candidates: I) -> BestMatch<'a>
where
    I: IntoIterator<Item = &'a ClassificationRow>,
{
    let entry_tokens = tokens(entry_name);
    let mut best = BestMatch::none();

    for (index, row) in candidates.into_iter().enumerate() {
        let scored = row_score(&entry_tokens, row);

        // 先勝ち: 同点では置き換えない
        if best.row.is_none() || scored.score > best.score {
            best = BestMatch {
                row: Some(row),
                score: scored.score,
                level: Some(scored.level),
                index: Some(index),
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_rows() -> Vec<ClassificationRow> {
        vec![
            ClassificationRow::new("Asset", "Current Assets", "Receivables", "Accounts Receivable"),
            ClassificationRow::new("Asset", "Cash", "Bank Accounts", "Cash in Bank"),
            ClassificationRow::new("Asset", "Fixed Assets", "Equipment", "Office Equipment"),
        ]
    }

    #[test]
    fn test_exact_tertiary_match() {
        let rows = asset_rows();
        let best = find_best_match("Cash in Bank", &rows);
        let row = best.row.expect("行が見つからない");
        assert_eq!(row.tertiary, "Cash in Bank");
        assert_eq!(best.score, 1.0);
        assert_eq!(best.level, Some(MatchLevel::Tertiary));
        assert_eq!(best.index, Some(1));
    }

    #[test]
    fn test_max_over_levels() {
        let row = ClassificationRow::new("Asset", "Equipment", "Office Furniture", "Desks");
        let scored = row_score(&tokens("Office Equipment"), &row);
        // primary: {equipment} → 1/2, secondary: {office} → 1/3
        assert!((scored.score - 0.5).abs() < 1e-12);
        assert_eq!(scored.level, MatchLevel::Primary);
    }

    #[test]
    fn test_level_tie_reports_most_specific() {
        let row = ClassificationRow::new("Asset", "Cash", "Cash", "Cash");
        let scored = row_score(&tokens("cash"), &row);
        assert_eq!(scored.score, 1.0);
        assert_eq!(scored.level, MatchLevel::Tertiary);
    }

    #[test]
    fn test_tie_keeps_first_seen() {
        let rows = vec![
            ClassificationRow::new("Asset", "Cash", "Petty Cash", "Cash on Hand"),
            ClassificationRow::new("Asset", "Cash", "Bank Accounts", "Cash at Bank"),
        ];
        // 両行とも大分類 "Cash" で 1/2
        let best = find_best_match("Cash Drawer", &rows);
        assert_eq!(best.index, Some(0));
        assert_eq!(best.row.map(|r| r.secondary.as_str()), Some("Petty Cash"));
        assert!((best.score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_later_higher_score_wins() {
        let rows = asset_rows();
        let best = find_best_match("Office Equipment", &rows);
        assert_eq!(best.index, Some(2));
        assert_eq!(best.score, 1.0);
    }

    #[test]
    fn test_zero_overlap_reports_first_row() {
        let rows = asset_rows();
        let best = find_best_match("Widget Inventory", &rows);
        assert_eq!(best.score, 0.0);
        assert_eq!(best.index, Some(0));
        assert_eq!(best.row, Some(&rows[0]));
    }

    #[test]
    fn test_empty_candidates() {
        let rows: Vec<ClassificationRow> = vec![];
        let best = find_best_match("Cash in Bank", &rows);
        assert!(best.row.is_none());
        assert_eq!(best.score, 0.0);
        assert!(best.level.is_none());
    }

    #[test]
    fn test_empty_entry_name() {
        let rows = asset_rows();
        let best = find_best_match("   ", &rows);
        assert_eq!(best.score, 0.0);
        assert_eq!(best.index, Some(0));
    }

    #[test]
    fn test_confidence_bounded() {
        let rows = asset_rows();
        for name in ["Cash", "Receivable", "bank bank", "Equipment Office Cash", ""] {
            let best = find_best_match(name, &rows);
            assert!((0.0..=1.0).contains(&best.score), "{}: {}", name, best.score);
        }
    }
}
