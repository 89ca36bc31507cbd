//! 分類マスタモジュール
//!
//! 勘定種別ごとの3階層（大分類・中分類・小分類）の分類表を管理する。
//! CSVなどから読み込み、読み込み時に全行を検証する。

use crate::error::Result;
use crate::table::{rows_from_table, validate_rows, RawTable};
use crate::types::ClassificationRow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// 分類マスタ全体を管理する構造体
#[derive(Debug, Clone, Default)]
pub struct ClassificationTree {
    /// 全行データ（入力順）
    rows: Vec<ClassificationRow>,
    /// 小文字の勘定種別→行番号（入力順）
    by_account_type: HashMap<String, Vec<usize>>,
}

impl ClassificationTree {
    /// 検証済みの行から構築
    pub fn from_rows(rows: Vec<ClassificationRow>) -> Result<Self> {
        validate_rows(&rows)?;

        let mut by_account_type: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            by_account_type
                .entry(account_type_key(&row.account_type))
                .or_default()
                .push(i);
        }

        Ok(Self {
            rows,
            by_account_type,
        })
    }

    /// CSVファイルから読み込み
    pub fn from_csv(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_csv_str(&content)
    }

    /// CSV文字列から読み込み
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_table(&RawTable::from_csv_str(content)?)
    }

    /// 生の表から読み込み
    pub fn from_table(raw: &RawTable) -> Result<Self> {
        Self::from_rows(rows_from_table(raw)?)
    }

    /// 全行を取得
    pub fn rows(&self) -> &[ClassificationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 勘定種別が一致する行（大文字小文字を区別しない、入力順）
    pub fn candidates(&self, account_type: &str) -> Vec<&ClassificationRow> {
        self.by_account_type
            .get(&account_type_key(account_type))
            .map(|indices| indices.iter().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default()
    }

    /// 勘定種別の一覧（最初に現れた表記、ソート済み）
    pub fn account_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .by_account_type
            .values()
            .filter_map(|indices| indices.first())
            .map(|&i| self.rows[i].account_type.as_str())
            .collect();
        types.sort();
        types
    }

    /// 勘定種別に対応する大分類一覧
    pub fn primaries(&self, account_type: &str) -> Vec<&str> {
        distinct_sorted(self.candidates(account_type).into_iter().map(|r| r.primary.as_str()))
    }

    /// (勘定種別, 大分類)に対応する中分類一覧
    pub fn secondaries(&self, account_type: &str, primary: &str) -> Vec<&str> {
        distinct_sorted(
            self.candidates(account_type)
                .into_iter()
                .filter(|r| r.primary == primary)
                .map(|r| r.secondary.as_str()),
        )
    }

    /// (勘定種別, 大分類, 中分類)に対応する小分類一覧
    pub fn tertiaries(&self, account_type: &str, primary: &str, secondary: &str) -> Vec<&str> {
        distinct_sorted(
            self.candidates(account_type)
                .into_iter()
                .filter(|r| r.primary == primary && r.secondary == secondary)
                .map(|r| r.tertiary.as_str()),
        )
    }

    /// 階層JSONを生成（勘定種別→大分類→中分類→小分類）
    pub fn to_hierarchy_json(&self) -> serde_json::Value {
        let mut hierarchy: BTreeMap<&str, BTreeMap<&str, BTreeMap<&str, Vec<&str>>>> =
            BTreeMap::new();

        for account_type in self.account_types() {
            let primaries = hierarchy.entry(account_type).or_default();
            for primary in self.primaries(account_type) {
                let secondaries = primaries.entry(primary).or_default();
                for secondary in self.secondaries(account_type, primary) {
                    secondaries.insert(
                        secondary,
                        self.tertiaries(account_type, primary, secondary),
                    );
                }
            }
        }

        serde_json::to_value(hierarchy).unwrap_or(serde_json::Value::Null)
    }
}

fn account_type_key(account_type: &str) -> String {
    account_type.to_lowercase()
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}
