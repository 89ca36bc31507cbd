//! 入力表の読み込みと検証
//!
//! CSV・JSON・スプレッドシートのいずれから読んだ場合も、
//! ここで列の存在と値の空欄をチェックしてから型付きの行に変換する。

use crate::error::{Error, Result};
use crate::normalizer::normalize_opt;
use crate::types::{ClassificationRow, Entry};

pub const TREE_TABLE: &str = "classification tree";
pub const ENTRIES_TABLE: &str = "entries";

pub const COL_ACCOUNT_TYPE: &str = "Account Type";
pub const COL_PRIMARY: &str = "Primary Classification";
pub const COL_SECONDARY: &str = "Secondary Classification";
pub const COL_TERTIARY: &str = "Tertiary Classification";
pub const COL_ENTRY_NAME: &str = "Entry Name";

pub const TREE_COLUMNS: [&str; 4] = [COL_ACCOUNT_TYPE, COL_PRIMARY, COL_SECONDARY, COL_TERTIARY];
pub const ENTRY_COLUMNS: [&str; 2] = [COL_ENTRY_NAME, COL_ACCOUNT_TYPE];

/// ヘッダー付きの生の表
///
/// セルが存在しない、または文字列でない場合はNone。
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// CSV文字列から読み込み（1行目はヘッダー）
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(content.as_bytes());

        let headers = reader.headers()?.iter().map(str::to_string).collect();

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            records.push(record.iter().map(|v| Some(v.to_string())).collect());
        }

        Ok(Self { headers, records })
    }

    /// 必要な列だけを指定順に取り出す
    ///
    /// 列がなければ`MissingColumn`。セルの空欄チェックは呼び出し側で行う。
    pub fn select<const N: usize>(
        &self,
        table: &str,
        columns: &[&str; N],
    ) -> Result<Vec<[Option<&str>; N]>> {
        let indices = columns
            .iter()
            .map(|name| {
                self.headers
                    .iter()
                    .position(|h| h.trim() == *name)
                    .ok_or_else(|| Error::MissingColumn {
                        table: table.to_string(),
                        column: name.to_string(),
                    })
            })
            .collect::<Result<Vec<usize>>>()?;

        Ok(self
            .records
            .iter()
            .map(|record| {
                std::array::from_fn(|k| record.get(indices[k]).and_then(|v| v.as_deref()))
            })
            .collect())
    }
}

fn require(table: &str, row: usize, field: &str, value: Option<&str>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(Error::MalformedRow {
            table: table.to_string(),
            row,
            field: field.to_string(),
        }),
    }
}

/// エントリ名のセル値
///
/// 欠損・空欄・文字列以外は空文字になり、照合スコアは0.0になる。
pub fn entry_name_cell(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        other => normalize_opt(other),
    }
}

/// 分類行の空欄チェック
pub fn validate_rows(rows: &[ClassificationRow]) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        let values = [&row.account_type, &row.primary, &row.secondary, &row.tertiary];
        for (name, value) in TREE_COLUMNS.iter().zip(values) {
            require(TREE_TABLE, i + 1, name, Some(value.as_str()))?;
        }
    }
    Ok(())
}

/// エントリの空欄チェック（勘定種別のみ必須）
pub fn validate_entries(entries: &[Entry]) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        require(ENTRIES_TABLE, i + 1, COL_ACCOUNT_TYPE, Some(entry.account_type.as_str()))?;
    }
    Ok(())
}

/// 生の表から分類行へ変換
pub fn rows_from_table(raw: &RawTable) -> Result<Vec<ClassificationRow>> {
    raw.select(TREE_TABLE, &TREE_COLUMNS)?
        .into_iter()
        .enumerate()
        .map(|(i, [account_type, primary, secondary, tertiary])| {
            let row = i + 1;
            Ok(ClassificationRow {
                account_type: require(TREE_TABLE, row, COL_ACCOUNT_TYPE, account_type)?,
                primary: require(TREE_TABLE, row, COL_PRIMARY, primary)?,
                secondary: require(TREE_TABLE, row, COL_SECONDARY, secondary)?,
                tertiary: require(TREE_TABLE, row, COL_TERTIARY, tertiary)?,
            })
        })
        .collect()
}

/// 生の表からエントリへ変換
pub fn entries_from_table(raw: &RawTable) -> Result<Vec<Entry>> {
    raw.select(ENTRIES_TABLE, &ENTRY_COLUMNS)?
        .into_iter()
        .enumerate()
        .map(|(i, [name, account_type])| {
            Ok(Entry {
                name: entry_name_cell(name),
                account_type: require(ENTRIES_TABLE, i + 1, COL_ACCOUNT_TYPE, account_type)?,
            })
        })
        .collect()
}

/// エントリCSVを読み込み
pub fn parse_entries_csv(content: &str) -> Result<Vec<Entry>> {
    entries_from_table(&RawTable::from_csv_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_csv() {
        let csv = "Entry Name,Account Type\nCash in Bank,Asset\n\"Loans, Long Term\",Liability\n";
        let entries = parse_entries_csv(csv).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], Entry::new("Cash in Bank", "Asset"));
        assert_eq!(entries[1].name, "Loans, Long Term");
    }

    #[test]
    fn test_extra_columns_and_order() {
        let csv = "Account Type,Memo,Entry Name\nAsset,ignored,Petty Cash\n";
        let entries = parse_entries_csv(csv).unwrap();
        assert_eq!(entries, vec![Entry::new("Petty Cash", "Asset")]);
    }

    #[test]
    fn test_header_whitespace_trimmed() {
        let csv = " Entry Name , Account Type \nCash,Asset\n";
        assert_eq!(parse_entries_csv(csv).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Entry Name\nCash in Bank\n";
        let err = parse_entries_csv(csv).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingColumn { ref column, .. } if column == "Account Type"
        ));
    }

    #[test]
    fn test_blank_entry_name_becomes_empty() {
        let entries = parse_entries_csv("Entry Name,Account Type\n,Asset\n  ,Liability\n").unwrap();
        assert_eq!(entries[0], Entry::new("", "Asset"));
        assert_eq!(entries[1], Entry::new("", "Liability"));
    }

    #[test]
    fn test_blank_account_type() {
        let csv = "Entry Name,Account Type\nCash,Asset\nPetty Cash,  \n";
        let err = parse_entries_csv(csv).unwrap_err();
        assert!(matches!(err, Error::MalformedRow { row: 2, ref field, .. } if field == "Account Type"));
    }

    #[test]
    fn test_ragged_row_is_error() {
        let csv = "Entry Name,Account Type\nCash\n";
        assert!(matches!(parse_entries_csv(csv).unwrap_err(), Error::Csv(_)));
    }

    #[test]
    fn test_non_string_cell() {
        let raw = RawTable {
            headers: vec!["Entry Name".into(), "Account Type".into()],
            records: vec![vec![None, Some("Asset".into())], vec![Some("Cash".into()), None]],
        };
        assert!(matches!(
            entries_from_table(&raw).unwrap_err(),
            Error::MalformedRow { row: 2, .. }
        ));

        let raw = RawTable {
            records: vec![vec![None, Some("Asset".into())]],
            ..raw
        };
        assert_eq!(entries_from_table(&raw).unwrap(), vec![Entry::new("", "Asset")]);
    }

    #[test]
    fn test_tree_blank_label() {
        let raw = RawTable {
            headers: TREE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            records: vec![vec![
                Some("Asset".into()),
                Some("Cash".into()),
                None,
                Some("Cash in Bank".into()),
            ]],
        };
        assert!(matches!(
            rows_from_table(&raw).unwrap_err(),
            Error::MalformedRow { row: 1, ref field, .. } if field == COL_SECONDARY
        ));
    }

    #[test]
    fn test_validate_rows() {
        let rows = vec![
            ClassificationRow::new("Asset", "Cash", "Bank", "Cash in Bank"),
            ClassificationRow::new("Asset", "Cash", "", "Petty Cash"),
        ];
        let err = validate_rows(&rows).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRow { row: 2, ref field, .. } if field == COL_SECONDARY
        ));
    }
}
