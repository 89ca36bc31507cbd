//! 入力表の読み込み
//!
//! 拡張子で形式を判定する:
//! - csv: ヘッダー付きCSV
//! - json: 列名をキーにしたオブジェクトの配列
//! - xlsx/xls/ods: 先頭シート（1行目をヘッダー）

mod sheet;

use crate::error::{ClassifierError, Result};
use ledger_classifier_common::table::{
    entries_from_table, rows_from_table, validate_entries, RawTable,
};
use ledger_classifier_common::{ClassificationRow, ClassificationTree, Entry};
use std::path::Path;
use tracing::debug;

/// 入力ファイル形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
    Spreadsheet,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(InputFormat::Spreadsheet),
            _ => Err(ClassifierError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// 分類マスタを読み込む
pub fn load_tree(path: &Path) -> Result<ClassificationTree> {
    let format = check_input(path)?;
    debug!("分類マスタ読み込み: {} ({:?})", path.display(), format);

    let tree = match format {
        InputFormat::Csv => ClassificationTree::from_csv(path)?,
        InputFormat::Json => {
            let content = std::fs::read_to_string(path)?;
            let rows: Vec<ClassificationRow> = serde_json::from_str(&content)?;
            ClassificationTree::from_rows(rows)?
        }
        InputFormat::Spreadsheet => {
            let raw = sheet::read_first_sheet(path)?;
            ClassificationTree::from_rows(rows_from_table(&raw)?)?
        }
    };

    Ok(tree)
}

/// エントリ表を読み込む
pub fn load_entries(path: &Path) -> Result<Vec<Entry>> {
    let format = check_input(path)?;
    debug!("エントリ読み込み: {} ({:?})", path.display(), format);

    let entries = match format {
        InputFormat::Csv => {
            let content = std::fs::read_to_string(path)?;
            entries_from_table(&RawTable::from_csv_str(&content)?)?
        }
        InputFormat::Json => {
            let content = std::fs::read_to_string(path)?;
            let entries: Vec<Entry> = serde_json::from_str(&content)?;
            validate_entries(&entries)?;
            entries
        }
        InputFormat::Spreadsheet => entries_from_table(&sheet::read_first_sheet(path)?)?,
    };

    Ok(entries)
}

/// 入力ファイル未指定時のサンプルエントリ
pub fn sample_entries() -> Vec<Entry> {
    vec![
        Entry::new("Cash in Bank", "Asset"),
        Entry::new("Accounts Receivable", "Asset"),
        Entry::new("Office Equipment", "Asset"),
    ]
}

fn check_input(path: &Path) -> Result<InputFormat> {
    if !path.exists() {
        return Err(ClassifierError::FileNotFound(path.display().to_string()));
    }
    InputFormat::from_path(path)
}
