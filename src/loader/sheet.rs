//! スプレッドシート読み込み（calamine）

use crate::error::{ClassifierError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use ledger_classifier_common::RawTable;
use std::path::Path;

/// 先頭シートを読み込む（1行目をヘッダー）
///
/// 文字列以外のセル（数値・日付・空欄）はNoneとして扱い、
/// 検証時に不正行として報告される。
pub fn read_first_sheet(path: &Path) -> Result<RawTable> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ClassifierError::Sheet(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ClassifierError::Sheet(format!("シートがありません: {}", path.display())))?
        .map_err(|e| ClassifierError::Sheet(e.to_string()))?;

    let mut rows = range.rows();

    let headers = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let records = rows
        .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(RawTable { headers, records })
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => Some(s.clone()),
        _ => None,
    }
}
