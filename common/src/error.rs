//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{table}: required column '{column}' is missing")]
    MissingColumn { table: String, column: String },

    #[error("{table}: row {row} has an empty or missing '{field}'")]
    MalformedRow {
        table: String,
        row: usize,
        field: String,
    },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
