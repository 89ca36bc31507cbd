use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {0}（csv/json/xlsx に対応）")]
    UnsupportedFormat(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Sheet(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV書き込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("ログ初期化エラー: {0}")]
    Logging(String),

    #[error(transparent)]
    Common(#[from] ledger_classifier_common::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
