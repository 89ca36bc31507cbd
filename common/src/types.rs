//! 分類データの型定義
//!
//! CLIと共通ライブラリで共有される型:
//! - ClassificationRow: 分類マスタの1行（勘定種別ごとの3階層）
//! - Entry: 分類対象の勘定科目エントリ
//! - ClassificationResult: 最終出力（照合結果と信頼度）

use serde::{Deserialize, Deserializer, Serialize};

/// 該当する分類がない場合の値
pub const UNKNOWN: &str = "UNKNOWN";

/// 分類マスタの1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRow {
    #[serde(rename = "Account Type")]
    pub account_type: String,

    #[serde(rename = "Primary Classification")]
    pub primary: String,

    #[serde(rename = "Secondary Classification")]
    pub secondary: String,

    #[serde(rename = "Tertiary Classification")]
    pub tertiary: String,
}

impl ClassificationRow {
    pub fn new(
        account_type: impl Into<String>,
        primary: impl Into<String>,
        secondary: impl Into<String>,
        tertiary: impl Into<String>,
    ) -> Self {
        Self {
            account_type: account_type.into(),
            primary: primary.into(),
            secondary: secondary.into(),
            tertiary: tertiary.into(),
        }
    }

    /// 3階層のラベル（大分類・中分類・小分類の順）
    pub fn labels(&self) -> [&str; 3] {
        [self.primary.as_str(), self.secondary.as_str(), self.tertiary.as_str()]
    }
}

/// 分類対象エントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "Entry Name", deserialize_with = "deserialize_entry_name")]
    pub name: String,

    #[serde(rename = "Account Type")]
    pub account_type: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, account_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_type: account_type.into(),
        }
    }
}

/// 文字列以外・null・空欄のエントリ名は空文字として読む
fn deserialize_entry_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(crate::table::entry_name_cell(value.as_str()))
}

/// 分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub entry_name: String,
    pub account_type: String,
    pub primary_classification: String,
    pub secondary_classification: String,
    pub tertiary_classification: String,
    /// 照合スコア（0.0〜1.0）
    pub confidence: f64,
    pub master_sheet: String,
}

impl ClassificationResult {
    /// 照合行から結果を作成（勘定種別はエントリの値をそのまま使う）
    pub fn matched(entry: &Entry, row: &ClassificationRow, confidence: f64) -> Self {
        Self {
            entry_name: entry.name.clone(),
            account_type: entry.account_type.clone(),
            primary_classification: row.primary.clone(),
            secondary_classification: row.secondary.clone(),
            tertiary_classification: row.tertiary.clone(),
            confidence,
            master_sheet: master_sheet_name(&entry.account_type),
        }
    }

    /// 該当分類なしの結果
    pub fn unknown(entry: &Entry) -> Self {
        Self {
            entry_name: entry.name.clone(),
            account_type: entry.account_type.clone(),
            primary_classification: UNKNOWN.to_string(),
            secondary_classification: UNKNOWN.to_string(),
            tertiary_classification: UNKNOWN.to_string(),
            confidence: 0.0,
            master_sheet: master_sheet_name(&entry.account_type),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.primary_classification == UNKNOWN
            && self.secondary_classification == UNKNOWN
            && self.tertiary_classification == UNKNOWN
    }
}

/// マスタシート名（勘定種別から導出）
pub fn master_sheet_name(account_type: &str) -> String {
    format!("{} Master Sheet", account_type)
}
