//! ラベル正規化
//!
//! - 小文字化
//! - 連続する空白を単一スペースに
//! - 前後の空白を除去

use regex::Regex;
use std::collections::BTreeSet;

/// 比較用にラベルを正規化する
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    lazy_static::lazy_static! {
        static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let lowered = text.to_lowercase();
    WHITESPACE_RE.replace_all(lowered.trim(), " ").into_owned()
}

/// 値が欠けている場合は空文字として扱う
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// 正規化後の空白区切りトークン集合
pub fn tokens(text: &str) -> BTreeSet<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
