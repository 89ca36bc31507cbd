//! 類似度計算（トークン集合のJaccard係数）

use crate::normalizer::tokens;
use std::collections::BTreeSet;

/// 2つのラベルの類似度を計算
///
/// 正規化後のトークン集合の共通部分 / 和集合。
/// どちらかが空なら0.0を返す。
pub fn similarity(a: &str, b: &str) -> f64 {
    token_similarity(&tokens(a), &tokens(b))
}

/// トークン化済みの集合同士の類似度
pub fn token_similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;

    intersection as f64 / union as f64
}
