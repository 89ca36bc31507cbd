//! Ledger Classifier Common Library
//!
//! 勘定科目エントリを分類マスタと照合する中核ロジック

pub mod types;
pub mod error;
pub mod normalizer;
pub mod similarity;
pub mod matcher;
pub mod table;
pub mod hierarchy;
pub mod classify;
pub mod export;

pub use types::{ClassificationResult, ClassificationRow, Entry, UNKNOWN};
pub use error::{Error, Result};
pub use normalizer::{normalize, normalize_opt, tokens};
pub use similarity::similarity;
pub use matcher::{find_best_match, BestMatch, MatchLevel};
pub use table::{parse_entries_csv, RawTable};
pub use hierarchy::ClassificationTree;
pub use classify::{classify_entries, BatchSummary, Classifier, ClassifyOptions, ZeroOverlapPolicy};
