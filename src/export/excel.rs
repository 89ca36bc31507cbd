//! Excel生成（CLI版）
//!
//! 共通ライブラリでバッファを生成してファイルに保存する

use crate::error::{ClassifierError, Result};
use ledger_classifier_common::export::excel_core::generate_results_buffer;
use ledger_classifier_common::ClassificationResult;
use std::path::Path;

pub fn generate_excel(results: &[ClassificationResult], output_path: &Path) -> Result<()> {
    super::ensure_parent(output_path)?;

    let buffer = generate_results_buffer(results).map_err(ClassifierError::ExcelGeneration)?;
    std::fs::write(output_path, buffer)?;
    Ok(())
}
