//! CSV出力

use crate::error::Result;
use ledger_classifier_common::ClassificationResult;
use std::path::Path;

pub fn write_csv(results: &[ClassificationResult], output_path: &Path) -> Result<()> {
    super::ensure_parent(output_path)?;

    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_path(output_path)?;

    // 空の結果でもヘッダー行は出す
    if results.is_empty() {
        writer.write_record([
            "entryName",
            "accountType",
            "primaryClassification",
            "secondaryClassification",
            "tertiaryClassification",
            "confidence",
            "masterSheet",
        ])?;
    }

    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}
