pub mod csv;
pub mod excel;

use crate::cli::OutputFormat;
use crate::error::Result;
use ledger_classifier_common::ClassificationResult;
use std::path::{Path, PathBuf};

const DEFAULT_STEM: &str = "classified_entries";

fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_STEM, extension))
    } else {
        output.with_extension(extension)
    }
}

/// JSON出力（インデント2）
pub fn write_json(results: &[ClassificationResult], output_path: &Path) -> Result<()> {
    ensure_parent(output_path)?;
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

/// 指定形式で分類結果を出力し、書き出したパスを返す
pub fn export_results(
    results: &[ClassificationResult],
    format: OutputFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for extension in format.extensions() {
        let output_path = output_path_for_format(output, extension);
        match *extension {
            "json" => {
                println!("- JSONを出力中...");
                write_json(results, &output_path)?;
            }
            "csv" => {
                println!("- CSVを出力中...");
                csv::write_csv(results, &output_path)?;
            }
            _ => {
                println!("- Excelを生成中...");
                excel::generate_excel(results, &output_path)?;
            }
        }
        println!("✔ 出力: {}", output_path.display());
        written.push(output_path);
    }

    Ok(written)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_for_file() {
        let path = output_path_for_format(Path::new("out/result.json"), "csv");
        assert_eq!(path, PathBuf::from("out/result.csv"));
    }

    #[test]
    fn test_output_path_for_dir_like() {
        let path = output_path_for_format(Path::new("out"), "xlsx");
        assert_eq!(path, PathBuf::from("out/classified_entries.xlsx"));
    }
}
