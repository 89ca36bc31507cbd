//! Excel生成（共通ライブラリ）
//!
//! 分類結果を1シートの一覧表としてバッファに書き出す

use crate::types::ClassificationResult;
use rust_xlsxwriter::*;

pub const SHEET_NAME: &str = "Classified Entries";

/// 列定義（ヘッダー, 列幅）
const COLUMNS: [(&str, f64); 7] = [
    ("Entry Name", 32.0),
    ("Account Type", 14.0),
    ("Primary Classification", 26.0),
    ("Secondary Classification", 26.0),
    ("Tertiary Classification", 30.0),
    ("Confidence", 12.0),
    ("Master Sheet", 24.0),
];

/// 分類結果のExcelをバッファに生成
pub fn generate_results_buffer(results: &[ClassificationResult]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0x333333))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA));

    let value_format = Format::new()
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let confidence_format = Format::new()
        .set_num_format("0.00")
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    // 不明行は薄い赤で強調
    let unknown_format = Format::new()
        .set_font_color(Color::RGB(0xB00020))
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    for (col, (header, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet
            .set_column_width(col, *width)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
        worksheet
            .write_string_with_format(0, col, *header, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = i as u32 + 1;
        let label_format = if result.is_unknown() {
            &unknown_format
        } else {
            &value_format
        };

        let texts = [
            (0, result.entry_name.as_str(), &value_format),
            (1, result.account_type.as_str(), &value_format),
            (2, result.primary_classification.as_str(), label_format),
            (3, result.secondary_classification.as_str(), label_format),
            (4, result.tertiary_classification.as_str(), label_format),
            (6, result.master_sheet.as_str(), &value_format),
        ];
        for (col, value, format) in texts {
            worksheet
                .write_string_with_format(row, col, value, format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        worksheet
            .write_number_with_format(row, 5, result.confidence, &confidence_format)
            .map_err(|e| format!("信頼度書き込みエラー: {}", e))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
