use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ledger-classify")]
#[command(about = "勘定科目エントリを分類マスタと照合して分類するツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// エントリ表を一括分類して結果を出力
    Classify {
        /// 分類マスタ（csv/json/xlsx、省略時は設定値）
        #[arg(short, long)]
        tree: Option<PathBuf>,

        /// エントリ表（csv/json/xlsx、省略時はサンプル3件）
        #[arg(short, long)]
        entries: Option<PathBuf>,

        /// 出力ファイル/ディレクトリ（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (json/csv/excel/all)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// 共通トークンがない場合はUNKNOWNにする
        #[arg(long)]
        unknown_on_zero: bool,
    },

    /// 1件のエントリを分類して表示
    Match {
        /// エントリ名
        #[arg(required = true)]
        name: String,

        /// 勘定種別
        #[arg(short, long)]
        account_type: String,

        /// 分類マスタ
        #[arg(short, long)]
        tree: Option<PathBuf>,

        /// 共通トークンがない場合はUNKNOWNにする
        #[arg(long)]
        unknown_on_zero: bool,
    },

    /// 分類マスタの階層を表示
    Tree {
        /// 分類マスタ
        #[arg(short, long)]
        tree: Option<PathBuf>,

        /// 勘定種別で絞り込み
        #[arg(short, long)]
        account_type: Option<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 分類マスタのパスを設定
        #[arg(long)]
        set_tree: Option<PathBuf>,

        /// 出力先のパスを設定
        #[arg(long)]
        set_output: Option<PathBuf>,

        /// 既定の出力形式を設定
        #[arg(long)]
        set_format: Option<OutputFormat>,

        /// 共通トークンがない場合の扱いを設定（true でUNKNOWN）
        #[arg(long)]
        set_unknown_on_zero: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Excel,
    All,
}

impl OutputFormat {
    /// 出力ファイルの拡張子
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::Json => &["json"],
            OutputFormat::Csv => &["csv"],
            OutputFormat::Excel => &["xlsx"],
            OutputFormat::All => &["json", "csv", "xlsx"],
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "excel" | "xlsx" => Ok(OutputFormat::Excel),
            "all" => Ok(OutputFormat::All),
            _ => Err(format!("Unknown format: {}. Use json, csv, excel, or all", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Excel => write!(f, "excel"),
            OutputFormat::All => write!(f, "all"),
        }
    }
}
