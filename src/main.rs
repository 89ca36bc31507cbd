use clap::Parser;
use ledger_classifier::{cli, config, error, export, loader};
use ledger_classifier::common::{BatchSummary, ClassificationTree, Classifier, ClassifyOptions, Entry, ZeroOverlapPolicy};
use cli::{Cli, Commands};
use config::Config;
use error::{ClassifierError, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    // 壊れた設定ファイルでも`config --set-*`で上書きできるようにする
    let config = match cli.command {
        Commands::Config { .. } => Config::load_or_default(),
        _ => Config::load()?,
    };

    match cli.command {
        Commands::Classify { tree, entries, output, format, unknown_on_zero } => {
            println!("📒 ledger-classify - 一括分類\n");

            // 1. 分類マスタ読み込み
            println!("[1/3] 分類マスタを読み込み中...");
            let tree_path = tree.unwrap_or_else(|| config.tree_path());
            let tree = loader::load_tree(&tree_path)?;
            println!("✔ {}行 / 勘定種別{}件\n", tree.len(), tree.account_types().len());

            // 2. 分類
            println!("[2/3] エントリを分類中...");
            let entries = match entries {
                Some(path) => loader::load_entries(&path)?,
                None => {
                    println!("  (エントリ未指定のためサンプルを使用)");
                    loader::sample_entries()
                }
            };
            let options = classify_options(&config, unknown_on_zero);
            let results = Classifier::new(&tree, options).classify_all(&entries);
            let summary = BatchSummary::from_results(&results);
            println!("✔ {}\n", summary);

            // 3. 結果保存
            println!("[3/3] 結果を保存中...");
            let output = output.unwrap_or_else(|| config.output_path());
            let format = format.unwrap_or(config.output_format);
            let written = export::export_results(&results, format, &output)?;
            info!("{}ファイルを出力しました", written.len());

            println!("\n✅ 分類完了");
        }

        Commands::Match { name, account_type, tree, unknown_on_zero } => {
            let tree_path = tree.unwrap_or_else(|| config.tree_path());
            let tree = loader::load_tree(&tree_path)?;
            let options = classify_options(&config, unknown_on_zero);

            let result = Classifier::new(&tree, options).classify(&Entry::new(name, account_type));
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Tree { tree, account_type, json } => {
            let tree_path = tree.unwrap_or_else(|| config.tree_path());
            let tree = loader::load_tree(&tree_path)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&tree.to_hierarchy_json())?);
            } else {
                print_tree(&tree, account_type.as_deref());
            }
        }

        Commands::Config { set_tree, set_output, set_format, set_unknown_on_zero, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(path) = set_tree {
                config.tree_path = path;
                changed = true;
            }
            if let Some(path) = set_output {
                config.output_path = path;
                changed = true;
            }
            if let Some(format) = set_format {
                config.output_format = format;
                changed = true;
            }
            if let Some(value) = set_unknown_on_zero {
                config.unknown_on_zero_overlap = value;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  分類マスタ: {}", config.tree_path().display());
                println!("  出力先: {}", config.output_path().display());
                println!("  出力形式: {}", config.output_format);
                println!(
                    "  一致なしの扱い: {}",
                    match config.zero_overlap_policy() {
                        ZeroOverlapPolicy::ReportBest => "先頭候補を信頼度0.0で出力",
                        ZeroOverlapPolicy::Unknown => "UNKNOWN",
                    }
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ClassifierError::Logging(e.to_string()))
}

fn classify_options(config: &Config, unknown_on_zero: bool) -> ClassifyOptions {
    let zero_overlap = if unknown_on_zero {
        ZeroOverlapPolicy::Unknown
    } else {
        config.zero_overlap_policy()
    };
    ClassifyOptions { zero_overlap }
}

fn print_tree(tree: &ClassificationTree, filter: Option<&str>) {
    let account_types: Vec<&str> = match filter {
        Some(wanted) => tree
            .account_types()
            .into_iter()
            .filter(|t| t.to_lowercase() == wanted.to_lowercase())
            .collect(),
        None => tree.account_types(),
    };

    if account_types.is_empty() {
        println!("該当する勘定種別がありません");
        return;
    }

    for account_type in account_types {
        println!("{}", account_type);
        for primary in tree.primaries(account_type) {
            println!("  {}", primary);
            for secondary in tree.secondaries(account_type, primary) {
                println!("    {}", secondary);
                for tertiary in tree.tertiaries(account_type, primary, secondary) {
                    println!("      - {}", tertiary);
                }
            }
        }
    }
}
