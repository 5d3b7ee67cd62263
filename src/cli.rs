use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ingredient-ai")]
#[command(about = "食品ラベルOCRテキストの有害成分検出・アレルギーチェックツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// OCRテキストをスキャンして有害成分を検出
    Scan {
        /// OCRテキストファイルのパス（省略時は --text を使用）
        input: Option<PathBuf>,

        /// テキストを直接指定
        #[arg(short, long)]
        text: Option<String>,

        /// 成分辞書JSONファイル（省略時は設定のパスを使用）
        #[arg(short, long)]
        dictionary: Option<PathBuf>,

        /// アレルギー対象の語（複数指定可）
        #[arg(short, long)]
        allergy: Vec<String>,

        /// レポートのJSON出力先
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 出力形式 (text/json/both)
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// 照合前にテキストを対話的に修正
        #[arg(short, long)]
        edit: bool,

        /// 履歴に保存しない
        #[arg(long)]
        no_history: bool,

        /// AIによる代替品提案を実行
        #[arg(long)]
        ai: bool,
    },

    /// スキャン履歴を表示・削除
    History {
        /// 履歴を削除
        #[arg(long)]
        clear: bool,

        /// 表示件数
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// 設定を表示/編集
    Config {
        /// 成分辞書のパスを設定
        #[arg(long)]
        set_dictionary: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// レポート出力形式
#[derive(Clone, Copy, Debug, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Both,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "both" => Ok(ReportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use text, json, or both", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Both => write!(f, "both"),
        }
    }
}
