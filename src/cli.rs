use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inspection-visuals")]
#[command(about = "検査結果オーバーレイ表示・形状テンプレート管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 結果ファイルとテンプレートを結合して内容を表示
    Inspect {
        /// 検査結果JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 静止画テンプレート（省略時は設定値）
        #[arg(long)]
        shapes: Option<PathBuf>,

        /// ライブ画像テンプレート（省略時は設定値）
        #[arg(long)]
        live_shapes: Option<PathBuf>,

        /// ライブ画像フォルダ（省略時は設定値）
        #[arg(long)]
        live_dir: Option<PathBuf>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// システムの最新結果ファイルを表示
    Latest {
        /// システム識別子
        #[arg(short, long, required = true)]
        system: String,

        /// 結果フォルダ（省略時は設定値）
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// 識別子リスナーを前面で起動し、受信内容をログに出す
    Listen {
        /// 待ち受けアドレス（省略時は設定値）
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// テンプレートファイルの内容を一覧表示
    Shapes {
        /// テンプレートJSONファイル
        #[arg(required = true)]
        file: PathBuf,

        /// 合成キーで絞り込み
        #[arg(short, long)]
        key: Option<String>,
    },

    /// 設定を表示
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 現在の設定をファイルに書き出す
        #[arg(long)]
        init: bool,
    },
}
