mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "stackgen")]
#[command(
    about = "1つのインベントリから compose・Caddyfile・ダッシュボードを生成する",
    long_about = None
)]
struct Cli {
    /// デバッグログを出力
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 成果物を生成して出力ディレクトリに書き出す
    Generate {
        #[command(flatten)]
        input: InputArgs,
        /// 出力ディレクトリ
        #[arg(short, long, env = "STACKGEN_OUTPUT", default_value = "dist")]
        output: PathBuf,
        /// プロキシ用の Dockerfile（出力先にコピーする）
        #[arg(long, default_value = "Dockerfile-caddy")]
        caddy_dockerfile: PathBuf,
    },
    /// インベントリを検証する（ファイルは書き出さない）
    Validate {
        #[command(flatten)]
        input: InputArgs,
        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },
    /// バージョン情報を表示
    Version,
}

/// 入力と環境に関する共通オプション
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// インベントリファイル（省略時は custom.yml などを探索）
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// 公開ドメイン（省略時は環境変数 DOMAIN）
    #[arg(short, long)]
    pub domain: Option<String>,
    /// 実行モード production / development（省略時は環境変数 ENV）
    #[arg(short, long)]
    pub mode: Option<String>,
    /// 外部ネットワーク名（省略時は proxy-network）
    #[arg(long)]
    pub network: Option<String>,
    /// 読み込む .env ファイル（generate では出力先にもコピーする）
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,
}

impl InputArgs {
    fn overrides(&self) -> stackgen_config::Overrides {
        stackgen_config::Overrides {
            domain: self.domain.clone(),
            mode: self.mode.clone(),
            network: self.network.clone(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Versionコマンドは設定ファイル不要
    if matches!(cli.command, Commands::Version) {
        println!("stackgen {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            input,
            output,
            caddy_dockerfile,
        } => commands::generate::handle(&input, &output, &caddy_dockerfile),
        Commands::Validate { input, json } => commands::validate::handle(&input, json),
        Commands::Version => Ok(ExitCode::SUCCESS),
    }
}
