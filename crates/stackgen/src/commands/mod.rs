pub mod generate;
pub mod validate;

use crate::InputArgs;
use colored::Colorize;
use stackgen_config::ProcessEnv;
use stackgen_core::{Diagnostic, Inventory, Settings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

/// 生成前に必要な入力一式
pub struct Prepared {
    pub input: PathBuf,
    pub settings: Settings,
    pub inventory: Inventory,
}

/// .env の読み込み → 設定の解決 → インベントリの読み込み
///
/// どれかが失敗した場合は何も書き出さずに終了する。
pub fn prepare(args: &InputArgs) -> anyhow::Result<Prepared> {
    if stackgen_config::load_env_file(&args.env_file)? {
        debug!(path = %args.env_file.display(), "Loaded env file");
    }

    let settings = stackgen_config::resolve_settings(&args.overrides(), &ProcessEnv)?;
    let input = stackgen_config::find_inventory_file(args.input.as_deref(), &ProcessEnv)?;
    let inventory = stackgen_core::load_inventory(&input)?;

    Ok(Prepared {
        input,
        settings,
        inventory,
    })
}

/// 致命的なエラーを表示
pub fn fatal(error: anyhow::Error) -> ExitCode {
    eprintln!();
    eprintln!("{}", "✗ 生成を中止しました".red().bold());
    eprintln!("  {}", error);
    ExitCode::FAILURE
}

/// 検証で見つかった問題をログに出す
pub fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        warn!(service = %diagnostic.service(), "{}", diagnostic);
    }
}
