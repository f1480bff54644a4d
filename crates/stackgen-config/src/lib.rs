//! 設定の解決
//!
//! 環境変数（と .env）から生成設定を組み立て、入力インベントリの場所を決めます。

pub mod env;
pub mod error;

pub use env::*;
pub use error::*;

use stackgen_core::{DEFAULT_NETWORK, Mode, Settings};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 公開ドメイン（必須）
pub const DOMAIN_VAR: &str = "DOMAIN";
/// 実行モード（production / development）
pub const MODE_VAR: &str = "ENV";
/// 外部ネットワーク名
pub const NETWORK_VAR: &str = "STACKGEN_NETWORK";
/// インベントリファイルのパス
pub const INPUT_VAR: &str = "STACKGEN_INPUT";

/// 何も見つからなかった場合のインベントリファイル名
pub const DEFAULT_INPUT: &str = "custom.yml";

const INPUT_CANDIDATES: &[&str] = &["custom.yml", "custom.yaml", "manifest.yml"];

/// コマンドラインからの上書き値
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub domain: Option<String>,
    pub mode: Option<String>,
    pub network: Option<String>,
}

/// 生成設定を解決する
///
/// 優先順位: コマンドライン > 環境変数。DOMAIN が無い（空）場合はエラー。
/// 不明なモードは production として扱う。
pub fn resolve_settings(overrides: &Overrides, env: &impl EnvSource) -> Result<Settings> {
    let domain = overrides
        .domain
        .clone()
        .or_else(|| env.var(DOMAIN_VAR))
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .ok_or(ConfigError::DomainMissing)?;

    let mode = match overrides.mode.clone().or_else(|| env.var(MODE_VAR)) {
        Some(raw) => Mode::parse(&raw).unwrap_or_else(|| {
            warn!(mode = %raw, "Unknown mode, falling back to production");
            Mode::Production
        }),
        None => Mode::default(),
    };

    let network = overrides
        .network
        .clone()
        .or_else(|| env.var(NETWORK_VAR))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_NETWORK.to_string());

    info!(domain = %domain, mode = %mode, network = %network, "Settings resolved");
    Ok(Settings::new(domain).with_mode(mode).with_network(network))
}

/// .env ファイルをプロセスの環境変数に読み込む
///
/// 既に設定されている変数は上書きしない。ファイルが無ければ `Ok(false)`。
pub fn load_env_file(path: &Path) -> Result<bool> {
    if !path.is_file() {
        debug!(path = %path.display(), "No env file");
        return Ok(false);
    }

    dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!(path = %path.display(), "Env file loaded");
    Ok(true)
}

/// グローバル設定ディレクトリ (~/.config/stackgen)
pub fn global_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("stackgen"))
}

/// インベントリファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 明示的な指定（--input）
/// 2. 環境変数 STACKGEN_INPUT
/// 3. カレントディレクトリ: custom.yml, custom.yaml, manifest.yml
/// 4. ~/.config/stackgen/custom.yml
///
/// 見つからない場合は `./custom.yml` を返し、読み込み時に NotFound として報告させる。
pub fn find_inventory_file(explicit: Option<&Path>, env: &impl EnvSource) -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    Ok(find_inventory_file_in(&current_dir, explicit, env))
}

/// 指定ディレクトリを起点にインベントリファイルを探す
pub fn find_inventory_file_in(
    dir: &Path,
    explicit: Option<&Path>,
    env: &impl EnvSource,
) -> PathBuf {
    // 1. 明示的な指定はそのまま使う（存在チェックはローダーで行う）
    if let Some(path) = explicit {
        return dir.join(path);
    }

    // 2. 環境変数で直接指定
    if let Some(path) = env.var(INPUT_VAR).filter(|p| !p.is_empty()) {
        return dir.join(path);
    }

    // 3. カレントディレクトリで検索
    for filename in INPUT_CANDIDATES {
        let path = dir.join(filename);
        if path.is_file() {
            return path;
        }
    }

    // 4. グローバル設定
    if let Some(global) = global_config_dir().map(|d| d.join(DEFAULT_INPUT))
        && global.is_file()
    {
        return global;
    }

    dir.join(DEFAULT_INPUT)
}
