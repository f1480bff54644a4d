use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "環境変数 DOMAIN が設定されていません\n\
        ヒント: .env に DOMAIN=example.com を追加するか、--domain で指定してください"
    )]
    DomainMissing,

    #[error(".env ファイルの読み込みに失敗しました: {path}\n理由: {message}")]
    EnvFile { path: PathBuf, message: String },

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
