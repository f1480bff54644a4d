use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("インベントリファイルが見つかりません: {path}")]
    InputNotFound { path: PathBuf },

    #[error("インベントリのパースエラー: {path}\n理由: {message}")]
    InputParse { path: PathBuf, message: String },

    #[error("ファイル読み込みエラー: {path}\n理由: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{artifact} のシリアライズに失敗しました: {source}")]
    Serialize {
        artifact: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("ファイル書き込みエラー: {path}\n理由: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ファイルコピーエラー: {from} → {to}\n理由: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenError>;
