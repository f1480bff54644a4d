//! 生成設定
//!
//! ドメインやモードなど、環境から決まる値をまとめて保持します。
//! 生成処理はグローバル状態を読まず、この構造体だけを参照します。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 全サービスが参加する外部ネットワーク名
pub const DEFAULT_NETWORK: &str = "proxy-network";

/// 実行モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// 本番（デフォルト）
    #[default]
    Production,
    /// 開発（dev_path をバインドマウントする）
    Development,
}

impl Mode {
    /// 文字列からパース
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "development" => Some(Self::Development),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Development => "development",
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生成設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// 公開ドメイン（例: example.com）
    pub domain: String,
    /// 実行モード
    pub mode: Mode,
    /// サービスが参加する外部ネットワーク
    pub network: String,
}

impl Settings {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            mode: Mode::default(),
            network: DEFAULT_NETWORK.to_string(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }

    /// サブドメインから公開ホスト名を組み立てる
    ///
    /// サブドメインが無い（または空）の場合はドメインそのものを返す。
    pub fn public_host(&self, subdomain: Option<&str>) -> String {
        match subdomain.filter(|s| !s.is_empty()) {
            Some(sub) => format!("{}.{}", sub, self.domain),
            None => self.domain.clone(),
        }
    }
}
