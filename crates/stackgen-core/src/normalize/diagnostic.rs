//! 検証で検出された問題

use serde::Serialize;
use std::fmt;

/// サービス単位の非致命的な問題
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// 必須キーが無い（サービスは除外）
    ServiceIncomplete {
        service: String,
        missing: Vec<String>,
    },
    /// 未使用のキーがある（警告のみ）
    UnknownAttributes { service: String, keys: Vec<String> },
    /// 既知のキーの値が読めない（その属性だけ無視）
    InvalidAttribute {
        service: String,
        key: String,
        message: String,
    },
}

impl Diagnostic {
    /// 対象サービスID
    pub fn service(&self) -> &str {
        match self {
            Self::ServiceIncomplete { service, .. }
            | Self::UnknownAttributes { service, .. }
            | Self::InvalidAttribute { service, .. } => service,
        }
    }

    /// サービスが投影から除外される問題か
    pub fn drops_service(&self) -> bool {
        matches!(self, Self::ServiceIncomplete { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ServiceIncomplete { service, missing } => write!(
                f,
                "サービス定義が不完全です: {} (不足: {})",
                service,
                missing.join(", ")
            ),
            Self::UnknownAttributes { service, keys } => write!(
                f,
                "サービス '{}' に使用されないキーがあります: {}",
                service,
                keys.join(", ")
            ),
            Self::InvalidAttribute {
                service,
                key,
                message,
            } => write!(
                f,
                "サービス '{}' の '{}' を読めないため無視しました: {}",
                service, key, message
            ),
        }
    }
}
