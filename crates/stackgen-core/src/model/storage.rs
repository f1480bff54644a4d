//! ストレージモード

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// 永続ボリュームのマウント先（コンテナ内）
pub const DATA_MOUNT: &str = "/data";

/// ストレージモード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// compose ファイル内で宣言するボリューム
    Internal,
    /// 外部で用意済みのボリューム
    External,
}

impl StorageMode {
    /// YAMLの値から判定する
    ///
    /// `internal` のみ Internal。その他の truthy な値は External、
    /// falsy な値（null, false, 0, 空文字）はストレージ無し。
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) if s == "internal" => Some(Self::Internal),
            Value::Tagged(tagged) => Self::from_value(&tagged.value),
            _ => Some(Self::External),
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External)
    }
}

pub(crate) fn deserialize_storage<'de, D>(deserializer: D) -> Result<Option<StorageMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(StorageMode::from_value(&value))
}
