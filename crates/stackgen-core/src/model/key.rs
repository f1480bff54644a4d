//! スカラーキー

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// YAMLのスカラー値を文字列として扱うキー
///
/// `groups` のキーは `1: Tools` のように整数で書かれることが多いため、
/// 文字列・整数・真偽値のいずれも同じ文字列表現に揃える。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Scalar")]
pub struct ScalarKey(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl From<Scalar> for ScalarKey {
    fn from(scalar: Scalar) -> Self {
        Self(scalar.into_string())
    }
}

/// 任意のスカラー値を文字列として読む（`title: 2048` など）
pub(crate) fn deserialize_optional_text<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_string))
}

/// キーが存在すれば値が null でも `Some` にする
pub(crate) fn deserialize_present_text<'de, D>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_text(deserializer).map(Some)
}

/// どんな値でも文字列にする（スカラー以外はYAML表記）
pub(crate) fn deserialize_any_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    serde_yaml::Value::deserialize(deserializer).map(|value| key_name(&value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Port {
    Number(u16),
    Text(String),
}

/// ポート番号を読む（`8080` と `"8080"` のどちらも可）
pub(crate) fn deserialize_optional_port<'de, D>(
    deserializer: D,
) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Port>::deserialize(deserializer) {
        Ok(None) => Ok(None),
        Ok(Some(Port::Number(port))) => Ok(Some(port)),
        Ok(Some(Port::Text(text))) => text.trim().parse().map(Some).map_err(|_| {
            serde::de::Error::custom(format!("invalid port number: {:?}", text))
        }),
        Err(_) => Err(serde::de::Error::custom(
            "expected a port number between 0 and 65535",
        )),
    }
}

impl ScalarKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScalarKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ScalarKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ScalarKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// マッピングのキーを表示用の文字列にする
pub(crate) fn key_name(key: &serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| "?".to_string()),
    }
}
