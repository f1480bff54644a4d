//! インベントリ定義

use super::key::ScalarKey;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// サービスインベントリ
///
/// YAML形式：
/// ```yaml
/// caddy_base_config: |
///   { email admin@example.com }
/// groups:
///   1: Tools
/// services:
///   web:
///     image: nginx
///     subdomain: app
///     group: 1
/// ```
///
/// サービス本体は検証前の生の値として保持し、宣言順を保つ。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Inventory {
    /// Caddyfile の先頭にそのまま出力するプリアンブル
    #[serde(default)]
    pub caddy_base_config: Option<String>,
    /// グループID → 表示名
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: IndexMap<ScalarKey, String>,
    /// サービスID → サービス定義（未検証）
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: IndexMap<ScalarKey, serde_yaml::Value>,
}

impl Inventory {
    /// グループIDから表示名を引く
    pub fn group_name(&self, id: &ScalarKey) -> Option<&str> {
        self.groups.get(id).map(String::as_str)
    }
}

/// `services:` のように値が空（null）の場合もデフォルト値として扱う
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
