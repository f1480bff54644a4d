//! サービス定義

use super::key::{
    ScalarKey, deserialize_any_text, deserialize_optional_port, deserialize_optional_text,
    deserialize_present_text,
};
use super::storage::{StorageMode, deserialize_storage};
use serde::Deserialize;
use serde_yaml::Value;

/// イメージ指定のキー
pub const IMAGE_KEY: &str = "image";

/// 必須キー
pub const REQUIRED_KEYS: &[&str] = &[IMAGE_KEY];

/// 任意キー（これ以外のキーは未使用として警告される）
pub const OPTIONAL_KEYS: &[&str] = &[
    "title",
    "description",
    "icon",
    "environment",
    "volumes",
    "labels",
    "subdomain",
    "internal_port",
    "reverse_proxy",
    "ports",
    "command",
    "depends_on",
    "storage",
    "dev_path",
    "group",
    "auth",
];

/// リバースプロキシのデフォルト転送先ポート
pub const DEFAULT_PROXY_PORT: u16 = 80;

/// 既知のキーかどうか
pub fn is_known_key(key: &str) -> bool {
    REQUIRED_KEYS.contains(&key) || OPTIONAL_KEYS.contains(&key)
}

/// サービス定義
///
/// YAML形式：
/// ```yaml
/// web:
///   image: nginx
///   environment: [API_KEY]
///   volumes: ["./conf:/etc/nginx/conf.d"]
///   storage: internal
///   subdomain: app
///   internal_port: 8080
///   group: 1
///   title: Web
/// ```
///
/// `labels` / `ports` / `command` / `depends_on` は解釈せずそのまま出力する。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSpec {
    #[serde(deserialize_with = "deserialize_any_text")]
    pub image: String,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub icon: Option<String>,
    /// 環境変数名（値は生成時に解決せず `${NAME}` として出力）
    #[serde(default)]
    pub environment: Vec<String>,
    #[serde(default)]
    pub volumes: Vec<Value>,
    pub labels: Option<Value>,
    pub ports: Option<Value>,
    pub command: Option<Value>,
    pub depends_on: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_storage")]
    pub storage: Option<StorageMode>,
    /// フラット記法のサブドメイン（キーが存在すればプロキシ対象）
    #[serde(default, deserialize_with = "deserialize_present_text")]
    pub subdomain: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_optional_port")]
    pub internal_port: Option<u16>,
    /// ネスト記法のリバースプロキシ設定
    pub reverse_proxy: Option<ReverseProxy>,
    /// 開発モードで /app にマウントするホストパス
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub dev_path: Option<String>,
    pub group: Option<ScalarKey>,
    /// `basic` の場合 Caddy の (auth) スニペットを取り込む
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub auth: Option<String>,
}


/// ネスト記法のリバースプロキシ設定
///
/// ```yaml
/// reverse_proxy: true
/// reverse_proxy:
///   subdomain: app
///   port: 8080
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ReverseProxy {
    Enabled(bool),
    Target {
        #[serde(default, deserialize_with = "deserialize_optional_text")]
        subdomain: Option<String>,
        #[serde(
            default,
            alias = "internal_port",
            deserialize_with = "deserialize_optional_port"
        )]
        port: Option<u16>,
    },
}

/// プロキシの転送設定（解決済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    pub subdomain: Option<String>,
    pub port: u16,
}

impl ServiceSpec {
    /// 明示的に指定されたバックエンドポート
    pub fn declared_port(&self) -> Option<u16> {
        match &self.reverse_proxy {
            Some(ReverseProxy::Target {
                port: Some(port), ..
            }) => Some(*port),
            _ => self.internal_port,
        }
    }

    /// リバースプロキシの転送設定を解決する
    ///
    /// ネスト記法が優先され、`reverse_proxy: false` は明示的な無効化。
    /// どちらの記法も無ければプロキシ対象外。
    pub fn proxy_target(&self) -> Option<ProxyTarget> {
        let flat = self.subdomain.clone().flatten();
        let subdomain = match (&self.reverse_proxy, &self.subdomain) {
            (Some(ReverseProxy::Enabled(false)), _) => return None,
            (Some(ReverseProxy::Enabled(true)), _) => flat,
            (Some(ReverseProxy::Target { subdomain, .. }), _) => subdomain.clone().or(flat),
            (None, Some(_)) => flat,
            (None, None) => return None,
        };

        Some(ProxyTarget {
            subdomain: subdomain.filter(|s| !s.is_empty()),
            port: self.declared_port().unwrap_or(DEFAULT_PROXY_PORT),
        })
    }

    /// Basic認証を要求するか
    pub fn basic_auth(&self) -> bool {
        self.auth.as_deref() == Some("basic")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(yaml: &str) -> ServiceSpec {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_no_proxy_without_descriptor() {
        let service = spec("image: redis");
        assert_eq!(service.proxy_target(), None);
    }

    #[test]
    fn test_flat_subdomain() {
        let service = spec("image: nginx\nsubdomain: app\ninternal_port: 8080");
        assert_eq!(
            service.proxy_target(),
            Some(ProxyTarget {
                subdomain: Some("app".to_string()),
                port: 8080,
            })
        );
    }

    #[test]
    fn test_empty_flat_subdomain_targets_bare_domain() {
        let service = spec("image: nginx\nsubdomain:");
        assert_eq!(service.subdomain, Some(None));
        assert_eq!(
            service.proxy_target(),
            Some(ProxyTarget {
                subdomain: None,
                port: DEFAULT_PROXY_PORT,
            })
        );

        let service = spec("image: nginx\nsubdomain: ''");
        assert_eq!(service.proxy_target().unwrap().subdomain, None);
    }

    #[test]
    fn test_nested_reverse_proxy() {
        let service = spec("image: grafana\nreverse_proxy:\n  subdomain: stats\n  port: 3000");
        assert_eq!(
            service.proxy_target(),
            Some(ProxyTarget {
                subdomain: Some("stats".to_string()),
                port: 3000,
            })
        );
    }

    #[test]
    fn test_nested_internal_port_alias() {
        let service = spec("image: grafana\nreverse_proxy:\n  internal_port: 3000");
        assert_eq!(service.declared_port(), Some(3000));
        assert_eq!(service.proxy_target().unwrap().subdomain, None);
    }

    #[test]
    fn test_reverse_proxy_flag() {
        let enabled = spec("image: nginx\nreverse_proxy: true\ninternal_port: 81");
        assert_eq!(
            enabled.proxy_target(),
            Some(ProxyTarget {
                subdomain: None,
                port: 81,
            })
        );

        let disabled = spec("image: nginx\nreverse_proxy: false\nsubdomain: app");
        assert_eq!(disabled.proxy_target(), None);
    }

    #[test]
    fn test_scalar_attributes_read_as_text() {
        let service = spec("image: 2048\ntitle: 2048\nsubdomain: 2048\ninternal_port: '8080'");
        assert_eq!(service.image, "2048");
        assert_eq!(service.title.as_deref(), Some("2048"));
        assert_eq!(
            service.proxy_target(),
            Some(ProxyTarget {
                subdomain: Some("2048".to_string()),
                port: 8080,
            })
        );
    }

    #[test]
    fn test_nested_port_as_string() {
        let service = spec("image: grafana\nreverse_proxy:\n  subdomain: 3\n  port: '3000'");
        assert_eq!(
            service.proxy_target(),
            Some(ProxyTarget {
                subdomain: Some("3".to_string()),
                port: 3000,
            })
        );
    }

    #[test]
    fn test_basic_auth() {
        assert!(spec("image: nginx\nauth: basic").basic_auth());
        assert!(!spec("image: nginx\nauth: oauth").basic_auth());
        assert!(!spec("image: nginx").basic_auth());
    }

    #[test]
    fn test_known_keys() {
        assert!(is_known_key("image"));
        assert!(is_known_key("dev_path"));
        assert!(!is_known_key("healthcheck"));
    }
}
