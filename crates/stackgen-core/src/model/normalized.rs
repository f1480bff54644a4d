//! 正規化済みサービス

use super::inventory::Inventory;
use super::service::ServiceSpec;
use crate::settings::Settings;

/// グループ未指定のサービスが入るバケット
pub const UNGROUPED: &str = "Ungrouped";

/// ワイルドカードのサブドメインをリンクにするときの置き換え先
pub const WILDCARD_LINK_SUBDOMAIN: &str = "app";

/// 公開ルート（ホスト名と転送先ポート）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub host: String,
    pub port: u16,
}

impl Route {
    /// ダッシュボードに表示するリンク
    ///
    /// `*.example.com` はクリックできないので `app.example.com` にする。
    pub fn href(&self) -> String {
        match self.host.strip_prefix("*.") {
            Some(domain) => format!("http://{}.{}", WILDCARD_LINK_SUBDOMAIN, domain),
            None => format!("http://{}", self.host),
        }
    }
}

/// 検証を通過したサービスと、そこから導出される値
#[derive(Debug, Clone)]
pub struct NormalizedService {
    pub id: String,
    pub spec: ServiceSpec,
    pub container_name: String,
    pub volume_name: String,
    pub display_name: String,
    /// プロキシ対象の場合のみ Some
    pub route: Option<Route>,
    /// ダッシュボード上のグループ表示名
    pub group_name: String,
}

impl NormalizedService {
    pub fn new(id: &str, spec: ServiceSpec, inventory: &Inventory, settings: &Settings) -> Self {
        let route = spec.proxy_target().map(|target| Route {
            host: settings.public_host(target.subdomain.as_deref()),
            port: target.port,
        });

        // groups で解決できなければグループIDそのもの、未指定なら Ungrouped
        let group_name = match &spec.group {
            Some(group) => inventory
                .group_name(group)
                .map(str::to_string)
                .unwrap_or_else(|| group.to_string()),
            None => UNGROUPED.to_string(),
        };

        Self {
            id: id.to_string(),
            container_name: id.to_string(),
            volume_name: format!("{}_data", id),
            display_name: spec.title.clone().unwrap_or_else(|| id.to_string()),
            route,
            group_name,
            spec,
        }
    }

    /// ダッシュボードのリンク（プロキシ対象外なら `#`）
    pub fn href(&self) -> String {
        self.route
            .as_ref()
            .map(Route::href)
            .unwrap_or_else(|| "#".to_string())
    }
}
