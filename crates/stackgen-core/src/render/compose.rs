//! docker compose ファイルへの投影

use super::{ArtifactKind, to_yaml};
use crate::error::Result;
use crate::model::{DATA_MOUNT, NormalizedService, StorageMode};
use crate::settings::Settings;
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

/// 全サービス共通の再起動ポリシー
pub(crate) const RESTART_POLICY: &str = "always";
/// 開発モードで dev_path をマウントするコンテナ内パス
pub(crate) const APP_MOUNT: &str = "/app";

/// compose ファイル
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComposeFile {
    pub services: IndexMap<String, ComposeService>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<IndexMap<String, Declaration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks: Option<IndexMap<String, Declaration>>,
}

impl ComposeFile {
    /// 外部ネットワークを宣言した空のファイル
    pub fn with_external_network(network: &str) -> Self {
        Self {
            networks: Some(IndexMap::from([(
                network.to_string(),
                Declaration::external(),
            )])),
            ..Default::default()
        }
    }
}

/// compose のサービス定義
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComposeService {
    pub container_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<BuildSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restart: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub networks: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<Value>,
}

/// ビルド設定
#[derive(Debug, Clone, Serialize)]
pub struct BuildSection {
    pub context: String,
    pub dockerfile: String,
}

/// ボリューム・ネットワークの宣言
///
/// ローカル宣言は `{}`、外部参照は `{ external: true }` として出力される。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Declaration {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

impl Declaration {
    pub fn local() -> Self {
        Self { external: false }
    }

    pub fn external() -> Self {
        Self { external: true }
    }

    fn for_storage(storage: StorageMode) -> Self {
        if storage.is_external() {
            Self::external()
        } else {
            Self::local()
        }
    }
}

/// 環境変数の値はデプロイ時に解決させる
fn env_placeholder(name: &str) -> String {
    format!("{name}=${{{name}}}")
}

pub(crate) fn build(services: &[NormalizedService], settings: &Settings) -> ComposeFile {
    let mut file = ComposeFile::with_external_network(&settings.network);
    let mut volumes = IndexMap::new();

    for service in services {
        let spec = &service.spec;

        let mut mounts = spec.volumes.clone();
        if let Some(storage) = spec.storage {
            volumes.insert(
                service.volume_name.clone(),
                Declaration::for_storage(storage),
            );
            mounts.push(Value::String(format!(
                "{}:{}",
                service.volume_name, DATA_MOUNT
            )));
        }
        if settings.mode.is_development()
            && let Some(dev_path) = &spec.dev_path
        {
            mounts.push(Value::String(format!("{dev_path}:{APP_MOUNT}")));
        }

        let compose_service = ComposeService {
            container_name: service.container_name.clone(),
            image: Some(spec.image.clone()),
            restart: Some(RESTART_POLICY.to_string()),
            networks: vec![settings.network.clone()],
            environment: spec.environment.iter().map(|n| env_placeholder(n)).collect(),
            volumes: mounts,
            labels: spec.labels.clone(),
            ports: spec.ports.clone(),
            command: spec.command.clone(),
            depends_on: spec.depends_on.clone(),
            ..Default::default()
        };
        file.services.insert(service.id.clone(), compose_service);
    }

    file.volumes = Some(volumes);
    file
}

pub(crate) fn render(services: &[NormalizedService], settings: &Settings) -> Result<String> {
    to_yaml(ArtifactKind::Compose, &build(services, settings))
}
