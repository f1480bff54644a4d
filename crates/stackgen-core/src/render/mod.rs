//! 成果物の生成
//!
//! 正規化済みサービスを各成果物（compose / Caddyfile / ダッシュボード）へ投影します。
//! 各投影は互いに独立しており、同じ入力からは常に同じバイト列を生成します。

mod caddy;
mod compose;
mod dev;
mod directory;
mod proxy;

pub use compose::{BuildSection, ComposeFile, ComposeService, Declaration};
pub use directory::DirectoryEntry;

use crate::error::{GenError, Result};
use crate::model::Inventory;
use crate::normalize::{Diagnostic, Normalized, normalize};
use crate::settings::Settings;
use serde::Serialize;
use tracing::{info, instrument};

/// 成果物の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// サービス群の compose ファイル
    Compose,
    /// 開発用 compose オーバーレイ
    ComposeDev,
    /// リバースプロキシ設定
    Caddyfile,
    /// homepage ダッシュボードのサービス一覧
    Directory,
    /// Caddy 自身の compose ファイル
    ProxyCompose,
}

impl ArtifactKind {
    pub const ALL: [Self; 5] = [
        Self::Compose,
        Self::ComposeDev,
        Self::Caddyfile,
        Self::Directory,
        Self::ProxyCompose,
    ];

    /// 出力ディレクトリ内のファイル名
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Compose => "docker-compose.yml",
            Self::ComposeDev => "docker-compose.dev.yml",
            Self::Caddyfile => "Caddyfile",
            Self::Directory => "homepage_services.yaml",
            Self::ProxyCompose => "proxy.docker-compose.yml",
        }
    }
}

/// 生成された成果物
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub content: String,
}

/// 1回の生成結果
#[derive(Debug, Clone)]
pub struct Generation {
    /// 出力に含まれたサービスID（宣言順）
    pub services: Vec<String>,
    pub artifacts: Vec<Artifact>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.content.as_str())
    }
}

/// インベントリから全成果物を生成
#[instrument(skip_all, fields(domain = %settings.domain, mode = %settings.mode))]
pub fn generate(inventory: &Inventory, settings: &Settings) -> Result<Generation> {
    let normalized = normalize(inventory, settings);
    let generation = render_all(inventory, &normalized, settings)?;
    info!(
        services = generation.services.len(),
        diagnostics = generation.diagnostics.len(),
        "Artifacts rendered"
    );
    Ok(generation)
}

/// 正規化済みの結果から全成果物を生成
pub fn render_all(
    inventory: &Inventory,
    normalized: &Normalized,
    settings: &Settings,
) -> Result<Generation> {
    let services = &normalized.services;

    let artifacts = vec![
        Artifact {
            kind: ArtifactKind::Compose,
            content: compose::render(services, settings)?,
        },
        Artifact {
            kind: ArtifactKind::ComposeDev,
            content: dev::render(services)?,
        },
        Artifact {
            kind: ArtifactKind::Caddyfile,
            content: caddy::render(inventory.caddy_base_config.as_deref(), services),
        },
        Artifact {
            kind: ArtifactKind::Directory,
            content: directory::render(services)?,
        },
        Artifact {
            kind: ArtifactKind::ProxyCompose,
            content: proxy::render(settings)?,
        },
    ];

    Ok(Generation {
        services: services.iter().map(|s| s.id.clone()).collect(),
        artifacts,
        diagnostics: normalized.diagnostics.clone(),
    })
}

fn to_yaml<T: Serialize>(kind: ArtifactKind, value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(|source| GenError::Serialize {
        artifact: kind.file_name(),
        source,
    })
}
