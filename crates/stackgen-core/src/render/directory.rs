//! homepage ダッシュボードへの投影

use super::{ArtifactKind, to_yaml};
use crate::error::Result;
use crate::model::NormalizedService;
use indexmap::IndexMap;
use serde::Serialize;

/// ダッシュボードのサービスエントリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub href: String,
    pub container: String,
    #[serde(rename = "showStats")]
    pub show_stats: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl DirectoryEntry {
    fn for_service(service: &NormalizedService) -> Self {
        Self {
            href: service.href(),
            container: service.container_name.clone(),
            show_stats: true,
            description: service.spec.description.clone(),
            icon: service.spec.icon.clone(),
        }
    }
}

type Listing<'a> = Vec<IndexMap<&'a str, Vec<IndexMap<&'a str, DirectoryEntry>>>>;

/// グループごとのサービス一覧を組み立てる
///
/// グループはサービスを走査して最初に現れた順に並ぶ。
pub(crate) fn build(services: &[NormalizedService]) -> Listing<'_> {
    let mut groups: IndexMap<&str, Vec<IndexMap<&str, DirectoryEntry>>> = IndexMap::new();

    for service in services {
        groups
            .entry(service.group_name.as_str())
            .or_default()
            .push(IndexMap::from([(
                service.display_name.as_str(),
                DirectoryEntry::for_service(service),
            )]));
    }

    groups
        .into_iter()
        .map(|(group, entries)| IndexMap::from([(group, entries)]))
        .collect()
}

pub(crate) fn render(services: &[NormalizedService]) -> Result<String> {
    to_yaml(ArtifactKind::Directory, &build(services))
}
