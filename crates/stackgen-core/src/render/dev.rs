//! 開発用 compose オーバーレイへの投影

use super::compose::{APP_MOUNT, BuildSection, ComposeFile, ComposeService};
use super::{ArtifactKind, to_yaml};
use crate::error::Result;
use crate::model::NormalizedService;
use serde_yaml::Value;

const DEV_DOCKERFILE: &str = "Dockerfile-dev";

/// dev_path を持つサービスをソースからビルドする compose ファイル
pub(crate) fn build(services: &[NormalizedService]) -> ComposeFile {
    let mut file = ComposeFile::default();

    for service in services {
        let Some(dev_path) = &service.spec.dev_path else {
            continue;
        };

        let ports = service.spec.declared_port().map(|port| {
            Value::Sequence(vec![Value::String(format!("{port}:{port}"))])
        });

        file.services.insert(
            service.id.clone(),
            ComposeService {
                container_name: service.container_name.clone(),
                build: Some(BuildSection {
                    context: dev_path.clone(),
                    dockerfile: DEV_DOCKERFILE.to_string(),
                }),
                volumes: vec![Value::String(format!("{dev_path}:{APP_MOUNT}"))],
                ports,
                ..Default::default()
            },
        );
    }

    file
}

pub(crate) fn render(services: &[NormalizedService]) -> Result<String> {
    to_yaml(ArtifactKind::ComposeDev, &build(services))
}
