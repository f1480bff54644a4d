//! Caddy 自身の compose ファイル

use super::compose::{ComposeFile, ComposeService, RESTART_POLICY};
use super::{ArtifactKind, to_yaml};
use crate::error::Result;
use crate::settings::Settings;
use serde_yaml::Value;

const CADDY_SERVICE: &str = "caddy";
const CADDY_IMAGE: &str = "caddy:2.8.4";
const CADDY_VOLUMES: &[&str] = &[
    "/var/run/docker.sock:/var/run/docker.sock",
    "./Caddyfile:/etc/caddy/Caddyfile",
];
const CADDY_PORTS: &[&str] = &["80:80", "443:443", "443:443/udp", "5000:5000"];

fn strings(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::String(v.to_string())).collect()
}

pub(crate) fn build(settings: &Settings) -> ComposeFile {
    let mut file = ComposeFile::with_external_network(&settings.network);
    file.services.insert(
        CADDY_SERVICE.to_string(),
        ComposeService {
            container_name: CADDY_SERVICE.to_string(),
            image: Some(CADDY_IMAGE.to_string()),
            restart: Some(RESTART_POLICY.to_string()),
            networks: vec![settings.network.clone()],
            volumes: strings(CADDY_VOLUMES),
            ports: Some(Value::Sequence(strings(CADDY_PORTS))),
            ..Default::default()
        },
    );
    file
}

pub(crate) fn render(settings: &Settings) -> Result<String> {
    to_yaml(ArtifactKind::ProxyCompose, &build(settings))
}
