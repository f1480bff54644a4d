//! サービスの検証と正規化
//!
//! 各サービスについて必須キー・未知のキーを検査し、投影に必要な値を導出します。
//! 除外されるのは必須キーが欠けたサービスだけです。
//! 問題は `Diagnostic` として収集して返し、ここではログ出力しません。

mod diagnostic;

pub use diagnostic::*;

use crate::model::{
    IMAGE_KEY, Inventory, NormalizedService, REQUIRED_KEYS, ServiceSpec, is_known_key, key_name,
};
use crate::settings::Settings;
use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument};

/// 正規化の結果
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// 検証を通過したサービス（宣言順）
    pub services: Vec<NormalizedService>,
    /// 検出された問題
    pub diagnostics: Vec<Diagnostic>,
}

impl Normalized {
    pub fn service(&self, id: &str) -> Option<&NormalizedService> {
        self.services.iter().find(|s| s.id == id)
    }

    /// 除外されたサービスID
    pub fn dropped(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.drops_service())
            .map(Diagnostic::service)
            .collect()
    }
}

/// インベントリ全体を正規化
#[instrument(skip_all, fields(domain = %settings.domain, mode = %settings.mode))]
pub fn normalize(inventory: &Inventory, settings: &Settings) -> Normalized {
    let mut normalized = Normalized::default();

    for (id, raw) in &inventory.services {
        let id = id.as_str();
        match normalize_service(id, raw, inventory, settings, &mut normalized.diagnostics) {
            Some(service) => normalized.services.push(service),
            None => debug!(service = %id, "Service excluded"),
        }
    }

    debug!(
        accepted = normalized.services.len(),
        diagnostics = normalized.diagnostics.len(),
        "Normalization complete"
    );
    normalized
}

/// 1つのサービスを検証して正規化
///
/// 除外された場合は `None` を返し、理由を `diagnostics` に積む。
fn normalize_service(
    id: &str,
    raw: &Value,
    inventory: &Inventory,
    settings: &Settings,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<NormalizedService> {
    // マッピング以外（`web:` だけ等）は属性無しとして扱う
    let empty = Mapping::new();
    let mapping = raw.as_mapping().unwrap_or(&empty);
    let present: Vec<String> = mapping.keys().map(key_name).collect();

    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|required| !present.iter().any(|key| key == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        diagnostics.push(Diagnostic::ServiceIncomplete {
            service: id.to_string(),
            missing,
        });
        return None;
    }

    let unknown: Vec<String> = present
        .into_iter()
        .filter(|key| !is_known_key(key))
        .collect();
    if !unknown.is_empty() {
        diagnostics.push(Diagnostic::UnknownAttributes {
            service: id.to_string(),
            keys: unknown,
        });
    }

    let spec = read_spec(id, mapping, diagnostics);
    Some(NormalizedService::new(id, spec, inventory, settings))
}

/// 既知のキーだけを型付きで読む
///
/// 読めない値はその属性だけを無視し、`InvalidAttribute` を積む。
/// サービス自体は除外しない。
fn read_spec(id: &str, mapping: &Mapping, diagnostics: &mut Vec<Diagnostic>) -> ServiceSpec {
    let image_key = Value::from(IMAGE_KEY);
    let image = mapping.get(IMAGE_KEY).cloned().unwrap_or(Value::Null);

    let mut accepted = Mapping::new();
    accepted.insert(image_key.clone(), image.clone());

    for (key, value) in mapping {
        let Some(name) = key.as_str().filter(|k| *k != IMAGE_KEY && is_known_key(k)) else {
            continue;
        };

        let single: Mapping = [(image_key.clone(), image.clone()), (key.clone(), value.clone())]
            .into_iter()
            .collect();
        match serde_yaml::from_value::<ServiceSpec>(Value::Mapping(single)) {
            Ok(_) => {
                accepted.insert(key.clone(), value.clone());
            }
            Err(e) => diagnostics.push(Diagnostic::InvalidAttribute {
                service: id.to_string(),
                key: name.to_string(),
                message: e.to_string(),
            }),
        }
    }

    serde_yaml::from_value(Value::Mapping(accepted)).unwrap_or_else(|_| ServiceSpec {
        image: key_name(&image),
        ..ServiceSpec::default()
    })
}
