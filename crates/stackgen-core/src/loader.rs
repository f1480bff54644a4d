//! インベントリローダー
//!
//! YAMLファイルを読み込み、`Inventory` を生成します。

use crate::error::{GenError, Result};
use crate::model::Inventory;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// インベントリファイルを読み込む
///
/// ファイルが存在しなければ `InputNotFound`、YAMLとして不正なら `InputParse`。
#[instrument(fields(path = %path.display()))]
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    if !path.exists() {
        warn!("Inventory file not found");
        return Err(GenError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| GenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = content.len(), "Inventory file read");

    let inventory = parse_inventory(&content, path)?;
    info!(
        services = inventory.services.len(),
        groups = inventory.groups.len(),
        "Inventory loaded"
    );

    Ok(inventory)
}

/// YAML文字列をパース
///
/// `origin` はエラーメッセージに使うパス。空のドキュメントは空のインベントリになる。
pub fn parse_inventory(content: &str, origin: &Path) -> Result<Inventory> {
    if content.trim().is_empty() {
        return Ok(Inventory::default());
    }

    let parse_error = |e: serde_yaml::Error| GenError::InputParse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    };

    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if value.is_null() {
        return Ok(Inventory::default());
    }

    serde_yaml::from_value(value).map_err(parse_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScalarKey;
    use std::fs;

    #[test]
    fn test_load_inventory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.yml");
        fs::write(
            &path,
            r#"
caddy_base_config: |
  {
      email admin@example.com
  }
groups:
  1: Tools
services:
  web:
    image: nginx
    subdomain: app
  db:
    image: postgres
"#,
        )
        .unwrap();

        let inventory = load_inventory(&path).unwrap();
        assert_eq!(inventory.services.len(), 2);
        assert_eq!(inventory.groups.len(), 1);
        assert!(
            inventory
                .caddy_base_config
                .as_deref()
                .unwrap()
                .contains("email admin@example.com")
        );

        // 宣言順が保たれる
        let ids: Vec<&str> = inventory.services.keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["web", "db"]);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.yml");

        let result = load_inventory(&path);
        assert!(matches!(result, Err(GenError::InputNotFound { .. })));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("custom.yml");
        fs::write(&path, "services:\n  web: [unclosed\n").unwrap();

        let result = load_inventory(&path);
        assert!(matches!(result, Err(GenError::InputParse { .. })));
    }

    #[test]
    fn test_wrong_top_level_shape() {
        let result = parse_inventory("services: [web, db]\n", Path::new("custom.yml"));
        assert!(matches!(result, Err(GenError::InputParse { .. })));

        let result = parse_inventory("- just\n- a list\n", Path::new("custom.yml"));
        assert!(matches!(result, Err(GenError::InputParse { .. })));
    }

    #[test]
    fn test_empty_document() {
        let inventory = parse_inventory("\n  \n", Path::new("custom.yml")).unwrap();
        assert!(inventory.services.is_empty());
        assert!(inventory.caddy_base_config.is_none());
    }

    #[test]
    fn test_null_sections() {
        let inventory = parse_inventory("groups:\nservices:\n", Path::new("custom.yml")).unwrap();
        assert!(inventory.services.is_empty());
        assert!(inventory.groups.is_empty());
    }

    #[test]
    fn test_services_keep_raw_values() {
        let inventory = parse_inventory(
            "services:\n  web:\n    image: nginx\n    unknown_key: 1\n",
            Path::new("custom.yml"),
        )
        .unwrap();

        let web = &inventory.services[&ScalarKey::from("web")];
        assert!(web.get("unknown_key").is_some());
    }
}
