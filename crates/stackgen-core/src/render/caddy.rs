//! Caddyfile への投影

use crate::model::NormalizedService;

/// Caddyfile を生成
///
/// プリアンブルをそのまま出力し、プロキシ対象のサービスごとにブロックを追加する。
/// 同じホストが複数あってもそのまま出力する（Caddy 側で後勝ち）。
pub(crate) fn render(preamble: Option<&str>, services: &[NormalizedService]) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(preamble) = preamble.filter(|p| !p.trim().is_empty()) {
        lines.push(preamble.trim_end_matches('\n').to_string());
    }

    for service in services {
        let Some(route) = &service.route else {
            continue;
        };
        lines.push(format!("{} {{", route.host));
        lines.push(format!(
            "    reverse_proxy {}:{}",
            service.container_name, route.port
        ));
        if service.spec.basic_auth() {
            lines.push("    import auth".to_string());
        }
        lines.push("}".to_string());
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut content = lines.join("\n");
    content.push('\n');
    content
}
