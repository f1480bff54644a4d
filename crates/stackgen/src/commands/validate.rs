use super::{Prepared, fatal, prepare};
use crate::InputArgs;
use colored::Colorize;
use serde::Serialize;
use stackgen_core::{Diagnostic, Mode, Normalized};
use std::process::ExitCode;

/// `--json` 出力
#[derive(Serialize)]
struct ValidationReport<'a> {
    input: String,
    domain: &'a str,
    mode: Mode,
    services: Vec<ServiceSummary<'a>>,
    diagnostics: &'a [Diagnostic],
}

#[derive(Serialize)]
struct ServiceSummary<'a> {
    id: &'a str,
    image: &'a str,
    group: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
}

fn summaries(normalized: &Normalized) -> Vec<ServiceSummary<'_>> {
    normalized
        .services
        .iter()
        .map(|service| ServiceSummary {
            id: &service.id,
            image: &service.spec.image,
            group: &service.group_name,
            host: service.route.as_ref().map(|route| route.host.as_str()),
        })
        .collect()
}

pub fn handle(args: &InputArgs, json: bool) -> anyhow::Result<ExitCode> {
    let Prepared {
        input,
        settings,
        inventory,
    } = match prepare(args) {
        Ok(prepared) => prepared,
        Err(e) => return Ok(fatal(e)),
    };

    let normalized = stackgen_core::normalize(&inventory, &settings);
    let success = normalized.dropped().is_empty();

    if json {
        let report = ValidationReport {
            input: input.display().to_string(),
            domain: &settings.domain,
            mode: settings.mode,
            services: summaries(&normalized),
            diagnostics: &normalized.diagnostics,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", "インベントリを検証中...".blue());
        println!("入力: {}", input.display().to_string().cyan());
        println!();
        println!("サービス: {}個", normalized.services.len());
        for summary in summaries(&normalized) {
            let target = summary.host.unwrap_or("(プロキシなし)");
            println!(
                "    - {} ({}) → {} [{}]",
                summary.id.cyan(),
                summary.image,
                target,
                summary.group
            );
        }

        if !normalized.diagnostics.is_empty() {
            println!();
            println!("警告: {}件", normalized.diagnostics.len());
            for diagnostic in &normalized.diagnostics {
                println!("    - {}", diagnostic.to_string().yellow());
            }
        }

        println!();
        if success {
            println!("{}", "✓ インベントリは正常です！".green().bold());
        } else {
            eprintln!(
                "{}",
                format!("✗ {}個のサービスが除外されます", normalized.dropped().len())
                    .red()
                    .bold()
            );
        }
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
