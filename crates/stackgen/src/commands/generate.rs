use super::{Prepared, fatal, log_diagnostics, prepare};
use crate::InputArgs;
use colored::Colorize;
use stackgen_core::{ArtifactWriter, DirWriter, WriteReport, write_artifacts};
use std::path::Path;
use std::process::ExitCode;
use tracing::warn;

/// 出力先にコピーする .env のファイル名
const ENV_FILE_NAME: &str = ".env";
/// 出力先にコピーするプロキシ用 Dockerfile のファイル名
const CADDY_DOCKERFILE_NAME: &str = "Dockerfile-caddy";

/// ファイルがあれば出力先にコピーする（無ければ警告のみ）
fn copy_if_present(
    writer: &mut impl ArtifactWriter,
    report: &mut WriteReport,
    source: &Path,
    file_name: &str,
) {
    if source.is_file() {
        report.record(writer.copy(source, file_name));
    } else {
        warn!(path = %source.display(), "File not found, skipping copy");
    }
}

pub fn handle(
    args: &InputArgs,
    output: &Path,
    caddy_dockerfile: &Path,
) -> anyhow::Result<ExitCode> {
    let Prepared {
        input,
        settings,
        inventory,
    } = match prepare(args) {
        Ok(prepared) => prepared,
        Err(e) => return Ok(fatal(e)),
    };

    println!(
        "{} {} ({}, {})",
        "生成中:".blue(),
        input.display().to_string().cyan(),
        settings.domain,
        settings.mode
    );

    let generation = stackgen_core::generate(&inventory, &settings)?;
    log_diagnostics(&generation.diagnostics);

    let mut writer = DirWriter::new(output);
    let mut report = write_artifacts(&mut writer, &generation.artifacts);

    copy_if_present(&mut writer, &mut report, &args.env_file, ENV_FILE_NAME);
    copy_if_present(
        &mut writer,
        &mut report,
        caddy_dockerfile,
        CADDY_DOCKERFILE_NAME,
    );

    for path in &report.written {
        println!("  {} {}", "✓".green(), path.display());
    }
    for failure in &report.failures {
        eprintln!("  {} {}", "✗".red(), failure);
    }

    println!();
    println!(
        "サービス: {}個, 警告: {}件",
        generation.services.len(),
        generation.diagnostics.len()
    );

    if report.is_success() {
        println!("{}", "✓ 生成が完了しました".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{}",
            format!("✗ {}個のファイルを書き込めませんでした", report.failures.len())
                .red()
                .bold()
        );
        Ok(ExitCode::FAILURE)
    }
}
