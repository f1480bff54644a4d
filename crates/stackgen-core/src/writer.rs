//! 成果物の書き出し
//!
//! 書き込みは成果物ごとに独立しており、1つが失敗しても残りは書き出す。

use crate::error::{GenError, Result};
use crate::render::Artifact;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// 成果物の書き出し先
pub trait ArtifactWriter {
    /// ファイルを書き込み、書き込んだパスを返す
    fn write(&mut self, file_name: &str, content: &str) -> Result<PathBuf>;

    /// 既存ファイルを出力先にコピーする
    fn copy(&mut self, source: &Path, file_name: &str) -> Result<PathBuf>;
}

/// ディレクトリへの書き出し
#[derive(Debug, Clone)]
pub struct DirWriter {
    root: PathBuf,
}

impl DirWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|source| GenError::Write {
            path: self.root.clone(),
            source,
        })
    }
}

impl ArtifactWriter for DirWriter {
    fn write(&mut self, file_name: &str, content: &str) -> Result<PathBuf> {
        self.ensure_root()?;
        let path = self.root.join(file_name);
        fs::write(&path, content).map_err(|source| GenError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    fn copy(&mut self, source: &Path, file_name: &str) -> Result<PathBuf> {
        self.ensure_root()?;
        let dest = self.root.join(file_name);
        fs::copy(source, &dest).map_err(|e| GenError::Copy {
            from: source.to_path_buf(),
            to: dest.clone(),
            source: e,
        })?;
        Ok(dest)
    }
}

/// 書き出し結果
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<GenError>,
}

impl WriteReport {
    /// 1件の書き込み結果を記録
    pub fn record(&mut self, result: Result<PathBuf>) {
        match result {
            Ok(path) => {
                info!(path = %path.display(), "File written successfully");
                self.written.push(path);
            }
            Err(e) => {
                error!(error = %e, "Failed to write file");
                self.failures.push(e);
            }
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 全成果物を書き出す
pub fn write_artifacts<W: ArtifactWriter + ?Sized>(
    writer: &mut W,
    artifacts: &[Artifact],
) -> WriteReport {
    let mut report = WriteReport::default();
    for artifact in artifacts {
        report.record(writer.write(artifact.kind.file_name(), &artifact.content));
    }
    report
}
