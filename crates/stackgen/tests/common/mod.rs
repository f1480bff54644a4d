use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_inventory(&self, content: &str) {
        let path = self.root.path().join("custom.yml");
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_env(&self, content: &str) {
        let path = self.root.path().join(".env");
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, content: &str) {
        fs::write(self.root.path().join(name), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    #[allow(dead_code)]
    pub fn dist(&self) -> PathBuf {
        self.root.path().join("dist")
    }

    #[allow(dead_code)]
    pub fn read_dist(&self, file_name: &str) -> String {
        fs::read_to_string(self.dist().join(file_name)).unwrap()
    }

    /// 周囲の環境変数に左右されない stackgen コマンド
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("stackgen").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("DOMAIN")
            .env_remove("ENV")
            .env_remove("STACKGEN_INPUT")
            .env_remove("STACKGEN_NETWORK")
            .env_remove("STACKGEN_OUTPUT")
            .env_remove("RUST_LOG");
        cmd
    }
}
