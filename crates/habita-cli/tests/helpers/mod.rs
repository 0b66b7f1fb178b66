use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness that runs the binary against a temporary data file.
pub struct CliTestHarness {
    temp_dir: TempDir,
    data_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let data_path = temp_dir.path().join("test.json");
        Self {
            temp_dir,
            data_path,
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("habita").expect("Failed to find habita binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env("HABITA_DATA_FILE", &self.data_path);
        cmd
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}
