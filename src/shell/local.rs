//! 本地 bash 执行器

use super::{CommandOutput, Shell};
use crate::error::{Result, SwitchError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// 在本机通过 `bash -c` 执行命令
#[derive(Debug, Clone, Default)]
pub struct LocalShell {
    current_dir: Option<PathBuf>,
}

impl LocalShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在指定目录中执行命令
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            current_dir: Some(dir.into()),
        }
    }
}

impl Shell for LocalShell {
    #[tracing::instrument(skip(self), fields(dir = ?self.current_dir))]
    fn run(&mut self, command: &str) -> Result<CommandOutput> {
        let mut cmd = Command::new("bash");
        cmd.arg("-c").arg(command);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        let output = cmd.output().map_err(|source| SwitchError::Filesystem {
            path: PathBuf::from("bash"),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(%stdout, "stdout");
        debug!(%stderr, "stderr");

        if !output.status.success() {
            return Err(SwitchError::ExternalCommand {
                command: command.to_string(),
                status: output.status.code(),
                stderr,
            });
        }
        Ok(CommandOutput { stdout, stderr })
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        let path = match &self.current_dir {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        };
        debug!(path = ?path, bytes = contents.len(), "写入文件");
        fs::write(&path, contents).map_err(|source| SwitchError::Filesystem { path, source })
    }
}
