//! 外部命令执行
//!
//! 构建与启停通过 `Shell` 执行外部命令、写文件；命令如何被送达（本地或远程）由实现决定。

mod local;

pub use local::LocalShell;

use crate::error::Result;
use std::path::Path;

/// 一条已成功执行命令的输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// 命令执行器。非零退出码必须以 `SwitchError::ExternalCommand` 返回。
pub trait Shell {
    fn run(&mut self, command: &str) -> Result<CommandOutput>;

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// 用单引号包裹，使参数对 POSIX shell 成为一个字面量
pub fn quote(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', r"'\''"))
}

pub fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy())
}
