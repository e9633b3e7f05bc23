//! 交换网络选项
//!
//! 构造每个配置/构建控制器时显式传入，不存在进程级的全局端口常量。

use crate::error::{Result, SwitchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_PORT: u16 = 10000;
pub const DEFAULT_SWITCH_SRC_DIR: &str = "../target-design/switch/";
pub const DEFAULT_LOG_NAME: &str = "switchlog";

fn default_base_port() -> u16 {
    DEFAULT_BASE_PORT
}

fn default_switch_src_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SWITCH_SRC_DIR)
}

fn default_log_name() -> String {
    DEFAULT_LOG_NAME.to_string()
}

fn default_settle_secs() -> u64 {
    1
}

fn default_kill_with_sudo() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FabricOptions {
    /// 各链路 server 端口的起始端口号
    #[serde(default = "default_base_port")]
    pub base_port: u16,
    /// 与节点无关的交换机模型源码目录（含 `*.h`、`*.cc`、`Makefile`）
    #[serde(default = "default_switch_src_dir")]
    pub switch_src_dir: PathBuf,
    /// 交换机运行日志文件名
    #[serde(default = "default_log_name")]
    pub log_name: String,
    /// 启动命令返回前等待会话就绪的秒数
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,
    #[serde(default = "default_kill_with_sudo")]
    pub kill_with_sudo: bool,
}

impl Default for FabricOptions {
    fn default() -> Self {
        Self {
            base_port: DEFAULT_BASE_PORT,
            switch_src_dir: default_switch_src_dir(),
            log_name: default_log_name(),
            settle_secs: default_settle_secs(),
            kill_with_sudo: default_kill_with_sudo(),
        }
    }
}

impl FabricOptions {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SwitchError::Filesystem {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SwitchError::FabricFile {
            path: path.to_path_buf(),
            source,
        })
    }
}
