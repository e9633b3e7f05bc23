//! 错误类型
//!
//! 配置生成、构建与启停过程中的所有错误都在这里定义，并原样向调用方传播。

use crate::topo::{LeafId, LinkTarget, SwitchId};
use std::path::PathBuf;
use thiserror::Error;

/// 交换机配置/构建错误
#[derive(Debug, Error)]
pub enum SwitchError {
    /// 只支持一条上行链路
    #[error("switch {switch_id}: uplink {uplink_index} requested, only 1 uplink is supported")]
    UnsupportedTopology {
        switch_id: SwitchId,
        uplink_index: usize,
    },

    /// 节点没有该编号的上行链路
    #[error("switch {switch_id}: has no uplink {uplink_index}")]
    MissingUplink {
        switch_id: SwitchId,
        uplink_index: usize,
    },

    /// 在上行对端的下行链路中找不到本节点（拓扑不一致）
    #[error("switch {switch_id}: not found among the downlinks of its uplink peer {peer:?}")]
    Resolution { switch_id: SwitchId, peer: LinkTarget },

    /// 节点尚未绑定到具有私有地址的主机
    #[error("switch {switch_id}: host must be bound to a private address to emit an uplink")]
    UnboundHost { switch_id: SwitchId },

    /// `base_port + 下标` 超出 TCP 端口范围
    #[error("switch {switch_id}: port {port} is out of the TCP port range")]
    PortOutOfRange { switch_id: SwitchId, port: usize },

    /// 外部命令返回非零退出码
    #[error("command `{command}` failed with status {status:?}: {stderr}")]
    ExternalCommand {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// 文件系统操作失败
    #[error("filesystem operation on {path:?} failed: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown switch {0}")]
    UnknownSwitch(SwitchId),

    #[error("duplicate switch {0}")]
    DuplicateSwitch(SwitchId),

    /// MAC 表项（端口号）超出 `u16`
    #[error("switch table entry {0} does not fit in u16")]
    TableEntryOutOfRange(usize),

    #[error("unknown leaf {0}")]
    UnknownLeaf(LeafId),

    #[error("invalid build identity {0:?}")]
    InvalidBuildIdentity(String),

    /// 拓扑/选项 JSON 文件无法解析
    #[error("cannot parse {path:?}: {source}")]
    FabricFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, SwitchError>;
