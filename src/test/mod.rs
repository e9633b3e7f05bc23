mod build_identity;
mod config_emitter;

use crate::error::{Result, SwitchError};
use crate::shell::{CommandOutput, Shell};
use crate::topo::{
    HostBinding, LeafEndpoint, LeafId, LinkDescriptor, LinkTarget, SwitchId, SwitchNode,
    SwitchPeer,
};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

/// 记录所有命令与写文件操作；可以让第 `fail_at` 条命令失败
#[derive(Debug, Default)]
pub(crate) struct RecordingShell {
    pub commands: Vec<String>,
    pub writes: Vec<(PathBuf, String)>,
    pub fail_at: Option<usize>,
}

impl Shell for RecordingShell {
    fn run(&mut self, command: &str) -> Result<CommandOutput> {
        let idx = self.commands.len();
        self.commands.push(command.to_string());
        if self.fail_at == Some(idx) {
            return Err(SwitchError::ExternalCommand {
                command: command.to_string(),
                status: Some(2),
                stderr: "boom".to_string(),
            });
        }
        Ok(CommandOutput::default())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<()> {
        self.writes.push((path.to_path_buf(), contents.to_string()));
        Ok(())
    }
}

pub(crate) fn addr(raw: &str) -> IpAddr {
    raw.parse().expect("valid ip")
}

pub(crate) fn leaf(id: usize) -> LinkDescriptor {
    LinkDescriptor::LeafEndpoint(LeafEndpoint { leaf_id: LeafId(id) })
}

pub(crate) fn switch_peer(id: usize, downlinks: Vec<LinkTarget>, host: HostBinding) -> LinkDescriptor {
    LinkDescriptor::SwitchPeer(SwitchPeer {
        switch_id: SwitchId(id),
        downlinks,
        host,
    })
}

/// 下行链路为 [leaf, switch]、无上行链路的节点
pub(crate) fn leaf_and_switch_node() -> SwitchNode {
    let mut node = SwitchNode::new(SwitchId(7));
    node.downlinks = vec![leaf(0), switch_peer(8, vec![], HostBinding::Unbound)];
    node.switch_table = vec![0, 1, 0, 1];
    node
}

/// 作为交换机 9 的第 3 条下行链路（下标 2）的节点，双方都绑定到 10.0.0.5
pub(crate) fn uplinked_node() -> SwitchNode {
    let bound = HostBinding::bound(addr("10.0.0.5"));
    let mut node = SwitchNode::new(SwitchId(3));
    node.downlinks = vec![leaf(0), leaf(1)];
    node.uplinks = vec![switch_peer(
        9,
        vec![
            LinkTarget::Switch(SwitchId(1)),
            LinkTarget::Switch(SwitchId(2)),
            LinkTarget::Switch(SwitchId(3)),
        ],
        bound,
    )];
    node.switch_table = vec![0, 1, 2, 2];
    node.host = bound;
    node.link_latency = 6405;
    node.switching_latency = 10;
    node
}
