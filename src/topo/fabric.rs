//! 交换网络拓扑
//!
//! 以数组形式保存交换机与叶子端点，按需解析出单个交换机的 `SwitchNode` 快照。

use super::id::{LeafId, LinkTarget, SwitchId};
use super::node::{HostBinding, LeafEndpoint, LinkDescriptor, SwitchNode, SwitchPeer};
use crate::error::{Result, SwitchError};
use std::net::IpAddr;
use tracing::trace;

#[derive(Debug, Clone, Default)]
struct SwitchEntry {
    uplinks: Vec<SwitchId>,
    downlinks: Vec<LinkTarget>,
    switch_table: Vec<u16>,
    switching_latency: u64,
    link_latency: u64,
    host: HostBinding,
}

/// 交换网络拓扑
#[derive(Debug, Clone, Default)]
pub struct Fabric {
    switches: Vec<SwitchEntry>,
    leaves: usize,
}

impl Fabric {
    /// 添加交换机
    pub fn add_switch(&mut self) -> SwitchId {
        let id = SwitchId(self.switches.len());
        self.switches.push(SwitchEntry::default());
        id
    }

    /// 添加叶子端点
    pub fn add_leaf(&mut self) -> LeafId {
        let id = LeafId(self.leaves);
        self.leaves += 1;
        id
    }

    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    pub fn switch_ids(&self) -> impl Iterator<Item = SwitchId> + '_ {
        (0..self.switches.len()).map(SwitchId)
    }

    /// 将 `child` 追加为 `parent` 的下一条下行链路；若 `child` 是交换机，
    /// 同时把 `parent` 记为它的上行链路。返回该下行链路的下标。
    pub fn connect(&mut self, parent: SwitchId, child: LinkTarget) -> Result<usize> {
        match child {
            LinkTarget::Switch(child_id) => {
                self.entry(child_id)?;
            }
            LinkTarget::Leaf(leaf) if leaf.0 >= self.leaves => {
                return Err(SwitchError::UnknownLeaf(leaf));
            }
            LinkTarget::Leaf(_) => {}
        }

        let entry = self.entry_mut(parent)?;
        entry.downlinks.push(child);
        let downlink_index = entry.downlinks.len() - 1;

        if let LinkTarget::Switch(child_id) = child {
            self.entry_mut(child_id)?.uplinks.push(parent);
        }
        trace!(parent = %parent, child = ?child, downlink_index, "连接链路");
        Ok(downlink_index)
    }

    /// 绑定交换机所在主机的私有地址
    pub fn bind_host(&mut self, switch: SwitchId, private_address: IpAddr) -> Result<()> {
        self.entry_mut(switch)?.host = HostBinding::bound(private_address);
        Ok(())
    }

    pub fn set_switch_table(&mut self, switch: SwitchId, table: Vec<u16>) -> Result<()> {
        self.entry_mut(switch)?.switch_table = table;
        Ok(())
    }

    pub fn set_latencies(
        &mut self,
        switch: SwitchId,
        link_latency: u64,
        switching_latency: u64,
    ) -> Result<()> {
        let entry = self.entry_mut(switch)?;
        entry.link_latency = link_latency;
        entry.switching_latency = switching_latency;
        Ok(())
    }

    pub fn downlinks_of(&self, switch: SwitchId) -> Result<&[LinkTarget]> {
        Ok(&self.entry(switch)?.downlinks)
    }

    pub fn uplinks_of(&self, switch: SwitchId) -> Result<&[SwitchId]> {
        Ok(&self.entry(switch)?.uplinks)
    }

    /// 解析一个交换机节点的快照：对端交换机在此时被展开为 `SwitchPeer`。
    pub fn switch_node(&self, switch: SwitchId) -> Result<SwitchNode> {
        let entry = self.entry(switch)?;
        let uplinks = entry
            .uplinks
            .iter()
            .map(|&peer| self.describe(LinkTarget::Switch(peer)))
            .collect::<Result<Vec<_>>>()?;
        let downlinks = entry
            .downlinks
            .iter()
            .map(|&target| self.describe(target))
            .collect::<Result<Vec<_>>>()?;

        Ok(SwitchNode {
            switch_id: switch,
            uplinks,
            downlinks,
            switch_table: entry.switch_table.clone(),
            switching_latency: entry.switching_latency,
            link_latency: entry.link_latency,
            host: entry.host,
        })
    }

    fn describe(&self, target: LinkTarget) -> Result<LinkDescriptor> {
        match target {
            LinkTarget::Switch(id) => {
                let peer = self.entry(id)?;
                Ok(LinkDescriptor::SwitchPeer(SwitchPeer {
                    switch_id: id,
                    downlinks: peer.downlinks.clone(),
                    host: peer.host,
                }))
            }
            LinkTarget::Leaf(leaf_id) => Ok(LinkDescriptor::LeafEndpoint(LeafEndpoint { leaf_id })),
        }
    }

    fn entry(&self, id: SwitchId) -> Result<&SwitchEntry> {
        self.switches.get(id.0).ok_or(SwitchError::UnknownSwitch(id))
    }

    fn entry_mut(&mut self, id: SwitchId) -> Result<&mut SwitchEntry> {
        self.switches
            .get_mut(id.0)
            .ok_or(SwitchError::UnknownSwitch(id))
    }
}
