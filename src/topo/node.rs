//! 交换机节点视图
//!
//! 配置生成器只依赖 `TopologyQuery` 这一窄接口，而不依赖完整的拓扑类型。

use super::id::{LeafId, LinkTarget, SwitchId};
use std::net::IpAddr;

/// 节点所在主机的绑定状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostBinding {
    #[default]
    Unbound,
    Bound { private_address: IpAddr },
}

impl HostBinding {
    pub fn bound(private_address: IpAddr) -> Self {
        HostBinding::Bound { private_address }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, HostBinding::Bound { .. })
    }

    pub fn private_address(&self) -> Option<IpAddr> {
        match self {
            HostBinding::Bound { private_address } => Some(*private_address),
            HostBinding::Unbound => None,
        }
    }
}

/// 对端交换机的快照（拓扑构建时解析）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchPeer {
    pub switch_id: SwitchId,
    /// 对端自己的下行链路，按声明顺序
    pub downlinks: Vec<LinkTarget>,
    pub host: HostBinding,
}

/// 叶子端点（通过本地共享内存通道连接）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafEndpoint {
    pub leaf_id: LeafId,
}

/// 链路描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDescriptor {
    SwitchPeer(SwitchPeer),
    LeafEndpoint(LeafEndpoint),
}

impl LinkDescriptor {
    pub fn target(&self) -> LinkTarget {
        match self {
            LinkDescriptor::SwitchPeer(peer) => LinkTarget::Switch(peer.switch_id),
            LinkDescriptor::LeafEndpoint(leaf) => LinkTarget::Leaf(leaf.leaf_id),
        }
    }
}

/// 配置生成所需的只读拓扑查询接口
pub trait TopologyQuery {
    fn switch_id(&self) -> SwitchId;

    /// 上行链路（至多一条受支持）
    fn uplinks(&self) -> &[LinkDescriptor];

    /// 下行链路，按声明顺序；下标即端口号
    fn downlinks(&self) -> &[LinkDescriptor];

    /// MAC 槽位 -> 端口号
    fn switch_table(&self) -> &[u16];

    fn switching_latency(&self) -> u64;

    fn link_latency(&self) -> u64;

    fn host_binding(&self) -> HostBinding;
}

/// 一个交换机节点的完整快照
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchNode {
    pub switch_id: SwitchId,
    pub uplinks: Vec<LinkDescriptor>,
    pub downlinks: Vec<LinkDescriptor>,
    pub switch_table: Vec<u16>,
    pub switching_latency: u64,
    pub link_latency: u64,
    pub host: HostBinding,
}

impl SwitchNode {
    /// 创建一个没有链路、未绑定主机的节点
    pub fn new(switch_id: SwitchId) -> Self {
        Self {
            switch_id,
            uplinks: Vec::new(),
            downlinks: Vec::new(),
            switch_table: Vec::new(),
            switching_latency: 0,
            link_latency: 0,
            host: HostBinding::Unbound,
        }
    }
}

impl TopologyQuery for SwitchNode {
    fn switch_id(&self) -> SwitchId {
        self.switch_id
    }

    fn uplinks(&self) -> &[LinkDescriptor] {
        &self.uplinks
    }

    fn downlinks(&self) -> &[LinkDescriptor] {
        &self.downlinks
    }

    fn switch_table(&self) -> &[u16] {
        &self.switch_table
    }

    fn switching_latency(&self) -> u64 {
        self.switching_latency
    }

    fn link_latency(&self) -> u64 {
        self.link_latency
    }

    fn host_binding(&self) -> HostBinding {
        self.host
    }
}
