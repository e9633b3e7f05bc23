//! 拓扑模块
//!
//! 交换机节点、链路描述以及拓扑构建。配置生成只通过 `TopologyQuery` 读取节点。

mod fabric;
mod id;
mod node;
mod spec;
pub mod tree;

pub use fabric::Fabric;
pub use id::{LeafId, LinkTarget, SwitchId};
pub use node::{HostBinding, LeafEndpoint, LinkDescriptor, SwitchNode, SwitchPeer, TopologyQuery};
pub use spec::{DEFAULT_LINK_LATENCY, DEFAULT_SWITCHING_LATENCY, FabricSpec, SwitchSpec};
