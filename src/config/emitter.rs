//! 交换机配置生成
//!
//! 纯函数：不做任何 I/O，相同的节点状态总是得到逐字节相同的输出。

use super::fragment::ConfigFragment;
use super::port::PortInit;
use super::render::render_config;
use crate::error::{Result, SwitchError};
use crate::topo::{LinkDescriptor, LinkTarget, TopologyQuery};

/// 目前只支持一条上行链路
pub const MAX_UPLINKS: usize = 1;

/// 从一个交换机节点推导 `switchconfig.h`
pub struct ConfigEmitter<'a, N: TopologyQuery + ?Sized> {
    node: &'a N,
    base_port: u16,
}

impl<'a, N: TopologyQuery + ?Sized> ConfigEmitter<'a, N> {
    pub fn new(node: &'a N, base_port: u16) -> Self {
        Self { node, base_port }
    }

    pub fn base_port(&self) -> u16 {
        self.base_port
    }

    /// `base_port + index`，超出 `u16` 时返回 `PortOutOfRange`
    fn offset_port(&self, index: usize) -> Result<u16> {
        let port = usize::from(self.base_port) + index;
        u16::try_from(port).map_err(|_| SwitchError::PortOutOfRange {
            switch_id: self.node.switch_id(),
            port,
        })
    }

    /// 上行端口：作为客户端连接对端交换机上为本节点预留的 server 端口。
    ///
    /// 端口号为 `len(downlinks) + uplink_index`，远端端口为
    /// `base_port + 本节点在对端下行链路中的位置`。
    pub fn emit_uplink_init(&self, uplink_index: usize) -> Result<PortInit> {
        let switch_id = self.node.switch_id();
        if uplink_index >= MAX_UPLINKS {
            return Err(SwitchError::UnsupportedTopology {
                switch_id,
                uplink_index,
            });
        }
        let uplink = self
            .node
            .uplinks()
            .get(uplink_index)
            .ok_or(SwitchError::MissingUplink {
                switch_id,
                uplink_index,
            })?;

        let peer = match uplink {
            LinkDescriptor::SwitchPeer(peer) => peer,
            LinkDescriptor::LeafEndpoint(_) => {
                return Err(SwitchError::Resolution {
                    switch_id,
                    peer: uplink.target(),
                });
            }
        };
        let me = LinkTarget::Switch(switch_id);
        let downlink_index = peer
            .downlinks
            .iter()
            .position(|target| *target == me)
            .ok_or(SwitchError::Resolution {
                switch_id,
                peer: uplink.target(),
            })?;

        if !self.node.host_binding().is_bound() {
            return Err(SwitchError::UnboundHost { switch_id });
        }
        let remote_address = peer
            .host
            .private_address()
            .ok_or(SwitchError::UnboundHost {
                switch_id: peer.switch_id,
            })?;

        Ok(PortInit::ClientSocket {
            port_index: self.node.downlinks().len() + uplink_index,
            remote_address,
            remote_port: self.offset_port(downlink_index)?,
        })
    }

    /// 下行端口：对端是交换机时监听 `base_port + downlink_index`，否则使用本地通道。
    ///
    /// # Panics
    ///
    /// `downlink_index` 超出下行链路范围时 panic。
    pub fn emit_downlink_init(&self, downlink_index: usize) -> Result<PortInit> {
        match &self.node.downlinks()[downlink_index] {
            LinkDescriptor::SwitchPeer(_) => Ok(PortInit::ServerSocket {
                port_index: downlink_index,
                local_port: self.offset_port(downlink_index)?,
            }),
            LinkDescriptor::LeafEndpoint(_) => Ok(PortInit::LocalChannel {
                port_index: downlink_index,
            }),
        }
    }

    /// 调用方需保证 `switch_table` 非空。
    pub fn emit_mac_table(&self) -> ConfigFragment {
        ConfigFragment::MacTable(self.node.switch_table().to_vec())
    }

    pub fn emit_port_count(&self) -> ConfigFragment {
        ConfigFragment::PortCount(self.node.downlinks().len() + self.node.uplinks().len())
    }

    /// 全部端口，下标即端口号：先是按声明顺序的下行链路，最后是上行链路。
    pub fn port_assignment(&self) -> Result<Vec<PortInit>> {
        let downlinks = self.node.downlinks().len();
        let uplinks = self.node.uplinks().len();
        let mut ports = Vec::with_capacity(downlinks + uplinks);
        for downlink_index in 0..downlinks {
            ports.push(self.emit_downlink_init(downlink_index)?);
        }
        for uplink_index in 0..uplinks {
            ports.push(self.emit_uplink_init(uplink_index)?);
        }
        Ok(ports)
    }

    pub fn emit_port_setup(&self) -> Result<ConfigFragment> {
        Ok(ConfigFragment::PortSetup(self.port_assignment()?))
    }

    pub fn fragments(&self) -> Result<Vec<ConfigFragment>> {
        Ok(vec![
            ConfigFragment::Header,
            self.emit_port_count(),
            self.emit_port_setup()?,
            self.emit_mac_table(),
        ])
    }

    pub fn emit_full_config(&self) -> Result<String> {
        Ok(render_config(&self.fragments()?))
    }
}
