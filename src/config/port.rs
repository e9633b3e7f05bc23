//! 端口初始化语句

use std::fmt;
use std::net::IpAddr;

/// 一个端口在交换机二进制中的实现方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortInit {
    /// 主动连接上行对端的 socket 端口
    ClientSocket {
        port_index: usize,
        remote_address: IpAddr,
        remote_port: u16,
    },
    /// 等待下行交换机连接的 socket 端口
    ServerSocket { port_index: usize, local_port: u16 },
    /// 连接叶子端点的本地共享内存通道
    LocalChannel { port_index: usize },
}

impl PortInit {
    pub fn port_index(&self) -> usize {
        match *self {
            PortInit::ClientSocket { port_index, .. }
            | PortInit::ServerSocket { port_index, .. }
            | PortInit::LocalChannel { port_index } => port_index,
        }
    }
}

impl fmt::Display for PortInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortInit::ClientSocket {
                port_index,
                remote_address,
                remote_port,
            } => write!(
                f,
                "new SocketClientPort({port_index}, \"{remote_address}\", {remote_port});"
            ),
            PortInit::ServerSocket {
                port_index,
                local_port,
            } => write!(f, "new SocketServerPort({port_index}, {local_port});"),
            PortInit::LocalChannel { port_index } => write!(f, "new ShmemPort({port_index});"),
        }
    }
}
