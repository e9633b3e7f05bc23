//! 配置生成模块
//!
//! 把交换机节点的拓扑信息转换为交换机模型编译时包含的 `switchconfig.h`。

mod emitter;
mod fragment;
mod port;
mod render;

pub use emitter::{ConfigEmitter, MAX_UPLINKS};
pub use fragment::{CONFIG_HEADER, ConfigFragment};
pub use port::PortInit;
pub use render::render_config;

/// 交换机模型源码目录中生成的配置文件名
pub const CONFIG_FILE_NAME: &str = "switchconfig.h";
