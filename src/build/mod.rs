//! 构建与运行模块
//!
//! 把生成的配置放进独立的构建目录、编译出按交换机命名的二进制，并给出启停命令。

mod controller;
mod identity;

pub use controller::{BuildStep, SwitchModelConfig};
pub use identity::{BUILD_IDENTITY_LEN, BuildIdentity};
