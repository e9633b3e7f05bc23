//! 配置片段（结构化中间表示）

use super::port::PortInit;

pub const CONFIG_HEADER: &str = "// THIS FILE IS MACHINE GENERATED. DO NOT EDIT.";

/// `switchconfig.h` 的一个片段；除 `Header` 外每个片段都包在自己的宏守卫里
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFragment {
    Header,
    /// `NUMCLIENTSCONFIG`
    PortCount(usize),
    /// `PORTSETUPCONFIG`，按端口号升序
    PortSetup(Vec<PortInit>),
    /// `MACPORTSCONFIG`
    MacTable(Vec<u16>),
}
