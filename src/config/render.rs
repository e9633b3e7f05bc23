//! 配置文本格式化
//!
//! `switchconfig.h` 的全部文本布局都集中在这里。

use super::fragment::{CONFIG_HEADER, ConfigFragment};
use std::fmt::{self, Write};

impl fmt::Display for ConfigFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFragment::Header => writeln!(f, "{CONFIG_HEADER}"),
            ConfigFragment::PortCount(total) => {
                writeln!(f, "#ifdef NUMCLIENTSCONFIG")?;
                writeln!(f, "#define NUMPORTS {total}")?;
                writeln!(f, "#endif")
            }
            ConfigFragment::PortSetup(inits) => {
                writeln!(f, "#ifdef PORTSETUPCONFIG")?;
                for init in inits {
                    writeln!(f, "ports[{}] = {init}", init.port_index())?;
                }
                writeln!(f, "#endif")
            }
            ConfigFragment::MacTable(table) => {
                writeln!(f, "#ifdef MACPORTSCONFIG")?;
                let values = table
                    .iter()
                    .map(u16::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "uint16_t mac2port[{}] {{{values}}};", table.len())?;
                writeln!(f, "#endif")
            }
        }
    }
}

/// 按给定顺序拼接各片段
pub fn render_config(fragments: &[ConfigFragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        // 写入 String 不会失败
        let _ = write!(out, "{fragment}");
    }
    out
}
