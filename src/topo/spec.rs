//! 拓扑描述文件（fabric.json）

use super::fabric::Fabric;
use super::id::{LinkTarget, SwitchId};
use crate::error::{Result, SwitchError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::IpAddr;
use std::path::Path;

pub const DEFAULT_LINK_LATENCY: u64 = 6405;
pub const DEFAULT_SWITCHING_LATENCY: u64 = 10;

fn default_link_latency() -> u64 {
    DEFAULT_LINK_LATENCY
}

fn default_switching_latency() -> u64 {
    DEFAULT_SWITCHING_LATENCY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricSpec {
    /// 叶子端点数量；缺省时取被引用的最大叶子编号 + 1
    #[serde(default)]
    pub leaves: Option<usize>,
    pub switches: Vec<SwitchSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchSpec {
    pub id: SwitchId,
    #[serde(default)]
    pub host: Option<IpAddr>,
    #[serde(default = "default_link_latency")]
    pub link_latency: u64,
    #[serde(default = "default_switching_latency")]
    pub switching_latency: u64,
    #[serde(default)]
    pub downlinks: Vec<LinkTarget>,
    pub switch_table: Vec<u16>,
}

impl FabricSpec {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SwitchError::Filesystem {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SwitchError::FabricFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 构建拓扑。交换机编号必须恰好是 `0..switches.len()`（顺序不限）。
    pub fn build(&self) -> Result<Fabric> {
        let count = self.switches.len();
        let mut ordered: Vec<Option<&SwitchSpec>> = vec![None; count];
        for sw in &self.switches {
            let slot = ordered
                .get_mut(sw.id.0)
                .ok_or(SwitchError::UnknownSwitch(sw.id))?;
            if slot.is_some() {
                return Err(SwitchError::DuplicateSwitch(sw.id));
            }
            *slot = Some(sw);
        }

        let referenced_leaves = self
            .switches
            .iter()
            .flat_map(|sw| sw.downlinks.iter())
            .filter_map(|target| match target {
                LinkTarget::Leaf(leaf) => Some(leaf.0 + 1),
                LinkTarget::Switch(_) => None,
            })
            .max()
            .unwrap_or(0);
        let leaves = self.leaves.unwrap_or(referenced_leaves);

        let mut fabric = Fabric::default();
        for _ in 0..count {
            fabric.add_switch();
        }
        for _ in 0..leaves {
            fabric.add_leaf();
        }

        for sw in ordered.into_iter().flatten() {
            fabric.set_latencies(sw.id, sw.link_latency, sw.switching_latency)?;
            fabric.set_switch_table(sw.id, sw.switch_table.clone())?;
            if let Some(addr) = sw.host {
                fabric.bind_host(sw.id, addr)?;
            }
            for &target in &sw.downlinks {
                fabric.connect(sw.id, target)?;
            }
        }
        Ok(fabric)
    }
}
