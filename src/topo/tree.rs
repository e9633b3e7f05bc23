//! 两级树拓扑构建（root + ToR）

use super::fabric::Fabric;
use super::id::{LeafId, LinkTarget, SwitchId};
use super::spec::{DEFAULT_LINK_LATENCY, DEFAULT_SWITCHING_LATENCY};
use crate::error::{Result, SwitchError};

#[derive(Debug, Clone)]
pub struct TreeOpts {
    pub tors: usize,
    pub leaves_per_tor: usize,
    pub link_latency: u64,
    pub switching_latency: u64,
}

impl Default for TreeOpts {
    fn default() -> Self {
        Self {
            tors: 2,
            leaves_per_tor: 4,
            link_latency: DEFAULT_LINK_LATENCY,
            switching_latency: DEFAULT_SWITCHING_LATENCY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeTopology {
    pub leaves_per_tor: usize,
    pub root: SwitchId,
    pub tors: Vec<SwitchId>,
    pub leaves: Vec<LeafId>,
}

impl TreeTopology {
    pub fn tor(&self, index: usize) -> SwitchId {
        self.tors[index]
    }

    pub fn leaf(&self, tor: usize, index: usize) -> LeafId {
        self.leaves[tor * self.leaves_per_tor + index]
    }
}

/// 构建两级树：root 的第 i 条下行链路连到第 i 个 ToR，
/// 每个 ToR 依次连接 `leaves_per_tor` 个叶子。
///
/// MAC 槽位即叶子在 `TreeTopology::leaves` 中的下标。ToR 把自己的叶子映射到对应下行端口，其余全部映射到上行端口；
/// root 把每个叶子映射到其所属 ToR 的下行端口。
pub fn build_tree(fabric: &mut Fabric, opts: &TreeOpts) -> Result<TreeTopology> {
    assert!(
        opts.tors >= 1 && opts.leaves_per_tor >= 1,
        "tree needs at least one ToR switch and one leaf per ToR"
    );
    let per = opts.leaves_per_tor;
    let total_leaves = opts.tors * per;

    let root = fabric.add_switch();
    let mut tors = Vec::with_capacity(opts.tors);
    let mut leaves = Vec::with_capacity(total_leaves);

    for _ in 0..opts.tors {
        let tor = fabric.add_switch();
        fabric.connect(root, LinkTarget::Switch(tor))?;
        for _ in 0..per {
            let leaf = fabric.add_leaf();
            fabric.connect(tor, LinkTarget::Leaf(leaf))?;
            leaves.push(leaf);
        }
        tors.push(tor);
    }

    let root_table = (0..total_leaves)
        .map(|slot| table_entry(slot / per))
        .collect::<Result<Vec<_>>>()?;
    fabric.set_switch_table(root, root_table)?;
    fabric.set_latencies(root, opts.link_latency, opts.switching_latency)?;

    for (tor_index, &tor) in tors.iter().enumerate() {
        let table = (0..total_leaves)
            .map(|slot| {
                if slot / per == tor_index {
                    table_entry(slot % per)
                } else {
                    table_entry(per)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        fabric.set_switch_table(tor, table)?;
        fabric.set_latencies(tor, opts.link_latency, opts.switching_latency)?;
    }

    Ok(TreeTopology {
        leaves_per_tor: per,
        root,
        tors,
        leaves,
    })
}

fn table_entry(port: usize) -> Result<u16> {
    u16::try_from(port).map_err(|_| SwitchError::TableEntryOutOfRange(port))
}
