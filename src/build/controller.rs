//! 交换机模型构建与启停

use super::identity::BuildIdentity;
use crate::config::{CONFIG_FILE_NAME, ConfigEmitter};
use crate::error::Result;
use crate::options::FabricOptions;
use crate::shell::{Shell, quote_path};
use crate::topo::TopologyQuery;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

/// `make` 在构建目录中产出的通用二进制名
const MAKE_OUTPUT: &str = "switch";

/// 构建序列中的一步
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    Run(String),
    WriteFile { path: PathBuf, contents: String },
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStep::Run(command) => f.write_str(command),
            BuildStep::WriteFile { path, contents } => {
                write!(f, "<write {} bytes to {}>", contents.len(), path.display())
            }
        }
    }
}

/// 单个交换机节点的配置对象：生成配置、构建二进制、给出启停命令。
///
/// 每个节点每次构建构造一次；构建标识在构造时生成且不再改变。
pub struct SwitchModelConfig<N> {
    node: N,
    options: FabricOptions,
    identity: BuildIdentity,
}

impl<N: TopologyQuery> SwitchModelConfig<N> {
    pub fn new(node: N, options: FabricOptions) -> Self {
        Self::with_identity(node, options, BuildIdentity::random())
    }

    /// 复用已有的构建标识（例如引用之前的一次构建）
    pub fn with_identity(node: N, options: FabricOptions, identity: BuildIdentity) -> Self {
        Self {
            node,
            options,
            identity,
        }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn options(&self) -> &FabricOptions {
        &self.options
    }

    pub fn identity(&self) -> &BuildIdentity {
        &self.identity
    }

    pub fn emitter(&self) -> ConfigEmitter<'_, N> {
        ConfigEmitter::new(&self.node, self.options.base_port)
    }

    pub fn emit_config(&self) -> Result<String> {
        self.emitter().emit_full_config()
    }

    /// 产物名，同时用作 screen 会话名和 pkill 匹配模式
    pub fn binary_name(&self) -> String {
        format!("switch{}", self.node.switch_id())
    }

    pub fn build_dir(&self) -> PathBuf {
        self.options.switch_src_dir.join(format!(
            "{}-{}-build",
            self.binary_name(),
            self.identity
        ))
    }

    pub fn config_path(&self) -> PathBuf {
        self.build_dir().join(CONFIG_FILE_NAME)
    }

    pub fn binary_local_path(&self) -> PathBuf {
        self.build_dir().join(self.binary_name())
    }

    /// 完整构建序列。配置在这里生成，因此拓扑错误会在任何命令执行前返回。
    pub fn build_steps(&self) -> Result<Vec<BuildStep>> {
        let contents = self.emit_config()?;
        let src = quote_path(&self.options.switch_src_dir);
        let build_dir = self.build_dir();
        let dst = quote_path(&build_dir);

        Ok(vec![
            BuildStep::Run(format!("mkdir -p {dst}")),
            BuildStep::Run(format!("cp {src}/*.h {dst}")),
            BuildStep::Run(format!("cp {src}/*.cc {dst}")),
            BuildStep::Run(format!("cp {src}/Makefile {dst}")),
            BuildStep::WriteFile {
                path: self.config_path(),
                contents,
            },
            BuildStep::Run(format!("cd {dst} && make")),
            BuildStep::Run(format!(
                "mv {} {}",
                quote_path(&build_dir.join(MAKE_OUTPUT)),
                quote_path(&self.binary_local_path())
            )),
        ])
    }

    /// 逐步执行构建序列；任何一步失败立即返回，不做清理。
    #[tracing::instrument(skip(self, shell), fields(binary = %self.binary_name(), build_id = %self.identity))]
    pub fn build(&self, shell: &mut impl Shell) -> Result<PathBuf> {
        let steps = self.build_steps()?;
        info!("构建交换机模型二进制");
        for step in steps {
            match step {
                BuildStep::Run(command) => {
                    shell.run(&command)?;
                }
                BuildStep::WriteFile { path, contents } => {
                    debug!(config = %contents, "switchconfig.h");
                    shell.write_file(&path, &contents)?;
                }
            }
        }
        let binary = self.binary_local_path();
        info!(path = ?binary, "构建完成");
        Ok(binary)
    }

    /// 在名为 `binary_name()` 的后台 screen 会话中启动二进制，
    /// 参数依次为链路延迟与交换延迟；需在二进制所在目录执行。
    pub fn start_command(&self) -> String {
        let name = self.binary_name();
        format!(
            "screen -S {name} -d -m bash -c \"script -f -c './{name} {} {}' {}\"; sleep {}",
            self.node.link_latency(),
            self.node.switching_latency(),
            self.options.log_name,
            self.options.settle_secs
        )
    }

    /// 按进程名终止交换机。
    ///
    /// `pkill` 的模式未锚定，按子串匹配：`switch1` 也会命中 `switch10`..`switch19`
    /// 以及名字包含它的无关进程。
    pub fn stop_command(&self) -> String {
        let sudo = if self.options.kill_with_sudo { "sudo " } else { "" };
        format!("{sudo}pkill {}", self.binary_name())
    }

    #[tracing::instrument(skip(self, shell), fields(binary = %self.binary_name()))]
    pub fn start(&self, shell: &mut impl Shell) -> Result<()> {
        info!("启动交换机");
        shell.run(&self.start_command())?;
        Ok(())
    }

    #[tracing::instrument(skip(self, shell), fields(binary = %self.binary_name()))]
    pub fn stop(&self, shell: &mut impl Shell) -> Result<()> {
        info!("停止交换机");
        shell.run(&self.stop_command())?;
        Ok(())
    }
}
