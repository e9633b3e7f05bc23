//! 交换机模型配置生成、构建与启停

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use switchsim_rs::build::{BuildIdentity, SwitchModelConfig};
use switchsim_rs::options::FabricOptions;
use switchsim_rs::shell::LocalShell;
use switchsim_rs::topo::{Fabric, FabricSpec, SwitchId, SwitchNode};
use switchsim_rs::Result;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "switchgen",
    about = "Generate, build and run per-node switch model binaries from fabric.json"
)]
struct Cli {
    /// Path to fabric.json
    #[arg(long, global = true)]
    fabric: Option<PathBuf>,

    /// Options JSON file (base_port, switch_src_dir, log_name, ...)
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// Override base port
    #[arg(long, global = true)]
    base_port: Option<u16>,

    /// Override switch model source directory
    #[arg(long, global = true)]
    switch_src_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Debug, Args)]
struct Target {
    /// Switch id
    #[arg(long)]
    switch: usize,

    /// Reuse the build identity printed by `build`
    #[arg(long)]
    build_id: Option<BuildIdentity>,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Print switchconfig.h for one switch
    Emit(Target),
    /// Print the build sequence, start and stop commands for one switch
    Commands(Target),
    /// Build one switch, or every switch in the fabric
    Build {
        #[arg(long)]
        switch: Option<usize>,
    },
    /// Start a previously built switch in a detached screen session
    Start {
        #[arg(long)]
        switch: usize,
        #[arg(long)]
        build_id: BuildIdentity,
    },
    /// Kill a running switch by name
    Stop {
        #[arg(long)]
        switch: usize,
    },
}

fn load_options(args: &Cli) -> Result<FabricOptions> {
    let mut options = match &args.options {
        Some(path) => FabricOptions::from_path(path)?,
        None => FabricOptions::default(),
    };
    if let Some(port) = args.base_port {
        options.base_port = port;
    }
    if let Some(dir) = &args.switch_src_dir {
        options.switch_src_dir = dir.clone();
    }
    Ok(options)
}

fn load_fabric(args: &Cli) -> Result<Fabric> {
    let default_path = PathBuf::from("fabric.json");
    let path = args.fabric.as_ref().unwrap_or(&default_path);
    FabricSpec::from_path(path)?.build()
}

fn model(
    fabric: &Fabric,
    options: &FabricOptions,
    switch: usize,
    build_id: Option<BuildIdentity>,
) -> Result<SwitchModelConfig<SwitchNode>> {
    let node = fabric.switch_node(SwitchId(switch))?;
    Ok(match build_id {
        Some(id) => SwitchModelConfig::with_identity(node, options.clone(), id),
        None => SwitchModelConfig::new(node, options.clone()),
    })
}

fn run(args: Cli) -> Result<()> {
    let options = load_options(&args)?;
    let fabric = load_fabric(&args)?;

    match args.command {
        Cmd::Emit(target) => {
            let cfg = model(&fabric, &options, target.switch, target.build_id)?;
            print!("{}", cfg.emit_config()?);
        }
        Cmd::Commands(target) => {
            let cfg = model(&fabric, &options, target.switch, target.build_id)?;
            for step in cfg.build_steps()? {
                println!("build: {step}");
            }
            println!("start: {}", cfg.start_command());
            println!("stop: {}", cfg.stop_command());
            println!("binary: {}", cfg.binary_local_path().display());
        }
        Cmd::Build { switch } => {
            let switches: Vec<usize> = match switch {
                Some(id) => vec![id],
                None => fabric.switch_ids().map(|id| id.0).collect(),
            };
            let mut shell = LocalShell::new();
            for id in switches {
                let cfg = model(&fabric, &options, id, None)?;
                let binary = cfg.build(&mut shell)?;
                println!("{} {} {}", cfg.binary_name(), cfg.identity(), binary.display());
            }
        }
        Cmd::Start { switch, build_id } => {
            let cfg = model(&fabric, &options, switch, Some(build_id))?;
            cfg.start(&mut LocalShell::in_dir(cfg.build_dir()))?;
        }
        Cmd::Stop { switch } => {
            let cfg = model(&fabric, &options, switch, None)?;
            cfg.stop(&mut LocalShell::new())?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Cli::parse();
    info!(command = ?args.command, "switchgen");
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
