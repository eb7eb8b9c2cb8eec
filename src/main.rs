//! Cai CLI
//!
//! 识别剪贴板 / 选中文本的类型（单词、文本、会议、地址、链接、JSON），
//! 并执行对应动作（释义、翻译、摘要、日历、地图、搜索等）。

use anyhow::Result;
use cai::cli::{
    ActionsArgs, DetectArgs, RunArgs, SelectArgs, SetupArgs, handle_actions, handle_detect,
    handle_paste, handle_run, handle_select, handle_setup,
};
use cai::config::{config_path, Preferences};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cai")]
#[command(about = "Cai - clipboard action intelligence")]
#[command(version)]
struct Cli {
    /// 配置文件路径（默认 ~/.config/cai/config.json）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 识别文本的内容类型
    Detect(DetectArgs),
    /// 列出文本可用的动作
    Actions(ActionsArgs),
    /// 对文本执行一个动作
    Run(RunArgs),
    /// 对剪贴板内容打开动作菜单
    Paste,
    /// 对选中文本打开动作菜单（无选中时使用剪贴板）
    Select(SelectArgs),
    /// 交互式配置向导
    Setup(SetupArgs),
}

fn main() -> Result<()> {
    // 通过 RUST_LOG 控制日志级别，例如: RUST_LOG=cai=debug cai detect "tomorrow at 3pm"
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cai=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(config_path);
    debug!(config = %path.display(), "Using config file");
    let load_prefs = || Preferences::load_with(Some(path.as_path()));

    match cli.command {
        Commands::Detect(args) => handle_detect(args)?,
        Commands::Actions(args) => handle_actions(args, &load_prefs()?)?,
        Commands::Run(args) => handle_run(args, load_prefs()?)?,
        Commands::Paste => handle_paste(load_prefs()?)?,
        Commands::Select(args) => handle_select(args, load_prefs()?)?,
        Commands::Setup(args) => handle_setup(args, &path)?,
    }

    Ok(())
}
