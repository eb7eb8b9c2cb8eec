// src/cli/run.rs
//! Run 命令 - 非交互地执行一个动作

use super::input::text_from_args_or_stdin;
use super::output::format_outcome;
use crate::actions::{build_actions, custom_item, ActionItem, ActionRunner, RunOptions};
use crate::config::Preferences;
use crate::detection::{ContentClassifier, ContentResult};
use crate::host::SystemHost;
use crate::llm::{LlmClient, LlmStatus};
use anyhow::{anyhow, Result};
use clap::Args;

/// Run 命令参数
#[derive(Args)]
pub struct RunArgs {
    /// 动作 id，如 define、translate-english、search-web
    pub action_id: String,

    /// 要处理的文本（省略时读取 stdin）
    pub text: Option<String>,

    /// translate-other 的目标语言
    #[arg(long, short)]
    pub language: Option<String>,

    /// custom 动作的指令（覆盖配置）
    #[arg(long, short)]
    pub instruction: Option<String>,
}

/// 处理 run 命令
pub fn handle_run(args: RunArgs, prefs: Preferences) -> Result<()> {
    let text = text_from_args_or_stdin(args.text)?
        .ok_or_else(|| anyhow!("No text given. Pass it as an argument or pipe it in"))?;

    let detection = ContentClassifier::new().classify(&text);
    let item = resolve_action(&args.action_id, &text, &detection, &prefs)?;

    let options = RunOptions {
        language: args.language,
        instruction: args.instruction,
    };
    let llm = LlmClient::from_preferences(&prefs)?;
    let runner = ActionRunner::new(SystemHost::new(), llm, prefs);

    let outcome = runner.run(&item, &text, &detection, &options)?;
    println!("{}", format_outcome(&outcome));
    Ok(())
}

/// 按 id 查找动作；LLM 动作不做健康检查，失败时由请求本身报错
fn resolve_action(
    id: &str,
    text: &str,
    detection: &ContentResult,
    prefs: &Preferences,
) -> Result<ActionItem> {
    let items = build_actions(text, detection, &LlmStatus::running(), prefs);
    if let Some(item) = items.iter().find(|item| item.id == id) {
        return Ok(item.clone());
    }
    if id == "custom" {
        return Ok(custom_item(prefs.custom_action().unwrap_or_default()));
    }

    let available: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    Err(anyhow!(
        "Action '{}' is not available for {} content. Available: {}",
        id,
        detection.content_type(),
        available.join(", ")
    ))
}
