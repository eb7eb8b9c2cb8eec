// src/cli/list.rs
//! Actions 命令 - 分类并列出可用动作

use super::input::text_from_args_or_stdin;
use super::output::{detection_header, format_action, format_output};
use crate::actions::{build_actions, ActionItem};
use crate::config::Preferences;
use crate::detection::{ContentClassifier, ContentResult};
use crate::llm::{LlmClient, LlmStatus};
use anyhow::{anyhow, Result};
use clap::Args;
use serde::Serialize;

/// Actions 命令参数
#[derive(Args)]
pub struct ActionsArgs {
    /// 要分类的文本（省略时读取 stdin）
    pub text: Option<String>,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// Actions 命令输出
#[derive(Serialize)]
pub struct ActionsOutput {
    pub detection: ContentResult,
    pub llm: LlmStatus,
    pub actions: Vec<ActionItem>,
}

/// 处理 actions 命令
pub fn handle_actions(args: ActionsArgs, prefs: &Preferences) -> Result<()> {
    let text = text_from_args_or_stdin(args.text)?
        .ok_or_else(|| anyhow!("No text given. Pass it as an argument or pipe it in"))?;

    let detection = ContentClassifier::new().classify(&text);
    let llm = LlmClient::from_preferences(prefs)?.check();
    let actions = build_actions(&text, &detection, &llm, prefs);

    let output = ActionsOutput {
        detection,
        llm,
        actions,
    };
    println!("{}", format_output(&output, args.json, render));
    Ok(())
}

fn render(output: &ActionsOutput) -> String {
    let mut lines = vec![detection_header(&output.detection)];
    lines.extend(output.actions.iter().map(format_action));
    if !output.llm.running {
        lines.push(String::new());
        lines.push(format!(
            "⚠️  Local LLM not available: {}",
            output
                .llm
                .error
                .as_deref()
                .unwrap_or("Configure your LLM server URL")
        ));
    }
    lines.join("\n")
}
