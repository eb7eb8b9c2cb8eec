// src/cli/paste.rs
//! Paste / Select 命令 - 交互式动作菜单
//!
//! paste 只读剪贴板；select 优先使用参数或管道传入的选中文本，
//! 并把它写回剪贴板，没有选中内容时退回剪贴板。

use super::input::{text_from_args_or_stdin, Source};
use super::output::{detection_header, format_action, format_outcome};
use crate::actions::{build_actions, Action, ActionRunner, Outcome, RunOptions};
use crate::config::Preferences;
use crate::detection::ContentClassifier;
use crate::host::{Host, SystemHost};
use crate::llm::LlmClient;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use dialoguer::{Confirm, Input, Select};
use tracing::{debug, warn};

/// Select 命令参数
#[derive(Args)]
pub struct SelectArgs {
    /// 选中的文本（省略时读取 stdin，再退回剪贴板）
    pub text: Option<String>,
}

/// 处理 paste 命令
pub fn handle_paste(prefs: Preferences) -> Result<()> {
    let host = SystemHost::new();
    let text = host
        .read_text()
        .ok_or_else(|| anyhow!("Clipboard is empty"))?;
    run_menu(host, text, Source::Clipboard, prefs)
}

/// 处理 select 命令
pub fn handle_select(args: SelectArgs, prefs: Preferences) -> Result<()> {
    let host = SystemHost::new();

    let (text, source) = match text_from_args_or_stdin(args.text)? {
        Some(selected) => {
            if let Err(e) = host.write_text(&selected) {
                warn!("Could not copy selection to clipboard: {}", e);
            }
            (selected, Source::Selection)
        }
        None => {
            let text = host
                .read_text()
                .ok_or_else(|| anyhow!("Select text or copy something first"))?;
            (text, Source::Clipboard)
        }
    };

    run_menu(host, text, source, prefs)
}

fn run_menu(host: SystemHost, text: String, source: Source, prefs: Preferences) -> Result<()> {
    let detection = ContentClassifier::new().classify(&text);
    let llm = LlmClient::from_preferences(&prefs)?;
    let status = llm.check();
    let items = build_actions(&text, &detection, &status, &prefs);
    debug!(count = items.len(), source = ?source, "Built action menu");

    println!("{} {}", detection_header(&detection), source.describe());
    if !status.running {
        println!(
            "⚠️  Local LLM not available: {}",
            status.error.as_deref().unwrap_or("Configure your LLM server URL")
        );
    }

    let labels: Vec<String> = items.iter().map(format_action).collect();
    let selection = Select::new()
        .with_prompt("Choose an action")
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("Failed to read selection")?;

    let Some(index) = selection else {
        println!("Cancelled.");
        return Ok(());
    };
    let item = &items[index];

    let mut options = RunOptions::default();
    match item.action {
        Action::TranslateOther => {
            let language: String = Input::new()
                .with_prompt("Target language")
                .interact_text()
                .context("Failed to read target language")?;
            options.language = Some(language);
        }
        Action::Custom => {
            let instruction: String = Input::new()
                .with_prompt("Custom instruction")
                .default(prefs.custom_action().unwrap_or_default().to_string())
                .interact_text()
                .context("Failed to read custom instruction")?;
            options.instruction = Some(instruction);
        }
        _ => {}
    }

    let runner = ActionRunner::new(host, llm, prefs);
    let outcome = runner.run(item, &text, &detection, &options)?;
    println!("{}", format_outcome(&outcome));

    if let Outcome::Generated { text: generated, .. } = &outcome {
        let copy = Confirm::new()
            .with_prompt("Copy result to clipboard?")
            .default(true)
            .interact()
            .context("Failed to read confirmation")?;
        if copy {
            runner.host().write_text(generated)?;
            println!("Copied to clipboard");
        }
    }

    Ok(())
}
