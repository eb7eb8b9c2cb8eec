// src/cli/setup.rs
//! Setup 命令 - 交互式配置向导
//!
//! 选择本地 LLM、翻译语言、搜索引擎、地图应用和自定义动作，
//! 写入 `~/.config/cai/config.json`。

use crate::config::{LlmProvider, MapsProvider, Preferences, SearchEngine};
use crate::llm::LlmClient;
use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Confirm, Input, Select};
use std::path::Path;

/// Setup 命令参数
#[derive(Args)]
pub struct SetupArgs {
    /// 使用默认值（保留已有配置），跳过交互式提示
    #[arg(long)]
    pub auto: bool,
}

/// 处理 setup 命令
pub fn handle_setup(args: SetupArgs, path: &Path) -> Result<()> {
    println!("Cai Setup\n");

    let existing = path.exists();
    // 无法解析的配置直接报错，不覆盖用户文件
    let base = Preferences::load_from(path)?;

    if existing {
        println!("Found existing config: {}", path.display());
        if !args.auto {
            let overwrite = Confirm::new()
                .with_prompt("Update it? (unchanged fields are kept)")
                .default(true)
                .interact()
                .context("Failed to read confirmation")?;
            if !overwrite {
                println!("Cancelled.");
                return Ok(());
            }
        }
        println!();
    }

    let prefs = if args.auto { base } else { prompt_preferences(base)? };

    prefs.save_to(path)?;
    println!("Saved {}", path.display());

    let status = LlmClient::from_preferences(&prefs)?.check();
    if status.running {
        println!("✅ LLM reachable at {}", prefs.llm_base_url());
    } else {
        println!(
            "⚠️  {}. AI actions stay hidden until the server is running.",
            status.error.as_deref().unwrap_or("LLM not reachable")
        );
    }

    Ok(())
}

fn prompt_preferences(mut prefs: Preferences) -> Result<Preferences> {
    // Step 1: LLM
    let providers: Vec<String> = LlmProvider::ALL
        .iter()
        .map(|p| match p.default_base_url() {
            Some(url) => format!("{} ({})", p, url),
            None => format!("{} (enter URL)", p),
        })
        .collect();
    let current = LlmProvider::ALL
        .iter()
        .position(|p| *p == prefs.llm_provider)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Local LLM server")
        .items(&providers)
        .default(current)
        .interact()
        .context("Failed to read LLM provider")?;
    prefs.llm_provider = LlmProvider::ALL[choice];

    if prefs.llm_provider == LlmProvider::Custom {
        prefs.llm_custom_url = Input::new()
            .with_prompt("LLM base URL")
            .default(prefs.llm_custom_url.clone())
            .interact_text()
            .context("Failed to read LLM URL")?;
    }

    prefs.llm_model = Input::new()
        .with_prompt("Model")
        .default(prefs.llm_model.clone())
        .interact_text()
        .context("Failed to read model")?;

    // Step 2: 翻译语言
    prefs.translation_language_1 = Input::new()
        .with_prompt("Primary translation language")
        .default(prefs.translation_language_1.clone())
        .interact_text()
        .context("Failed to read translation language")?;
    prefs.translation_language_2 = Input::new()
        .with_prompt("Secondary translation language")
        .default(prefs.translation_language_2.clone())
        .interact_text()
        .context("Failed to read translation language")?;

    // Step 3: 搜索与地图
    let engines: Vec<String> = SearchEngine::ALL.iter().map(|e| e.to_string()).collect();
    let current = SearchEngine::ALL
        .iter()
        .position(|e| *e == prefs.search_engine)
        .unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Search engine")
        .items(&engines)
        .default(current)
        .interact()
        .context("Failed to read search engine")?;
    prefs.search_engine = SearchEngine::ALL[choice];

    let maps = [MapsProvider::Apple, MapsProvider::Google];
    let labels: Vec<String> = maps.iter().map(|m| m.to_string()).collect();
    let current = maps.iter().position(|m| *m == prefs.maps).unwrap_or(0);
    let choice = Select::new()
        .with_prompt("Maps")
        .items(&labels)
        .default(current)
        .interact()
        .context("Failed to read maps provider")?;
    prefs.maps = maps[choice];

    // Step 4: 自定义动作
    prefs.custom_action_prompt = Input::new()
        .with_prompt("Custom action instruction (empty to disable)")
        .default(prefs.custom_action_prompt.clone())
        .allow_empty(true)
        .interact_text()
        .context("Failed to read custom action")?;

    Ok(prefs)
}
