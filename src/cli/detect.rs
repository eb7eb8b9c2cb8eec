// src/cli/detect.rs
//! Detect 命令 - 只做内容分类

use super::input::text_from_args_or_stdin;
use super::output::{describe_result, format_output};
use crate::detection::ContentClassifier;
use anyhow::{anyhow, Result};
use clap::Args;

/// Detect 命令参数
#[derive(Args)]
pub struct DetectArgs {
    /// 要分类的文本（省略时读取 stdin）
    pub text: Option<String>,

    /// 输出 JSON 格式
    #[arg(long)]
    pub json: bool,
}

/// 处理 detect 命令
pub fn handle_detect(args: DetectArgs) -> Result<()> {
    let text = text_from_args_or_stdin(args.text)?
        .ok_or_else(|| anyhow!("No text given. Pass it as an argument or pipe it in"))?;

    let result = ContentClassifier::new().classify(&text);
    println!("{}", format_output(&result, args.json, describe_result));
    Ok(())
}
