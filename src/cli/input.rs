// src/cli/input.rs
//! 命令输入：参数 / stdin / 剪贴板

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, IsTerminal, Read};

/// 文本来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Selection,
    Clipboard,
}

impl Source {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Selection => "from selection",
            Self::Clipboard => "from clipboard",
        }
    }
}

/// 命令行参数优先，否则读取管道输入；都没有时返回 None
pub fn text_from_args_or_stdin(text: Option<String>) -> Result<Option<String>> {
    if let Some(text) = text {
        return Ok(non_blank(text));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(non_blank(buffer))
}

pub(crate) fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == text.len() {
        Some(text)
    } else {
        Some(trimmed.to_string())
    }
}
