//! CLI 输出格式

use crate::actions::{ActionItem, Outcome};
use crate::detection::ContentResult;
use serde::Serialize;

/// `--json` 时输出 JSON，否则输出人类可读文本
pub fn format_output<T: Serialize>(data: &T, json: bool, human: impl FnOnce(&T) -> String) -> String {
    if json {
        serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
    } else {
        human(data)
    }
}

/// 标题行，如 `📅 Meeting detected`
pub fn detection_header(result: &ContentResult) -> String {
    let content_type = result.content_type();
    format!("{} {} detected", content_type.icon(), content_type.label())
}

/// 分类结果的多行描述
pub fn describe_result(result: &ContentResult) -> String {
    let mut lines = vec![format!(
        "{} (confidence {:.2})",
        detection_header(result),
        result.confidence
    )];

    let entities = result.entities();
    if let Some(date_text) = entities.date_text {
        lines.push(format!("  date:     {}", date_text));
    }
    if let Some(date) = entities.date {
        lines.push(format!("  start:    {}", date.format("%a %Y-%m-%d %H:%M")));
    }
    if let Some(location) = entities.location {
        lines.push(format!("  location: {}", location));
    }
    if let Some(address) = entities.address {
        lines.push(format!("  address:  {}", address));
    }
    if let Some(url) = entities.url {
        lines.push(format!("  url:      {}", url));
    }

    lines.join("\n")
}

/// 单个菜单项，如 `[1] 📖 Define Word  Get definition of "x"`
pub fn format_action(item: &ActionItem) -> String {
    match &item.subtitle {
        Some(subtitle) => format!("[{}] {} {}  {}", item.shortcut, item.icon, item.title, subtitle),
        None => format!("[{}] {} {}", item.shortcut, item.icon, item.title),
    }
}

pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Generated { title, text } => format!("{}\n\n{}", title, text),
        Outcome::Opened(url) => format!("Opened {}", url),
        Outcome::Copied(_) => "Copied to clipboard".to_string(),
    }
}
