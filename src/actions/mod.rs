//! 动作菜单 - 根据内容类型生成可执行的动作列表
//!
//! LLM 相关动作（define / explain / summarize / translate / custom）
//! 只在本地 LLM 可用时出现；快捷键按列表顺序从 1 开始编号。

pub mod calendar;
pub mod maps;
pub mod runner;
pub mod search;

pub use runner::{ActionRunner, Outcome, RunOptions};

use crate::config::Preferences;
use crate::detection::{ContentResult, ContentType};
use crate::llm::LlmStatus;
use serde::Serialize;

/// 自定义动作副标题的最大字符数
const CUSTOM_SUBTITLE_CHARS: usize = 60;

/// 标题中引用原文的最大字符数
const QUOTE_CHARS: usize = 50;

/// 动作的具体行为
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Define,
    Explain,
    Summarize,
    Translate { language: String },
    /// 执行时再给出目标语言
    TranslateOther,
    /// 执行时使用配置的指令，或调用方给出的指令
    Custom,
    SearchWeb,
    SearchWikipedia,
    Calendar,
    Maps { query: String },
    Open,
    Copy,
    CopyMarkdown,
    PrettyPrint,
}

impl Action {
    /// 是否需要 LLM
    pub fn requires_llm(&self) -> bool {
        matches!(
            self,
            Self::Define
                | Self::Explain
                | Self::Summarize
                | Self::Translate { .. }
                | Self::TranslateOther
                | Self::Custom
        )
    }
}

/// 菜单中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub icon: &'static str,
    pub shortcut: u8,
    pub action: Action,
}

impl ActionItem {
    fn new(id: impl Into<String>, title: impl Into<String>, icon: &'static str, action: Action) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            icon,
            shortcut: 0,
            action,
        }
    }

    fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// 生成动作菜单
pub fn build_actions(
    text: &str,
    result: &ContentResult,
    llm: &LlmStatus,
    prefs: &Preferences,
) -> Vec<ActionItem> {
    let mut items = Vec::new();

    if llm.running {
        if let Some(prompt) = prefs.custom_action() {
            items.push(custom_item(prompt));
        }
    }

    match result.content_type() {
        ContentType::Word => {
            if llm.running {
                items.push(
                    ActionItem::new("define", "Define Word", "📖", Action::Define)
                        .with_subtitle(format!("Get definition of \"{}\"", text)),
                );
                items.push(
                    ActionItem::new("explain", "Explain", "💡", Action::Explain)
                        .with_subtitle(format!("Get detailed explanation of \"{}\"", text)),
                );
                push_translations(&mut items, prefs);
            }
            items.push(search_web_item());
        }
        ContentType::ShortText => {
            if llm.running {
                items.push(
                    ActionItem::new("explain", "Explain", "💡", Action::Explain)
                        .with_subtitle("Get detailed explanation"),
                );
                push_translations(&mut items, prefs);
            }
            items.push(search_web_item());
            items.push(ActionItem::new(
                "search-wikipedia",
                "Search Wikipedia",
                "📚",
                Action::SearchWikipedia,
            ));
        }
        ContentType::LongText => {
            if llm.running {
                items.push(
                    ActionItem::new("summarize", "Summarize", "📝", Action::Summarize)
                        .with_subtitle("Get 2-3 sentence summary"),
                );
                push_translations(&mut items, prefs);
            }
            items.push(search_web_item());
        }
        ContentType::Meeting => {
            let mut calendar = ActionItem::new(
                "calendar",
                "Create Calendar Event",
                "📅",
                Action::Calendar,
            );
            calendar.subtitle = result.date_text().map(str::to_string);
            items.push(calendar);

            if let Some(location) = result.location() {
                items.push(
                    ActionItem::new(
                        "maps",
                        "Open in Maps",
                        "📍",
                        Action::Maps {
                            query: location.to_string(),
                        },
                    )
                    .with_subtitle(location),
                );
            }
            items.push(search_web_item());
        }
        ContentType::Address => {
            items.push(ActionItem::new(
                "maps",
                "Open in Maps",
                "📍",
                Action::Maps {
                    query: text.to_string(),
                },
            ));
            items.push(ActionItem::new("copy", "Copy Address", "📋", Action::Copy));
            items.push(search_web_item());
        }
        ContentType::Url => {
            items.push(ActionItem::new("open", "Open in Browser", "🌐", Action::Open));
            items.push(
                ActionItem::new("copy-markdown", "Copy as Markdown", "📋", Action::CopyMarkdown)
                    .with_subtitle(markdown_link(text)),
            );
            items.push(search_web_item());
        }
        ContentType::Json => {
            items.push(ActionItem::new(
                "pretty-print",
                "Pretty Print JSON",
                "✨",
                Action::PrettyPrint,
            ));
            items.push(ActionItem::new("copy", "Copy JSON", "📋", Action::Copy));
        }
    }

    for (index, item) in items.iter_mut().enumerate() {
        item.shortcut = u8::try_from(index + 1).unwrap_or(u8::MAX);
    }
    items
}

/// 自定义动作菜单项
pub fn custom_item(prompt: &str) -> ActionItem {
    ActionItem::new("custom", "Custom Action", "⚡", Action::Custom)
        .with_subtitle(truncate_chars(prompt, CUSTOM_SUBTITLE_CHARS))
}

/// 翻译动作 id，如 `translate-english`
pub fn translate_id(language: &str) -> String {
    let slug = language
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("translate-{}", slug)
}

/// `[Link](text)`
pub fn markdown_link(text: &str) -> String {
    format!("[Link]({})", text)
}

/// 超过 `max` 个字符时截断并追加 "..."
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// 结果标题中引用的原文片段
pub(crate) fn quote(text: &str) -> String {
    truncate_chars(text, QUOTE_CHARS)
}

fn push_translations(items: &mut Vec<ActionItem>, prefs: &Preferences) {
    for language in prefs.translation_languages() {
        if language.trim().is_empty() {
            continue;
        }
        items.push(ActionItem::new(
            translate_id(language),
            format!("Translate to {}", language),
            "🌍",
            Action::Translate {
                language: language.to_string(),
            },
        ));
    }
    items.push(
        ActionItem::new(
            "translate-other",
            "Translate to other language...",
            "🌐",
            Action::TranslateOther,
        )
        .with_subtitle("Enter any language name"),
    );
}

fn search_web_item() -> ActionItem {
    ActionItem::new("search-web", "Search Web", "🔍", Action::SearchWeb)
}
