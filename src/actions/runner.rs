//! 动作执行

use super::{calendar, maps, markdown_link, quote, search, Action, ActionItem};
use crate::config::Preferences;
use crate::detection::{patterns, ContentResult, ContentType};
use crate::host::Host;
use crate::llm::{prompts, TextGenerator};
use anyhow::{anyhow, Result};
use tracing::{debug, info};

/// 执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// LLM 生成的文本
    Generated { title: String, text: String },
    /// 已在浏览器 / 地图 / 日历中打开
    Opened(String),
    /// 已复制到剪贴板
    Copied(String),
}

/// 执行时补充的参数
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// translate-other 的目标语言
    pub language: Option<String>,
    /// 覆盖配置中的自定义指令
    pub instruction: Option<String>,
}

/// 动作执行器
pub struct ActionRunner<H: Host, G: TextGenerator> {
    host: H,
    llm: G,
    prefs: Preferences,
}

impl<H: Host, G: TextGenerator> ActionRunner<H, G> {
    pub fn new(host: H, llm: G, prefs: Preferences) -> Self {
        Self { host, llm, prefs }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// 对 `text` 执行菜单项
    pub fn run(
        &self,
        item: &ActionItem,
        text: &str,
        result: &ContentResult,
        options: &RunOptions,
    ) -> Result<Outcome> {
        debug!(action = %item.id, content_type = %result.content_type(), "Running action");

        let outcome = match &item.action {
            Action::Define => self.generate(format!("Definition: {}", text), prompts::define(text))?,
            Action::Explain => {
                let title = if result.content_type() == ContentType::Word {
                    format!("Explanation: {}", text)
                } else {
                    format!("Explanation: {}", quote(text))
                };
                self.generate(title, prompts::explain(text))?
            }
            Action::Summarize => self.generate("Summary".to_string(), prompts::summarize(text))?,
            Action::Translate { language } => self.translate(text, language)?,
            Action::TranslateOther => {
                let language = options
                    .language
                    .as_deref()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .ok_or_else(|| anyhow!("Target language required"))?;
                self.translate(text, language)?
            }
            Action::Custom => {
                let instruction = options
                    .instruction
                    .as_deref()
                    .map(str::trim)
                    .filter(|i| !i.is_empty())
                    .or_else(|| self.prefs.custom_action())
                    .ok_or_else(|| anyhow!("No custom instruction configured"))?;
                self.generate("Custom Action".to_string(), prompts::custom(text, instruction))?
            }
            Action::SearchWeb => {
                self.open(search::web_search_url(self.prefs.search_engine, text)?.as_str())?
            }
            Action::SearchWikipedia => self.open(search::wikipedia_url(text)?.as_str())?,
            Action::Calendar => {
                let date = result.date().ok_or_else(|| anyhow!("No date detected"))?;
                let title = calendar::extract_event_title(text);
                let url = calendar::google_calendar_url(&title, date, result.location(), text)?;
                info!(title = %title, "Creating calendar event");
                self.open(url.as_str())?
            }
            Action::Maps { query } => self.open(maps::maps_url(self.prefs.maps, query)?.as_str())?,
            Action::Open => {
                let url = patterns::URL
                    .find(text)
                    .ok_or_else(|| anyhow!("No URL found"))?;
                self.open(url.as_str())?
            }
            Action::Copy => self.copy(text.to_string())?,
            Action::CopyMarkdown => self.copy(markdown_link(text))?,
            Action::PrettyPrint => self.copy(pretty_print(text)?)?,
        };

        Ok(outcome)
    }

    fn generate(&self, title: String, prompt: String) -> Result<Outcome> {
        let text = self.llm.generate(&prompt)?;
        Ok(Outcome::Generated { title, text })
    }

    fn translate(&self, text: &str, language: &str) -> Result<Outcome> {
        self.generate(
            format!("Translation to {}", language),
            prompts::translate(text, language),
        )
    }

    fn open(&self, url: &str) -> Result<Outcome> {
        self.host.open_url(url)?;
        Ok(Outcome::Opened(url.to_string()))
    }

    fn copy(&self, text: String) -> Result<Outcome> {
        self.host.write_text(&text)?;
        Ok(Outcome::Copied(text))
    }
}

/// 两空格缩进的 JSON，保留键顺序
pub fn pretty_print(text: &str) -> Result<String> {
    let value: serde_json::Value =
        serde_json::from_str(text.trim()).map_err(|_| anyhow!("Invalid JSON"))?;
    Ok(serde_json::to_string_pretty(&value)?)
}
