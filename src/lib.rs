//! Cai - 剪贴板动作智能：识别复制 / 选中的内容并给出对应动作

pub mod actions;
pub mod cli;
pub mod config;
pub mod detection;
pub mod host;
pub mod llm;

pub use actions::{build_actions, Action, ActionItem, ActionRunner, Outcome, RunOptions};
pub use config::{LlmProvider, MapsProvider, Preferences, SearchEngine};
pub use detection::{
    classify, ContentClassifier, ContentKind, ContentResult, ContentType, DateMatch, DateParser,
    EnglishDateParser, Entities,
};
pub use host::{Host, SystemHost};
pub use llm::{LlmClient, LlmConfig, LlmStatus, TextGenerator};
