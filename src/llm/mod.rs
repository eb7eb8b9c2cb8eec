//! 本地 LLM 集成

pub mod client;
pub mod prompts;

pub use client::{LlmClient, LlmConfig, LlmStatus, TextGenerator};
