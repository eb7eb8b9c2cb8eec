//! 本地 LLM 客户端（OpenAI 兼容 API）
//!
//! 支持 LM Studio、Ollama、LocalAI、text-generation-webui 以及任意自定义地址。
//! - `GET {base}/models` 用作健康检查
//! - `POST {base}/chat/completions` 生成文本

use crate::config::{Preferences, DEFAULT_MODEL, DEFAULT_TIMEOUT_MS};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// 默认采样温度
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// 默认最大输出 tokens
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// 健康检查超时（毫秒），不受生成超时影响
pub const HEALTH_CHECK_TIMEOUT_MS: u64 = 2000;

/// LLM 客户端配置
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// API 基础 URL（如 `http://127.0.0.1:1234/v1`）
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// 请求超时（毫秒）
    pub timeout_ms: u64,
    /// 采样温度
    pub temperature: f32,
    /// 最大输出 tokens
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::from_preferences(&Preferences::default())
    }
}

impl LlmConfig {
    /// 由用户偏好生成
    pub fn from_preferences(prefs: &Preferences) -> Self {
        let model = if prefs.llm_model.trim().is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            prefs.llm_model.trim().to_string()
        };
        let timeout_ms = if prefs.timeout_ms == 0 {
            DEFAULT_TIMEOUT_MS
        } else {
            prefs.timeout_ms
        };

        Self {
            base_url: prefs.llm_base_url(),
            model,
            timeout_ms,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub fn models_url(&self) -> String {
        format!("{}/models", self.base_url.trim_end_matches('/'))
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Chat Completions 请求体
#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Chat Completions 响应体
#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// API 错误响应（OpenAI 格式）
#[derive(Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ApiError,
}

#[derive(Deserialize)]
pub(crate) struct ApiError {
    pub message: String,
}

impl ChatRequest {
    pub(crate) fn user(config: &LlmConfig, prompt: &str) -> Self {
        Self {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// 从响应体取出第一条回复
pub(crate) fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| anyhow!("Failed to parse LLM response: {} - body: {}", e, body))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("LLM returned no choices"))?;

    let text = choice.message.content.unwrap_or_default();
    if text.trim().is_empty() {
        warn!("Empty response from LLM");
    }
    Ok(text.trim().to_string())
}

// ============================================================================
// Client
// ============================================================================

/// LLM 服务状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmStatus {
    pub running: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LlmStatus {
    pub fn running() -> Self {
        Self {
            running: true,
            error: None,
        }
    }

    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            running: false,
            error: Some(error.into()),
        }
    }
}

/// 文本生成能力，动作执行器通过它调用 LLM
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt)
    }
}

/// 本地 LLM 客户端
pub struct LlmClient {
    client: reqwest::blocking::Client,
    config: LlmConfig,
}

impl LlmClient {
    /// 创建新客户端
    pub fn new(config: LlmConfig) -> Result<Self> {
        // 本地服务不走系统代理
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .no_proxy()
            .build()
            .map_err(|e| anyhow!("Cannot create HTTP client: {}", e))?;

        Ok(Self { client, config })
    }

    /// 从用户偏好创建客户端
    pub fn from_preferences(prefs: &Preferences) -> Result<Self> {
        Self::new(LlmConfig::from_preferences(prefs))
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// 检查服务是否可用，从不返回错误
    pub fn check(&self) -> LlmStatus {
        if self.config.base_url.is_empty() {
            return LlmStatus::unavailable("No LLM URL configured");
        }

        let url = self.config.models_url();
        let timeout = Duration::from_millis(HEALTH_CHECK_TIMEOUT_MS.min(self.config.timeout_ms));

        match self.client.get(&url).timeout(timeout).send() {
            Ok(response) if response.status().is_success() => {
                debug!(base_url = %self.config.base_url, "LLM server reachable");
                LlmStatus::running()
            }
            Ok(response) => {
                debug!(base_url = %self.config.base_url, status = %response.status(), "LLM health check failed");
                LlmStatus::unavailable(format!(
                    "LLM server error ({}) at {}",
                    response.status(),
                    self.config.base_url
                ))
            }
            Err(e) => {
                debug!(base_url = %self.config.base_url, error = %e, "LLM server unreachable");
                LlmStatus::unavailable(format!("Cannot connect to {}", self.config.base_url))
            }
        }
    }

    /// 发送单条用户消息并返回回复文本
    pub fn generate(&self, prompt: &str) -> Result<String> {
        if self.config.base_url.is_empty() {
            return Err(anyhow!("No LLM URL configured"));
        }

        let request = ChatRequest::user(&self.config, prompt);

        debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            base_url = %self.config.base_url,
            timeout_ms = self.config.timeout_ms,
            "Sending request to LLM"
        );

        let start = std::time::Instant::now();
        let response = self
            .client
            .post(self.config.chat_url())
            .json(&request)
            .send()
            .map_err(|e| {
                anyhow!(
                    "LLM request failed after {}ms: {}",
                    start.elapsed().as_millis(),
                    e
                )
            })?;

        debug!(elapsed_ms = start.elapsed().as_millis(), "LLM request completed");

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| anyhow!("Failed to read LLM response: {}", e))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                return Err(anyhow!("LLM error ({}): {}", status, error_resp.error.message));
            }
            return Err(anyhow!("LLM error ({}): {}", status, body));
        }

        parse_completion(&body)
    }
}

impl TextGenerator for LlmClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        LlmClient::generate(self, prompt)
    }
}
