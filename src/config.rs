//! 用户偏好配置
//!
//! 读取顺序（后者覆盖前者）：
//! 1. 内置默认值
//! 2. 配置文件 `~/.config/cai/config.json`（或 `--config` 指定的路径）
//! 3. 环境变量 `CAI_LLM_PROVIDER`、`CAI_LLM_URL`、`CAI_LLM_MODEL`

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 默认请求超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// 默认模型名（本地服务器通常忽略该字段）
pub const DEFAULT_MODEL: &str = "default";

// ============================================================================
// LlmProvider
// ============================================================================

/// 本地 LLM 服务（均为 OpenAI 兼容 API）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Lmstudio,
    Ollama,
    Localai,
    Textgen,
    Custom,
}

impl LlmProvider {
    pub const ALL: [LlmProvider; 5] = [
        Self::Lmstudio,
        Self::Ollama,
        Self::Localai,
        Self::Textgen,
        Self::Custom,
    ];

    /// 内置地址；Custom 使用 `llm_custom_url`
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Self::Lmstudio => Some("http://127.0.0.1:1234/v1"),
            Self::Ollama => Some("http://127.0.0.1:11434/v1"),
            Self::Localai => Some("http://127.0.0.1:8080/v1"),
            Self::Textgen => Some("http://127.0.0.1:5000/v1"),
            Self::Custom => None,
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lmstudio => write!(f, "lmstudio"),
            Self::Ollama => write!(f, "ollama"),
            Self::Localai => write!(f, "localai"),
            Self::Textgen => write!(f, "textgen"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lmstudio" | "lm-studio" => Ok(Self::Lmstudio),
            "ollama" => Ok(Self::Ollama),
            "localai" => Ok(Self::Localai),
            "textgen" | "text-generation-webui" => Ok(Self::Textgen),
            "custom" => Ok(Self::Custom),
            _ => Err(anyhow!("Unknown LLM provider: {}", s)),
        }
    }
}

// ============================================================================
// SearchEngine / MapsProvider
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    #[default]
    Google,
    Duckduckgo,
    Bing,
    Brave,
    Ecosia,
}

impl SearchEngine {
    pub const ALL: [SearchEngine; 5] = [
        Self::Google,
        Self::Duckduckgo,
        Self::Bing,
        Self::Brave,
        Self::Ecosia,
    ];

    /// 搜索地址，查询参数名为 `q`
    pub fn search_url(&self) -> &'static str {
        match self {
            Self::Google => "https://www.google.com/search",
            Self::Duckduckgo => "https://duckduckgo.com/",
            Self::Bing => "https://www.bing.com/search",
            Self::Brave => "https://search.brave.com/search",
            Self::Ecosia => "https://www.ecosia.org/search",
        }
    }
}

impl std::fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "google"),
            Self::Duckduckgo => write!(f, "duckduckgo"),
            Self::Bing => write!(f, "bing"),
            Self::Brave => write!(f, "brave"),
            Self::Ecosia => write!(f, "ecosia"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapsProvider {
    #[default]
    Apple,
    Google,
}

impl std::fmt::Display for MapsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Apple => write!(f, "apple"),
            Self::Google => write!(f, "google"),
        }
    }
}

// ============================================================================
// Preferences
// ============================================================================

/// 用户偏好
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// LLM 服务类型
    pub llm_provider: LlmProvider,
    /// Custom 类型的服务地址（如 `http://localhost:9000/v1`）
    pub llm_custom_url: String,
    /// 模型名
    pub llm_model: String,
    /// 首选翻译语言
    pub translation_language_1: String,
    /// 第二翻译语言
    pub translation_language_2: String,
    /// 网页搜索引擎
    pub search_engine: SearchEngine,
    /// 地图应用
    pub maps: MapsProvider,
    /// 自定义动作的指令，空字符串表示不显示
    pub custom_action_prompt: String,
    /// LLM 请求超时（毫秒）
    pub timeout_ms: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            llm_provider: LlmProvider::default(),
            llm_custom_url: String::new(),
            llm_model: DEFAULT_MODEL.to_string(),
            translation_language_1: "English".to_string(),
            translation_language_2: "Spanish".to_string(),
            search_engine: SearchEngine::default(),
            maps: MapsProvider::default(),
            custom_action_prompt: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// 配置目录 `~/.config/cai`
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/cai")
}

/// 默认配置文件路径
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

impl Preferences {
    /// 从默认路径加载并应用环境变量
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// 从指定路径（或默认路径）加载并应用环境变量
    pub fn load_with(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        let mut prefs = Self::load_from(&path)?;
        prefs.apply_overrides(|key| std::env::var(key).ok());
        Ok(prefs)
    }

    /// 只读取配置文件；文件不存在时返回默认值
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let prefs: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        debug!(path = %path.display(), provider = %prefs.llm_provider, "Loaded config");
        Ok(prefs)
    }

    /// 写入配置文件（自动创建目录）
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// 应用环境变量覆盖，`lookup` 便于测试注入
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(provider) = non_empty("CAI_LLM_PROVIDER") {
            match provider.parse() {
                Ok(p) => self.llm_provider = p,
                Err(e) => debug!("Ignoring CAI_LLM_PROVIDER: {}", e),
            }
        }

        // 直接给出地址时视为 custom
        if let Some(url) = non_empty("CAI_LLM_URL") {
            self.llm_provider = LlmProvider::Custom;
            self.llm_custom_url = url;
        }

        if let Some(model) = non_empty("CAI_LLM_MODEL") {
            self.llm_model = model;
        }
    }

    /// 当前 LLM 的 base URL（不带结尾 `/`）
    pub fn llm_base_url(&self) -> String {
        match self.llm_provider.default_base_url() {
            Some(url) => url.to_string(),
            None => self.llm_custom_url.trim().trim_end_matches('/').to_string(),
        }
    }

    /// 两个首选翻译语言
    pub fn translation_languages(&self) -> [&str; 2] {
        [
            self.translation_language_1.as_str(),
            self.translation_language_2.as_str(),
        ]
    }

    /// 配置了非空的自定义动作
    pub fn custom_action(&self) -> Option<&str> {
        let prompt = self.custom_action_prompt.trim();
        (!prompt.is_empty()).then_some(prompt)
    }
}
