//! 内容检测类型定义
//!
//! `ContentKind` 每个变体只携带自己相关的实体字段，
//! 序列化时仍输出 `{ type, confidence, entities }` 的扁平结构。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// ContentType - 内容类型标签
// ============================================================================

/// 内容类型（互斥，每次分类只有一个）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    /// 单词或短语（≤2 词且 <30 字符）
    Word,
    /// 短文本（<100 字符）
    #[serde(rename = "short")]
    ShortText,
    /// 长文本
    #[serde(rename = "long")]
    LongText,
    /// 会议 / 日期引用
    Meeting,
    /// 街道地址
    Address,
    /// 链接
    Url,
    /// JSON 文档
    Json,
}

impl ContentType {
    /// 菜单标题中显示的名称
    pub fn label(&self) -> &'static str {
        match self {
            Self::Word => "Word",
            Self::ShortText => "Text",
            Self::LongText => "Long Text",
            Self::Meeting => "Meeting",
            Self::Address => "Address",
            Self::Url => "URL",
            Self::Json => "JSON",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Word => "✏️",
            Self::ShortText => "📝",
            Self::LongText => "📖",
            Self::Meeting => "📅",
            Self::Address => "📍",
            Self::Url => "🔗",
            Self::Json => "{ }",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Word => "word",
            Self::ShortText => "short",
            Self::LongText => "long",
            Self::Meeting => "meeting",
            Self::Address => "address",
            Self::Url => "url",
            Self::Json => "json",
        };
        write!(f, "{}", name)
    }
}

// ============================================================================
// ContentKind - 带实体的分类结果
// ============================================================================

/// 分类结果及其提取的实体
#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind {
    Word,
    ShortText,
    LongText,
    Meeting {
        /// 解析出的时间点
        date: DateTime<Local>,
        /// 日期解析器匹配到的原始文本
        date_text: String,
        /// 尽力提取的地点，可能为空
        location: Option<String>,
    },
    Address {
        /// 整段修剪后的输入
        address: String,
    },
    Url {
        url: String,
    },
    Json,
}

impl ContentKind {
    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Word => ContentType::Word,
            Self::ShortText => ContentType::ShortText,
            Self::LongText => ContentType::LongText,
            Self::Meeting { .. } => ContentType::Meeting,
            Self::Address { .. } => ContentType::Address,
            Self::Url { .. } => ContentType::Url,
            Self::Json => ContentType::Json,
        }
    }
}

/// 内容检测结果
///
/// 分类完成后不可变；置信度是每个分支的固定常量。
#[derive(Debug, Clone, PartialEq)]
pub struct ContentResult {
    pub kind: ContentKind,
    pub confidence: f32,
}

impl ContentResult {
    pub fn new(kind: ContentKind, confidence: f32) -> Self {
        Self { kind, confidence }
    }

    pub fn content_type(&self) -> ContentType {
        self.kind.content_type()
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Url { url } => Some(url),
            _ => None,
        }
    }

    pub fn date(&self) -> Option<DateTime<Local>> {
        match &self.kind {
            ContentKind::Meeting { date, .. } => Some(*date),
            _ => None,
        }
    }

    pub fn date_text(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Meeting { date_text, .. } => Some(date_text),
            _ => None,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Meeting { location, .. } => location.as_deref(),
            _ => None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Address { address } => Some(address),
            _ => None,
        }
    }

    /// 扁平实体视图，未设置的字段为 None
    pub fn entities(&self) -> Entities<'_> {
        Entities {
            date: self.date(),
            date_text: self.date_text(),
            location: self.location(),
            address: self.address(),
            url: self.url(),
        }
    }
}

/// 实体字段集合（序列化用）
#[derive(Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Entities<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Local>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
}

impl Serialize for ContentResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            #[serde(rename = "type")]
            content_type: ContentType,
            confidence: f32,
            entities: Entities<'a>,
        }

        View {
            content_type: self.content_type(),
            confidence: self.confidence,
            entities: self.entities(),
        }
        .serialize(serializer)
    }
}
