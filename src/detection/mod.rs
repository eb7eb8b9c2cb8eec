//! 内容检测 - 把剪贴板 / 选中文本分类为一种内容类型
//!
//! 按固定优先级依次尝试，第一个命中的分支决定结果：
//! 1. URL（置信度 1.0）
//! 2. JSON（以 `{` 或 `[` 开头且能成功解析，1.0）
//! 3. 会议 / 日期（日期解析器找到至少一个表达式，0.9）
//! 4. 地址（门牌号 + 街道关键字，0.8）
//! 5. 按长度兜底：Word / ShortText / LongText（0.9）
//!
//! 分类永远不会失败。

pub mod date;
pub mod patterns;
pub mod types;

pub use date::{DateMatch, DateParser, EnglishDateParser};
pub use types::{ContentKind, ContentResult, ContentType, Entities};

use chrono::{DateTime, Local};
use serde::de::{Deserialize, IgnoredAny};
use tracing::debug;

pub const URL_CONFIDENCE: f32 = 1.0;
pub const JSON_CONFIDENCE: f32 = 1.0;
pub const MEETING_CONFIDENCE: f32 = 0.9;
pub const ADDRESS_CONFIDENCE: f32 = 0.8;
pub const LENGTH_CONFIDENCE: f32 = 0.9;

/// Word：最多词数
const WORD_MAX_WORDS: usize = 2;
/// Word：字符数上限（不含）
const WORD_MAX_CHARS: usize = 30;
/// ShortText：字符数上限（不含）
const SHORT_MAX_CHARS: usize = 100;

/// 内容分类器
pub struct ContentClassifier {
    date_parser: Box<dyn DateParser>,
}

impl ContentClassifier {
    /// 使用内置英文日期解析器
    pub fn new() -> Self {
        Self::with_date_parser(EnglishDateParser::new())
    }

    /// 使用自定义日期解析器
    pub fn with_date_parser<P: DateParser + 'static>(parser: P) -> Self {
        Self {
            date_parser: Box::new(parser),
        }
    }

    /// 以当前时间为参考进行分类
    pub fn classify(&self, text: &str) -> ContentResult {
        self.classify_at(text, Local::now())
    }

    /// 以给定时间为参考进行分类（"tomorrow" 等相对日期基于 `reference` 解析）
    pub fn classify_at(&self, text: &str, reference: DateTime<Local>) -> ContentResult {
        let trimmed = text.trim();
        let result = self.run_cascade(trimmed, reference);

        debug!(
            content_type = %result.content_type(),
            confidence = result.confidence,
            chars = trimmed.chars().count(),
            "Content classified"
        );

        result
    }

    fn run_cascade(&self, trimmed: &str, reference: DateTime<Local>) -> ContentResult {
        if let Some(url) = patterns::URL.find(trimmed) {
            return ContentResult::new(
                ContentKind::Url {
                    url: url.as_str().to_string(),
                },
                URL_CONFIDENCE,
            );
        }

        if is_valid_json(trimmed) {
            return ContentResult::new(ContentKind::Json, JSON_CONFIDENCE);
        }

        if let Some(first) = self.date_parser.parse(trimmed, reference).into_iter().next() {
            return ContentResult::new(
                ContentKind::Meeting {
                    date: first.start,
                    date_text: first.text,
                    location: extract_location(trimmed),
                },
                MEETING_CONFIDENCE,
            );
        }

        if patterns::ADDRESS.is_match(trimmed) {
            return ContentResult::new(
                ContentKind::Address {
                    address: trimmed.to_string(),
                },
                ADDRESS_CONFIDENCE,
            );
        }

        classify_by_length(trimmed)
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// 使用默认分类器和当前时间分类
pub fn classify(text: &str) -> ContentResult {
    ContentClassifier::new().classify(text)
}

/// 以 `{` 或 `[` 开头并且能解析为 JSON
///
/// 只校验语法，不构建 `Value`：超出 f64 范围的数字、孤立的代理项转义
/// 和任意嵌套深度都视为合法。
pub fn is_valid_json(text: &str) -> bool {
    if !text.starts_with('{') && !text.starts_with('[') {
        return false;
    }
    let mut de = serde_json::Deserializer::from_str(text);
    // 跳过值的过程不递归，关闭深度限制不会增加栈占用
    de.disable_recursion_limit();
    IgnoredAny::deserialize(&mut de).is_ok() && de.end().is_ok()
}

/// 从 "at X" / "in X" 提取地点，找不到时返回 None
pub fn extract_location(text: &str) -> Option<String> {
    patterns::LOCATION
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn classify_by_length(trimmed: &str) -> ContentResult {
    let word_count = trimmed.split_whitespace().count();
    let char_count = trimmed.chars().count();

    let kind = if word_count <= WORD_MAX_WORDS && char_count < WORD_MAX_CHARS {
        ContentKind::Word
    } else if char_count < SHORT_MAX_CHARS {
        ContentKind::ShortText
    } else {
        ContentKind::LongText
    };

    ContentResult::new(kind, LENGTH_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn reference() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
    }

    fn classify_fixed(text: &str) -> ContentResult {
        ContentClassifier::new().classify_at(text, reference())
    }

    /// 永远不返回日期的解析器
    struct NoDates;

    impl DateParser for NoDates {
        fn parse(&self, _text: &str, _reference: DateTime<Local>) -> Vec<DateMatch> {
            Vec::new()
        }
    }

    #[test]
    fn test_url_detection() {
        let result = classify_fixed("https://example.com/path?q=1");
        assert_eq!(result.content_type(), ContentType::Url);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.url(), Some("https://example.com/path?q=1"));
    }

    #[test]
    fn test_url_beats_json_and_dates() {
        let result = classify_fixed(r#"https://api.example.com/v1 {"when": "tomorrow at 3pm"}"#);
        assert_eq!(result.content_type(), ContentType::Url);
        assert_eq!(result.url(), Some("https://api.example.com/v1"));
    }

    #[test]
    fn test_url_inside_json_still_url() {
        let result = classify_fixed(r#"{"homepage": "https://example.com"}"#);
        assert_eq!(result.content_type(), ContentType::Url);
        assert_eq!(result.url(), Some(r#"https://example.com"}"#));
    }

    #[test]
    fn test_json_detection() {
        let result = classify_fixed(r#"{"name": "cai", "tags": [1, 2, 3]}"#);
        assert_eq!(result.content_type(), ContentType::Json);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.entities(), Entities::default());

        let result = classify_fixed("  [1, 2, 3]  ");
        assert_eq!(result.content_type(), ContentType::Json);
    }

    #[test]
    fn test_invalid_json_falls_through() {
        let result = classify_fixed("[1,2");
        assert_eq!(result.content_type(), ContentType::Word);

        let result = classify_fixed("{name: cai}");
        assert_ne!(result.content_type(), ContentType::Json);

        assert!(!is_valid_json(r#"{"a": 1} trailing"#));
    }

    #[test]
    fn test_json_syntax_only() {
        // 数字越界、孤立代理项、超过 128 层的嵌套在语法上都合法
        let deep = format!("{}{}", "[".repeat(200), "]".repeat(200));
        for text in ["[1e400]", r#"["\ud800"]"#, deep.as_str()] {
            assert!(is_valid_json(text), "{}", text);
            assert_eq!(classify_fixed(text).content_type(), ContentType::Json, "{}", text);
        }
    }

    #[test]
    fn test_meeting_detection() {
        let result = classify_fixed("Meeting at Starbucks tomorrow at 3pm");
        assert_eq!(result.content_type(), ContentType::Meeting);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.date_text(), Some("tomorrow at 3pm"));
        assert_eq!(result.location(), Some("Starbucks"));
        let expected = NaiveDate::from_ymd_opt(2025, 6, 3)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        assert_eq!(result.date().unwrap().naive_local(), expected);
    }

    #[test]
    fn test_meeting_without_location() {
        let result = classify_fixed("Let's sync next Tuesday");
        assert_eq!(result.content_type(), ContentType::Meeting);
        assert_eq!(result.date_text(), Some("next Tuesday"));
        assert_eq!(result.location(), None);
    }

    #[test]
    fn test_meeting_uses_first_date() {
        let result = classify_fixed("Either Monday or Thursday works");
        assert_eq!(result.date_text(), Some("Monday"));
    }

    #[test]
    fn test_date_beats_address() {
        let result = classify_fixed("123 Main Street on Friday");
        assert_eq!(result.content_type(), ContentType::Meeting);
    }

    #[test]
    fn test_address_detection() {
        let result = classify_fixed("  1600 Pennsylvania Avenue NW, Washington  ");
        assert_eq!(result.content_type(), ContentType::Address);
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.address(), Some("1600 Pennsylvania Avenue NW, Washington"));
    }

    #[test]
    fn test_length_fallback() {
        assert_eq!(classify_fixed("ok").content_type(), ContentType::Word);
        assert_eq!(classify_fixed("machine learning").content_type(), ContentType::Word);
        assert_eq!(
            classify_fixed("please review the quarterly report").content_type(),
            ContentType::ShortText
        );
        assert_eq!(
            classify_fixed("supercalifragilisticexpialidocious").content_type(),
            ContentType::ShortText
        );

        let paragraph = "The committee reviewed several proposals for improving the \
            onboarding experience and agreed that clearer documentation would help \
            new contributors feel welcome.";
        assert!(paragraph.chars().count() >= 100);
        let result = classify_fixed(paragraph);
        assert_eq!(result.content_type(), ContentType::LongText);
        assert_eq!(result.confidence, 0.9);
    }

    #[test]
    fn test_empty_text_is_word() {
        assert_eq!(classify_fixed("").content_type(), ContentType::Word);
        assert_eq!(classify_fixed("   \n ").content_type(), ContentType::Word);
    }

    #[test]
    fn test_custom_date_parser() {
        let classifier = ContentClassifier::with_date_parser(NoDates);
        let result = classifier.classify_at("tomorrow", reference());
        assert_eq!(result.content_type(), ContentType::Word);
    }

    #[test]
    fn test_idempotent_at_fixed_instant() {
        let classifier = ContentClassifier::new();
        for text in [
            "Dinner in the Grand Hall on Friday at 7pm",
            "https://example.com",
            "12 Hauptstraße, Berlin",
            "ok",
        ] {
            assert_eq!(
                classifier.classify_at(text, reference()),
                classifier.classify_at(text, reference())
            );
        }
    }

    #[test]
    fn test_extract_location() {
        assert_eq!(
            extract_location("Lunch tomorrow at Blue Bottle Cafe"),
            Some("Blue Bottle Cafe".to_string())
        );
        assert_eq!(extract_location("Call me tomorrow"), None);
    }
}
