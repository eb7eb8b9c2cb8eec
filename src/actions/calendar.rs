//! 日历事件：标题提取与 Google Calendar 链接

use anyhow::Result;
use chrono::{DateTime, Duration, Local, Utc};
use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

const GOOGLE_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";

/// 标题最大字符数，超出时截断为 47 字符 + "..."
const MAX_TITLE_CHARS: usize = 50;

const FALLBACK_TITLE: &str = "Meeting";

/// 从标题中剥离的日期 / 时间 / 地点片段，按顺序应用
static NOISE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(?:on|at)?\s*(?:tomorrow|today|tonight|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        r"(?i)\b(?:next|this)\s+(?:week|month|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b",
        r"(?i)\bat\s+\d{1,2}(?::\d{2})?\s*(?:am|pm)?\b",
        r"(?i)\b\d{1,2}(?::\d{2})?\s*(?:am|pm)\b",
        // 结尾的 "at/in <大写开头的地点>"
        r"(?i)\b(?:at|in)\s+(?:the\s+)?(?-i:[A-Z])[^.!?]*$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("calendar noise regex"))
    .collect()
});

/// 常见会议句式中的主题
static SUBJECT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:meeting|call|sync|chat)\s+(?:about|re:?|for|on)\s+(.+)",
        r"(?i)(?:discuss|talk about|review)\s+(?:the\s+)?(.+)",
        r"(?i)(?:let's|lets)\s+(?:sync|meet|chat|discuss)\s+(?:about|on|re:?)?\s*(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("calendar subject regex"))
    .collect()
});

static GENERIC_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:let'?s?\s*)?(?:meet|sync|call|chat)$").expect("generic title regex")
});

/// 从原文提取事件标题
pub fn extract_event_title(text: &str) -> String {
    let mut cleaned = text.to_string();
    for pattern in NOISE_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    for pattern in SUBJECT_PATTERNS.iter() {
        if let Some(subject) = pattern.captures(&cleaned).and_then(|c| c.get(1)) {
            let subject = subject.as_str().trim();
            if !subject.is_empty() {
                return truncate_title(subject);
            }
        }
    }

    if cleaned.chars().count() < 3 || GENERIC_TITLE.is_match(&cleaned) {
        return FALLBACK_TITLE.to_string();
    }

    truncate_title(&cleaned)
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let head: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

/// Google Calendar 使用的 UTC 基本格式
fn format_utc(date: DateTime<Local>) -> String {
    date.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ").to_string()
}

/// 预填事件的 Google Calendar 链接，时长 1 小时
pub fn google_calendar_url(
    title: &str,
    start: DateTime<Local>,
    location: Option<&str>,
    original_text: &str,
) -> Result<Url> {
    let end = start + Duration::hours(1);
    let dates = format!("{}/{}", format_utc(start), format_utc(end));
    let details = format!("\"{}\"\n\nCreated with Cai.", original_text);

    let mut params = vec![
        ("action", "TEMPLATE"),
        ("text", title),
        ("dates", dates.as_str()),
        ("details", details.as_str()),
    ];
    if let Some(location) = location {
        params.push(("location", location));
    }

    Ok(Url::parse_with_params(GOOGLE_CALENDAR_URL, &params)?)
}
