//! 自然语言日期 / 时间解析
//!
//! 分类器只依赖 `DateParser` 能力："在文本中找出日期表达式，返回解析后的时间点和匹配片段"。
//! 内置的 `EnglishDateParser` 覆盖常见英文写法：
//! - 相对日期：today / tonight / tomorrow / yesterday / day after tomorrow
//! - 星期：Friday、next Tuesday、last Monday
//! - 相对周期：next week / this month / last year
//! - 偏移：in 3 days、2 hours ago
//! - 日期：March 5、5th of March, 2025、2025-03-05、3/5/2025
//! - 时间：3pm、3:30 p.m.、15:00、at 9、noon、midnight
//!
//! 相邻的日期和时间（如 "tomorrow at 3pm"）合并为一个匹配。

use chrono::{
    DateTime, Datelike, Days, Duration, Local, LocalResult, Months, NaiveDate, NaiveDateTime,
    NaiveTime, TimeZone, Weekday,
};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// 只有日期没有时间时使用的默认时刻
const IMPLIED_HOUR: u32 = 12;

/// "tonight" 的默认时刻
const TONIGHT_HOUR: u32 = 20;

/// 跳过时段的最大长度（小时），覆盖整日跳过的时区调整
const MAX_GAP_HOURS: i64 = 24;

/// 日期解析能力
pub trait DateParser: Send + Sync {
    /// 按出现顺序返回文本中的所有日期表达式
    fn parse(&self, text: &str, reference: DateTime<Local>) -> Vec<DateMatch>;
}

/// 一个日期表达式匹配
#[derive(Debug, Clone, PartialEq)]
pub struct DateMatch {
    /// 匹配在原文中的字节偏移
    pub index: usize,
    /// 匹配到的原文
    pub text: String,
    /// 解析后的时间点
    pub start: DateTime<Local>,
}

#[derive(Debug, Clone, Copy)]
enum Piece {
    /// 仅日期；weak 表示来自星期名，可被同位置的具体日期覆盖
    Date {
        date: NaiveDate,
        implied: NaiveTime,
        weak: bool,
    },
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

#[derive(Debug, Clone, Copy)]
struct Token {
    start: usize,
    end: usize,
    piece: Piece,
}

struct Context<'a> {
    text: &'a str,
    now: NaiveDateTime,
}

type Resolver = fn(&Captures, &Context) -> Option<Piece>;

const MONTH: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

const AMOUNT: &str = r"\d+|an?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve";

const UNIT: &str = r"minute|hour|day|week|month|year";

static RECOGNIZERS: LazyLock<Vec<(Regex, Resolver)>> = LazyLock::new(|| {
    let table: Vec<(String, Resolver)> = vec![
        (
            r"(?i)\b(day\s+after\s+tomorrow|today|tonight|tomorrow|yesterday)\b".to_string(),
            relative_day,
        ),
        (
            r"(?i)\b(?:(this|next|last)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b"
                .to_string(),
            weekday,
        ),
        (
            r"(?i)\b(this|next|last)\s+(week|month|year)\b".to_string(),
            relative_period,
        ),
        (
            format!(r"(?i)\bin\s+({AMOUNT})\s+({UNIT})s?\b"),
            offset_forward,
        ),
        (
            format!(r"(?i)\b({AMOUNT})\s+({UNIT})s?\s+ago\b"),
            offset_backward,
        ),
        (
            format!(r"(?i)\b({MONTH})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}})\b)?"),
            month_day,
        ),
        (
            format!(r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTH})\b(?:,?\s+(\d{{4}})\b)?"),
            day_month,
        ),
        (r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b".to_string(), iso_date),
        (
            r"\b(\d{1,2})/(\d{1,2})(?:/(\d{4}|\d{2}))?\b".to_string(),
            slash_date,
        ),
        (
            r"(?i)\b(?:at\s+)?(\d{1,2})(?::([0-5]\d))?\s*([ap])\.?m\b".to_string(),
            twelve_hour,
        ),
        (
            r"(?i)\b(?:at\s+)?([01]?\d|2[0-3]):([0-5]\d)\b".to_string(),
            twenty_four_hour,
        ),
        (r"(?i)\bat\s+([01]?\d|2[0-3])\b".to_string(), at_hour),
        (
            r"(?i)\b(?:at\s+)?(noon|midday|midnight)\b".to_string(),
            named_time,
        ),
    ];

    table
        .into_iter()
        .filter_map(|(pattern, resolver)| Regex::new(&pattern).ok().map(|re| (re, resolver)))
        .collect()
});

/// 日期后接时间允许的间隔："tomorrow at 3pm"、"March 5, 10:00"
static DATE_TIME_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[\s,]*(?:(?:at|on|@)[\s,]*)?$").expect("gap regex"));

/// 时间后接日期允许的间隔："3pm on Friday"
static TIME_DATE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[\s,]*(?:on[\s,]*)?$").expect("gap regex"));

/// 星期与具体日期之间的间隔："Friday, March 5"
static LIST_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s,]*$").expect("gap regex"));

/// 基于 chrono + regex 的英文日期解析器
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishDateParser;

impl EnglishDateParser {
    pub fn new() -> Self {
        Self
    }
}

impl DateParser for EnglishDateParser {
    fn parse(&self, text: &str, reference: DateTime<Local>) -> Vec<DateMatch> {
        let ctx = Context {
            text,
            now: reference.naive_local(),
        };

        let tokens = merge_adjacent(select_longest(tokenize(&ctx)), text);

        tokens
            .into_iter()
            .filter_map(|token| {
                let naive = match token.piece {
                    Piece::Date { date, implied, .. } => date.and_time(implied),
                    Piece::Time(time) => ctx.now.date().and_time(time),
                    Piece::DateTime(dt) => dt,
                };
                let start = resolve_local(naive, |n| Local.from_local_datetime(n))?;
                Some(DateMatch {
                    index: token.start,
                    text: text[token.start..token.end].to_string(),
                    start,
                })
            })
            .collect()
    }
}

/// 本地时间换算为时刻
///
/// 重叠时段取较早的时刻；落在夏令时跳过的时段时逐小时后移，直到出现有效时刻。
fn resolve_local<T, F>(naive: NaiveDateTime, lookup: F) -> Option<T>
where
    F: Fn(&NaiveDateTime) -> LocalResult<T>,
{
    (0..=MAX_GAP_HOURS)
        .filter_map(|hours| naive.checked_add_signed(Duration::hours(hours)))
        .find_map(|candidate| lookup(&candidate).earliest())
}

fn tokenize(ctx: &Context) -> Vec<Token> {
    let mut tokens = Vec::new();
    for (re, resolver) in RECOGNIZERS.iter() {
        for caps in re.captures_iter(ctx.text) {
            let Some(whole) = caps.get(0) else { continue };
            if let Some(piece) = resolver(&caps, ctx) {
                tokens.push(Token {
                    start: whole.start(),
                    end: whole.end(),
                    piece,
                });
            }
        }
    }
    tokens
}

/// 重叠时保留最长的匹配，结果按位置排序
fn select_longest(mut tokens: Vec<Token>) -> Vec<Token> {
    tokens.sort_by(|a, b| {
        (b.end - b.start)
            .cmp(&(a.end - a.start))
            .then(a.start.cmp(&b.start))
    });

    let mut accepted: Vec<Token> = Vec::new();
    for token in tokens {
        let overlaps = accepted
            .iter()
            .any(|t| token.start < t.end && t.start < token.end);
        if !overlaps {
            accepted.push(token);
        }
    }

    accepted.sort_by_key(|t| t.start);
    accepted
}

fn merge_adjacent(tokens: Vec<Token>, text: &str) -> Vec<Token> {
    let mut merged: Vec<Token> = Vec::new();
    for token in tokens {
        if let Some(last) = merged.last_mut() {
            let gap = &text[last.end..token.start];
            if let Some(piece) = combine(last.piece, token.piece, gap) {
                last.end = token.end;
                last.piece = piece;
                continue;
            }
        }
        merged.push(token);
    }
    merged
}

fn combine(left: Piece, right: Piece, gap: &str) -> Option<Piece> {
    match (left, right) {
        (Piece::Date { date, .. }, Piece::Time(time)) if DATE_TIME_GAP.is_match(gap) => {
            Some(Piece::DateTime(date.and_time(time)))
        }
        (Piece::Time(time), Piece::Date { date, .. }) if TIME_DATE_GAP.is_match(gap) => {
            Some(Piece::DateTime(date.and_time(time)))
        }
        (Piece::Date { weak: true, .. }, strong @ Piece::Date { weak: false, .. })
        | (strong @ Piece::Date { weak: false, .. }, Piece::Date { weak: true, .. })
            if LIST_GAP.is_match(gap) =>
        {
            Some(strong)
        }
        _ => None,
    }
}

// ============================================================================
// Resolvers
// ============================================================================

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(IMPLIED_HOUR, 0, 0).unwrap_or_default()
}

fn date_at_noon(date: NaiveDate) -> Piece {
    Piece::Date {
        date,
        implied: noon(),
        weak: false,
    }
}

fn relative_day(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let today = ctx.now.date();
    let word = caps.get(1)?.as_str().to_lowercase();
    if word.starts_with("day") {
        return Some(date_at_noon(today.checked_add_days(Days::new(2))?));
    }
    match word.as_str() {
        "today" => Some(date_at_noon(today)),
        "tonight" => Some(Piece::Date {
            date: today,
            implied: NaiveTime::from_hms_opt(TONIGHT_HOUR, 0, 0)?,
            weak: false,
        }),
        "tomorrow" => Some(date_at_noon(today.checked_add_days(Days::new(1))?)),
        "yesterday" => Some(date_at_noon(today.checked_sub_days(Days::new(1))?)),
        _ => None,
    }
}

fn weekday(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let today = ctx.now.date();
    let target: Weekday = caps.get(2)?.as_str().parse().ok()?;
    let modifier = caps.get(1).map(|m| m.as_str().to_lowercase());

    let today_idx = today.weekday().num_days_from_monday() as i64;
    let target_idx = target.num_days_from_monday() as i64;
    let ahead = (target_idx - today_idx).rem_euclid(7) as u64;
    let behind = (today_idx - target_idx).rem_euclid(7) as u64;

    let date = match modifier.as_deref() {
        Some("next") => today.checked_add_days(Days::new(if ahead == 0 { 7 } else { ahead }))?,
        Some("last") => today.checked_sub_days(Days::new(if behind == 0 { 7 } else { behind }))?,
        _ => today.checked_add_days(Days::new(ahead))?,
    };

    Some(Piece::Date {
        date,
        implied: noon(),
        weak: true,
    })
}

fn relative_period(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let today = ctx.now.date();
    let direction = caps.get(1)?.as_str().to_lowercase();
    let unit = caps.get(2)?.as_str().to_lowercase();

    let date = match (direction.as_str(), unit.as_str()) {
        ("this", _) => today,
        ("next", "week") => today.checked_add_days(Days::new(7))?,
        ("last", "week") => today.checked_sub_days(Days::new(7))?,
        ("next", "month") => today.checked_add_months(Months::new(1))?,
        ("last", "month") => today.checked_sub_months(Months::new(1))?,
        ("next", "year") => today.checked_add_months(Months::new(12))?,
        ("last", "year") => today.checked_sub_months(Months::new(12))?,
        _ => return None,
    };
    Some(date_at_noon(date))
}

fn offset_forward(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let amount = parse_amount(caps.get(1)?.as_str())?;
    shift(ctx.now, amount, caps.get(2)?.as_str(), true).map(Piece::DateTime)
}

fn offset_backward(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let amount = parse_amount(caps.get(1)?.as_str())?;
    shift(ctx.now, amount, caps.get(2)?.as_str(), false).map(Piece::DateTime)
}

fn month_day(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let month = month_number(caps.get(1)?.as_str())?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year = caps.get(3).and_then(|m| m.as_str().parse().ok());
    calendar_date(year, month, day, ctx.now.date()).map(date_at_noon)
}

fn day_month(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let day: u32 = caps.get(1)?.as_str().parse().ok()?;
    let month = month_number(caps.get(2)?.as_str())?;
    let year = caps.get(3).and_then(|m| m.as_str().parse().ok());
    calendar_date(year, month, day, ctx.now.date()).map(date_at_noon)
}

fn iso_date(caps: &Captures, _ctx: &Context) -> Option<Piece> {
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let month: u32 = caps.get(2)?.as_str().parse().ok()?;
    let day: u32 = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(date_at_noon)
}

/// 美式顺序 month/day[/year]
fn slash_date(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let month: u32 = caps.get(1)?.as_str().parse().ok()?;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;
    let year = match caps.get(3) {
        Some(m) if m.as_str().len() == 2 => Some(2000 + m.as_str().parse::<i32>().ok()?),
        Some(m) => Some(m.as_str().parse().ok()?),
        None => None,
    };
    calendar_date(year, month, day, ctx.now.date()).map(date_at_noon)
}

fn twelve_hour(caps: &Captures, _ctx: &Context) -> Option<Piece> {
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if !(1..=12).contains(&hour) {
        return None;
    }
    let pm = caps.get(3)?.as_str().eq_ignore_ascii_case("p");
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };
    NaiveTime::from_hms_opt(hour, minute, 0).map(Piece::Time)
}

fn twenty_four_hour(caps: &Captures, _ctx: &Context) -> Option<Piece> {
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0).map(Piece::Time)
}

/// "at 9"，后面紧跟 / - . : 时不算时间（"at 3/5" 是日期）
fn at_hour(caps: &Captures, ctx: &Context) -> Option<Piece> {
    let whole = caps.get(0)?;
    if let Some(next) = ctx.text[whole.end()..].chars().next() {
        if matches!(next, '/' | '-' | '.' | ':') {
            return None;
        }
    }
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, 0, 0).map(Piece::Time)
}

fn named_time(caps: &Captures, _ctx: &Context) -> Option<Piece> {
    let hour = if caps.get(1)?.as_str().eq_ignore_ascii_case("midnight") {
        0
    } else {
        12
    };
    NaiveTime::from_hms_opt(hour, 0, 0).map(Piece::Time)
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_amount(s: &str) -> Option<u32> {
    match s.to_lowercase().as_str() {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        digits => digits.parse().ok(),
    }
}

fn shift(now: NaiveDateTime, amount: u32, unit: &str, forward: bool) -> Option<NaiveDateTime> {
    let months = |n: u32| -> Option<NaiveDateTime> {
        if forward {
            now.checked_add_months(Months::new(n))
        } else {
            now.checked_sub_months(Months::new(n))
        }
    };

    let amount_i = i64::from(amount);
    let delta = match unit.to_lowercase().as_str() {
        "minute" => Duration::try_minutes(amount_i)?,
        "hour" => Duration::try_hours(amount_i)?,
        "day" => Duration::try_days(amount_i)?,
        "week" => Duration::try_weeks(amount_i)?,
        "month" => return months(amount),
        "year" => return months(amount.checked_mul(12)?),
        _ => return None,
    };

    if forward {
        now.checked_add_signed(delta)
    } else {
        now.checked_sub_signed(delta)
    }
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// 没有年份时取离今天最近的那一年
fn calendar_date(year: Option<i32>, month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(year) = year {
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    [today.year(), today.year() + 1, today.year() - 1]
        .into_iter()
        .filter_map(|y| NaiveDate::from_ymd_opt(y, month, day))
        .min_by_key(|d| (*d - today).num_days().abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    /// 2025-06-02 是星期一
    fn reference() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn first(text: &str) -> DateMatch {
        EnglishDateParser::new()
            .parse(text, reference())
            .into_iter()
            .next()
            .unwrap_or_else(|| panic!("expected a date in {:?}", text))
    }

    #[test]
    fn test_no_dates() {
        let parser = EnglishDateParser::new();
        assert!(parser.parse("please review the quarterly report", reference()).is_empty());
        assert!(parser.parse("I may go later", reference()).is_empty());
        assert!(parser.parse("", reference()).is_empty());
    }

    #[test]
    fn test_relative_days() {
        assert_eq!(first("see you tomorrow").start.naive_local(), at(2025, 6, 3, 12, 0));
        assert_eq!(first("Today works").start.naive_local(), at(2025, 6, 2, 12, 0));
        assert_eq!(first("drinks tonight").start.naive_local(), at(2025, 6, 2, 20, 0));
        assert_eq!(first("it was yesterday").start.naive_local(), at(2025, 6, 1, 12, 0));
        let m = first("the day after tomorrow");
        assert_eq!(m.text, "day after tomorrow");
        assert_eq!(m.start.naive_local(), at(2025, 6, 4, 12, 0));
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(first("Friday").start.naive_local(), at(2025, 6, 6, 12, 0));
        assert_eq!(first("on monday").start.naive_local(), at(2025, 6, 2, 12, 0));
        assert_eq!(first("next Monday").start.naive_local(), at(2025, 6, 9, 12, 0));
        assert_eq!(first("next Wednesday").start.naive_local(), at(2025, 6, 4, 12, 0));
        assert_eq!(first("last Friday").start.naive_local(), at(2025, 5, 30, 12, 0));
        assert_eq!(first("next Monday").text, "next Monday");
    }

    #[test]
    fn test_relative_periods_and_offsets() {
        assert_eq!(first("next week").start.naive_local(), at(2025, 6, 9, 12, 0));
        assert_eq!(first("next month").start.naive_local(), at(2025, 7, 2, 12, 0));
        assert_eq!(first("in 3 days").start.naive_local(), at(2025, 6, 5, 10, 0));
        assert_eq!(first("in an hour").start.naive_local(), at(2025, 6, 2, 11, 0));
        assert_eq!(first("two weeks ago").start.naive_local(), at(2025, 5, 19, 10, 0));
    }

    #[test]
    fn test_calendar_dates() {
        assert_eq!(first("March 5, 2026").start.naive_local(), at(2026, 3, 5, 12, 0));
        assert_eq!(first("on Jun 10th").start.naive_local(), at(2025, 6, 10, 12, 0));
        assert_eq!(first("the 5th of July").start.naive_local(), at(2025, 7, 5, 12, 0));
        assert_eq!(first("due 2025-12-24").start.naive_local(), at(2025, 12, 24, 12, 0));
        assert_eq!(first("due 7/4/2026").start.naive_local(), at(2026, 7, 4, 12, 0));
        assert_eq!(first("due 7/4").start.naive_local(), at(2025, 7, 4, 12, 0));
    }

    #[test]
    fn test_year_closest_to_reference() {
        // 可能落在过去："Dec 28" 离 2024-12-28 比 2025-12-28 更近
        assert_eq!(first("Dec 28").start.naive_local(), at(2024, 12, 28, 12, 0));
        assert_eq!(first("Jan 3").start.naive_local(), at(2025, 1, 3, 12, 0));
        assert_eq!(first("May 20").start.naive_local(), at(2025, 5, 20, 12, 0));
    }

    #[test]
    fn test_invalid_dates_ignored() {
        let parser = EnglishDateParser::new();
        assert!(parser.parse("February 30", reference()).is_empty());
        assert!(parser.parse("open 24/7", reference()).is_empty());
        assert!(parser.parse("13pm", reference()).is_empty());
    }

    #[test]
    fn test_times() {
        assert_eq!(first("3pm").start.naive_local(), at(2025, 6, 2, 15, 0));
        assert_eq!(first("3:30 PM").start.naive_local(), at(2025, 6, 2, 15, 30));
        assert_eq!(first("12am").start.naive_local(), at(2025, 6, 2, 0, 0));
        assert_eq!(first("at 15:45").start.naive_local(), at(2025, 6, 2, 15, 45));
        assert_eq!(first("meet at 9").start.naive_local(), at(2025, 6, 2, 9, 0));
        assert_eq!(first("at noon").start.naive_local(), at(2025, 6, 2, 12, 0));
        assert_eq!(first("midnight").start.naive_local(), at(2025, 6, 2, 0, 0));
    }

    #[test]
    fn test_date_and_time_merge() {
        let m = first("Let's meet tomorrow at 3pm");
        assert_eq!(m.text, "tomorrow at 3pm");
        assert_eq!(m.index, 11);
        assert_eq!(m.start.naive_local(), at(2025, 6, 3, 15, 0));

        let m = first("call at 10am on Friday");
        assert_eq!(m.text, "at 10am on Friday");
        assert_eq!(m.start.naive_local(), at(2025, 6, 6, 10, 0));

        let m = first("Friday, March 6, 2026 at 9:15 am");
        assert_eq!(m.text, "Friday, March 6, 2026 at 9:15 am");
        assert_eq!(m.start.naive_local(), at(2026, 3, 6, 9, 15));
    }

    #[test]
    fn test_multiple_matches_in_order() {
        let matches = EnglishDateParser::new().parse("Monday or Thursday", reference());
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text, "Monday");
        assert_eq!(matches[1].text, "Thursday");
    }

    #[test]
    fn test_at_hour_does_not_swallow_slash_date() {
        let m = first("at 3/5");
        assert_eq!(m.text, "3/5");
    }

    #[test]
    fn test_spring_forward_gap_rolls_forward() {
        // 2025-03-09 02:00-03:00 在 America/New_York 中不存在
        let gap_start = at(2025, 3, 9, 2, 0);
        let gap_end = at(2025, 3, 9, 3, 0);
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let lookup = |n: &NaiveDateTime| {
            if *n >= gap_start && *n < gap_end {
                LocalResult::None
            } else {
                eastern.from_local_datetime(n)
            }
        };

        let resolved = resolve_local(at(2025, 3, 9, 2, 30), lookup).unwrap();
        assert_eq!(resolved.naive_local(), at(2025, 3, 9, 3, 30));

        let untouched = resolve_local(at(2025, 3, 9, 1, 30), lookup).unwrap();
        assert_eq!(untouched.naive_local(), at(2025, 3, 9, 1, 30));
    }

    #[test]
    fn test_ambiguous_time_takes_earliest() {
        let first_offset = FixedOffset::west_opt(4 * 3600).unwrap();
        let second_offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let naive = at(2025, 11, 2, 1, 30);
        let resolved = resolve_local(naive, |n| {
            match (
                first_offset.from_local_datetime(n).single(),
                second_offset.from_local_datetime(n).single(),
            ) {
                (Some(a), Some(b)) => LocalResult::Ambiguous(a, b),
                _ => LocalResult::None,
            }
        })
        .unwrap();
        assert_eq!(resolved, first_offset.from_local_datetime(&naive).unwrap());
    }
}
