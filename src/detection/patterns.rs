//! 检测用的预编译正则

use regex::Regex;
use std::sync::LazyLock;

/// http(s):// 后跟非空白字符
pub static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("url regex"));

/// 门牌号（1-5 位）+ 街道类型关键字
///
/// 德语 / 荷兰语的街道词常作为复合词后缀出现（Hauptstraße、Kalverstraat），
/// 因此这些关键字不要求前置词边界。
/// 门牌号前后都要求词边界，"123456 Main Street" 这类超过 5 位的数字不算地址，这是有意的严格匹配。
pub static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b\d{1,5}[,\s]+[\w\s]+",
        r"(?:",
        r"\b(?:street|st|avenue|ave|road|rd|boulevard|blvd|drive|dr|lane|ln|way|court|ct|place|pl",
        r"|calle|avenida|avda|paseo|plaza|rue|via|piazza|corso|viale|largo",
        r"|rua|praça|travessa|alameda)\b",
        r"|(?:straße|strasse|str|gasse|platz|weg|straat|laan|plein)\b",
        r"|\bc/",
        r")",
    ))
    .expect("address regex")
});

/// "at/in <地点>"，直到下一个时间关键字或文本结尾
pub static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:at|in)\s+(?:the\s+)?([^,.\n]+?)",
        r"(?:\s+(?:at|on|tomorrow|today|next|this|\d{1,2}(?::\d{2})?\s*(?:am|pm)?)|$)",
    ))
    .expect("location regex")
});
