//! 各动作使用的 prompt 模板

/// 2-3 句摘要
pub fn summarize(text: &str) -> String {
    format!(
        "Summarize the following text in 2-3 concise sentences. Only output the summary, nothing else.\n\n\
         Text:\n{}\n\nSummary:",
        text
    )
}

/// 翻译到指定语言
pub fn translate(text: &str, target_language: &str) -> String {
    format!(
        "Translate the following text to {}. Only output the translation, nothing else.\n\n\
         Text:\n{}\n\nTranslation:",
        target_language, text
    )
}

/// 单词释义
pub fn define(word: &str) -> String {
    format!(
        "Define \"{}\" concisely. Include:\n\
         1. Part of speech\n\
         2. Definition (1-2 sentences)\n\
         3. Example sentence\n\n\
         Keep it brief and clear.",
        word
    )
}

/// 概念解释（150 词以内）
pub fn explain(text: &str) -> String {
    format!(
        "Explain \"{}\" concisely in under 150 words. Include:\n\
         1. What it means or refers to\n\
         2. Why it's important or how it's used\n\
         3. A brief example if helpful\n\n\
         Keep it clear and easy to understand.",
        text
    )
}

/// 用户自定义指令
pub fn custom(text: &str, instruction: &str) -> String {
    format!("{}\n\nText:\n{}\n\nOutput:", instruction, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_prompt() {
        let prompt = translate("hola", "English");
        assert!(prompt.starts_with("Translate the following text to English."));
        assert!(prompt.contains("Text:\nhola\n\nTranslation:"));
    }

    #[test]
    fn test_summarize_prompt_ends_with_marker() {
        assert!(summarize("long text").ends_with("Text:\nlong text\n\nSummary:"));
    }

    #[test]
    fn test_define_quotes_word() {
        let prompt = define("ephemeral");
        assert!(prompt.starts_with("Define \"ephemeral\" concisely."));
        assert!(prompt.contains("1. Part of speech\n2. Definition"));
    }

    #[test]
    fn test_custom_prompt_layout() {
        assert_eq!(
            custom("some text", "Rewrite formally"),
            "Rewrite formally\n\nText:\nsome text\n\nOutput:"
        );
    }
}
