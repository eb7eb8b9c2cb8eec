//! 网页搜索 / Wikipedia 链接

use crate::config::SearchEngine;
use anyhow::Result;
use reqwest::Url;

const WIKIPEDIA_SEARCH_URL: &str = "https://en.wikipedia.org/wiki/Special:Search";

/// 用指定搜索引擎搜索
pub fn web_search_url(engine: SearchEngine, query: &str) -> Result<Url> {
    Ok(Url::parse_with_params(engine.search_url(), &[("q", query)])?)
}

/// 英文 Wikipedia 搜索
pub fn wikipedia_url(query: &str) -> Result<Url> {
    Ok(Url::parse_with_params(WIKIPEDIA_SEARCH_URL, &[("search", query)])?)
}
