//! 系统交互：剪贴板读写与打开链接
//!
//! 动作执行器只依赖 [`Host`] trait，测试中用内存实现替换。

use anyhow::{anyhow, Result};
use tracing::debug;

/// 动作执行需要的系统能力
pub trait Host {
    /// 读取剪贴板文本，空内容视为 None
    fn read_text(&self) -> Option<String>;

    /// 写入剪贴板
    fn write_text(&self, text: &str) -> Result<()>;

    /// 用默认程序打开链接
    fn open_url(&self, url: &str) -> Result<()>;
}

/// 基于 arboard 与 open 的系统实现
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for SystemHost {
    fn read_text(&self) -> Option<String> {
        arboard::Clipboard::new()
            .ok()
            .and_then(|mut cb| cb.get_text().ok())
            .filter(|s| !s.trim().is_empty())
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| anyhow!("Cannot access clipboard: {}", e))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| anyhow!("Failed to copy to clipboard: {}", e))?;
        debug!(chars = text.chars().count(), "Copied to clipboard");
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<()> {
        debug!(url = %url, "Opening URL");
        open::that(url).map_err(|e| anyhow!("Failed to open {}: {}", url, e))
    }
}
