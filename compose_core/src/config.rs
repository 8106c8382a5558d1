//! `config`：grid 的构造参数（可从 TOML 读取）。

use serde::Deserialize;
use thiserror::Error;

/// 默认最大跨度：单个单元最多覆盖多少个读音键。
pub const DEFAULT_MAX_SPAN_LENGTH: usize = 6;
/// 允许配置的最大跨度上限。
pub const MAX_SPAN_LENGTH_LIMIT: usize = 16;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML 解析失败: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("max_span_length = {value} 超出范围 [{min}, {max}]")]
    InvalidMaxSpanLength { value: usize, min: usize, max: usize },

    #[error("separator 不能包含换行符")]
    SeparatorContainsNewline,
}

/// grid 配置。
///
/// ```toml
/// max_span_length = 6
/// separator = "-"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// 单元最大跨度；限制每次重建的窗口代价
    pub max_span_length: usize,
    /// `Unit::joined_key` 使用的分隔符
    pub separator: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            max_span_length: DEFAULT_MAX_SPAN_LENGTH,
            separator: String::new(),
        }
    }
}

impl GridConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SPAN_LENGTH_LIMIT).contains(&self.max_span_length) {
            return Err(ConfigError::InvalidMaxSpanLength {
                value: self.max_span_length,
                min: 1,
                max: MAX_SPAN_LENGTH_LIMIT,
            });
        }
        check_separator(&self.separator)
    }

    pub fn with_max_span_length(mut self, n: usize) -> Self {
        self.max_span_length = n;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

/// 分隔符只用于拼接读音键展示，不允许换行。
pub(crate) fn check_separator(separator: &str) -> Result<(), ConfigError> {
    if separator.contains(['\n', '\r']) {
        return Err(ConfigError::SeparatorContainsNewline);
    }
    Ok(())
}
