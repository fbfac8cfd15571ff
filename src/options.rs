/// 插件配置
///
/// 构造时确定，之后只读。所有字段都有默认值，JSON 中可以只写需要覆盖的字段。
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pattern::{LocalePattern, DEFAULT_LOCALE_PATTERN};
use crate::utils::WrapLocaleError;

/// 子控制器上语言设置操作的默认名称
pub const DEFAULT_ATTRIBUTE: &str = "locale";

/// 插件配置项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapLocaleOptions {
    /// 负载对象中语言字段的名称
    pub locale: String,
    /// 负载对象中路径字段的名称
    pub path: String,
    /// 语言代码匹配模式（含一个捕获组）
    pub pattern: String,
    /// 在子控制器上探测的语言设置操作名称
    pub attribute: String,
}

impl Default for WrapLocaleOptions {
    fn default() -> Self {
        Self {
            locale: "locale".to_string(),
            path: "path".to_string(),
            pattern: DEFAULT_LOCALE_PATTERN.to_string(),
            attribute: DEFAULT_ATTRIBUTE.to_string(),
        }
    }
}

impl WrapLocaleOptions {
    /// 从 JSON 字符串读取配置
    pub fn from_json_str(json: &str) -> Result<Self, WrapLocaleError> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从 JSON 文件读取配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    pub fn from_json_file(path: &Path) -> Result<Self, WrapLocaleError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn with_locale_field(mut self, name: impl Into<String>) -> Self {
        self.locale = name.into();
        self
    }

    pub fn with_path_field(mut self, name: impl Into<String>) -> Self {
        self.path = name.into();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// 编译语言代码模式
    ///
    /// # 错误
    /// 模式非法时返回 `WrapLocaleError::InvalidPattern`
    pub fn compile_pattern(&self) -> Result<LocalePattern, WrapLocaleError> {
        LocalePattern::new(&self.pattern)
    }
}
