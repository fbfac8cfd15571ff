use regex::Regex;

use crate::utils::WrapLocaleError;

/// 默认的语言代码模式
///
/// 1–3 个字母，可选跟随一个连字符和 2 位子标签，例如 `de`、`de-CH`、`gsw-ch`。
pub const DEFAULT_LOCALE_PATTERN: &str = r"([a-zA-Z]{1,3}(?:-(?:[a-zA-Z0-9]{2})){0,1})";

/// 已编译的语言代码匹配器
///
/// 模式在构造时编译一次，锚定在标识符开头并忽略大小写。
/// 第一个捕获组即语言代码。
#[derive(Debug, Clone)]
pub struct LocalePattern {
    source: String,
    regex: Regex,
}

impl LocalePattern {
    /// 编译语言代码模式
    ///
    /// # 参数
    /// * `pattern` - 含一个捕获组的正则表达式
    ///
    /// # 错误
    /// 模式无法编译时返回 `WrapLocaleError::InvalidPattern`
    pub fn new(pattern: &str) -> Result<Self, WrapLocaleError> {
        let regex = Regex::new(&format!("^(?i:{})", pattern))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// 原始模式字符串
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// 提取标识符开头的语言代码
    ///
    /// 捕获组不存在或为空时返回 `None`，从不失败。
    ///
    /// # 示例
    /// ```
    /// use wrap_locale::LocalePattern;
    ///
    /// let pattern = LocalePattern::default();
    /// assert_eq!(pattern.match_leading_locale("de-ch-home"), Some("de-ch"));
    /// assert_eq!(pattern.match_leading_locale("-home"), None);
    /// ```
    pub fn match_leading_locale<'a>(&self, identifier: &'a str) -> Option<&'a str> {
        self.regex
            .captures(identifier)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|locale| !locale.is_empty())
    }
}

impl Default for LocalePattern {
    fn default() -> Self {
        Self {
            source: DEFAULT_LOCALE_PATTERN.to_string(),
            regex: Regex::new(&format!("^(?i:{})", DEFAULT_LOCALE_PATTERN))
                .expect("default locale pattern is valid"),
        }
    }
}

/// 一次性匹配：编译模式后提取语言代码
///
/// 只有模式本身非法时才会返回错误。
pub fn match_leading_locale(pattern: &str, identifier: &str) -> Result<Option<String>, WrapLocaleError> {
    let pattern = LocalePattern::new(pattern)?;
    Ok(pattern.match_leading_locale(identifier).map(str::to_string))
}
