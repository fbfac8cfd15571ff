use thiserror::Error;

/// 自定义错误类型
///
/// 事件回调内部没有错误路径，只有构造阶段（模式编译、读取配置）会失败。
#[derive(Error, Debug)]
pub enum WrapLocaleError {
    #[error("Invalid locale pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// 去掉标识符开头的 `<locale>-` 前缀
///
/// 只在开头匹配一次，不匹配时返回 `None`。
pub fn strip_locale_prefix<'a>(identifier: &'a str, locale: &str) -> Option<&'a str> {
    identifier
        .strip_prefix(locale)
        .and_then(|rest| rest.strip_prefix('-'))
}

/// 检查标识符是否已经带有 `<locale>-` 前缀
pub fn has_locale_prefix(identifier: &str, locale: &str) -> bool {
    strip_locale_prefix(identifier, locale).is_some()
}
