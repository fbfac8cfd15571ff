/// 字段拆分
///
/// 适配器保存前，从带语言前缀的标识符中拆出语言字段和路径字段，写入负载对象。
use serde_json::{Map, Value};
use tracing::debug;

use crate::host::SaveArgs;
use crate::options::WrapLocaleOptions;
use crate::pattern::LocalePattern;
use crate::utils::strip_locale_prefix;

/// 记录负载对象
pub type Payload = Map<String, Value>;

/// 位置参数中标识符的下标
pub const IDENTIFIER_POSITION: usize = 2;
/// 位置参数中负载对象的下标
pub const PAYLOAD_POSITION: usize = 3;

/// 适配器保存事件（具名参数）
#[derive(Debug)]
pub struct SaveEvent<'a> {
    /// 原始标识符
    pub identifier: &'a str,
    /// 可变负载对象
    pub payload: &'a mut Payload,
}

impl<'a> SaveEvent<'a> {
    pub fn new(identifier: &'a str, payload: &'a mut Payload) -> Self {
        Self { identifier, payload }
    }

    /// 从位置参数列表构造
    ///
    /// # 返回
    /// - 参数少于 4 个、标识符不是字符串或负载不是对象时返回 `None`
    pub fn from_args(args: &'a mut SaveArgs) -> Option<Self> {
        if args.len() <= PAYLOAD_POSITION {
            debug!(len = args.len(), "missing argument");
            return None;
        }

        let (head, tail) = args.split_at_mut(PAYLOAD_POSITION);
        let Some(identifier) = head[IDENTIFIER_POSITION].as_str() else {
            debug!(identifier = ?head[IDENTIFIER_POSITION], "identifier is not a string");
            return None;
        };
        let Some(payload) = tail[0].as_object_mut() else {
            debug!("payload is not an object");
            return None;
        };

        Some(Self::new(identifier, payload))
    }
}

/// 拆分语言字段
///
/// 标识符开头匹配到语言代码时：
/// - `payload[options.locale] = locale`
/// - `payload[options.path] = 去掉 "<locale>-" 前缀后的标识符`
///
/// 不匹配时负载保持不变。
///
/// # 返回
/// 匹配到的语言代码
///
/// # 示例
/// ```
/// use wrap_locale::{split_locale_fields, LocalePattern, Payload, SaveEvent, WrapLocaleOptions};
///
/// let options = WrapLocaleOptions::default();
/// let pattern = LocalePattern::default();
/// let mut payload = Payload::new();
///
/// split_locale_fields(&pattern, &options, SaveEvent::new("de-ch-home", &mut payload));
/// assert_eq!(payload["locale"], "de-ch");
/// assert_eq!(payload["path"], "home");
/// ```
pub fn split_locale_fields(
    pattern: &LocalePattern,
    options: &WrapLocaleOptions,
    event: SaveEvent<'_>,
) -> Option<String> {
    let SaveEvent { identifier, payload } = event;

    let locale = pattern.match_leading_locale(identifier)?;
    let path = strip_locale_prefix(identifier, locale).unwrap_or(identifier);

    payload.insert(options.locale.clone(), Value::String(locale.to_string()));
    payload.insert(options.path.clone(), Value::String(path.to_string()));

    Some(locale.to_string())
}

/// 适配器保存回调：解析位置参数后拆分字段
pub(crate) fn split_save_args(pattern: &LocalePattern, options: &WrapLocaleOptions, args: &mut SaveArgs) {
    let Some(event) = SaveEvent::from_args(args) else {
        return;
    };

    let identifier = event.identifier.to_string();
    let locale = split_locale_fields(pattern, options, event);
    debug!(id = %identifier, locale = ?locale, "adapter pre-save");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn split(identifier: &str) -> Payload {
        let mut payload = Payload::new();
        split_locale_fields(
            &LocalePattern::default(),
            &WrapLocaleOptions::default(),
            SaveEvent::new(identifier, &mut payload),
        );
        payload
    }

    #[test]
    fn test_split_locale_and_path() {
        let payload = split("de-ch-home");
        assert_eq!(payload.get("locale"), Some(&json!("de-ch")));
        assert_eq!(payload.get("path"), Some(&json!("home")));

        let payload = split("fr-x-contact");
        assert_eq!(payload.get("locale"), Some(&json!("fr")));
        assert_eq!(payload.get("path"), Some(&json!("x-contact")));
    }

    #[test]
    fn test_no_match_leaves_payload_untouched() {
        let payload = split("-home");
        assert!(payload.is_empty());

        let payload = split("1234");
        assert!(payload.is_empty());
    }

    #[test]
    fn test_captured_prefix_without_hyphen() {
        // 捕获到 "hom"，但后面不是连字符，路径保持原样
        let payload = split("home");
        assert_eq!(payload.get("locale"), Some(&json!("hom")));
        assert_eq!(payload.get("path"), Some(&json!("home")));
    }

    #[test]
    fn test_custom_field_names() {
        let options = WrapLocaleOptions::default()
            .with_locale_field("lang")
            .with_path_field("slug");
        let mut payload = Payload::new();
        payload.insert("title".to_string(), json!("Startseite"));

        split_locale_fields(
            &LocalePattern::default(),
            &options,
            SaveEvent::new("de-ch-home", &mut payload),
        );

        assert_eq!(payload.get("lang"), Some(&json!("de-ch")));
        assert_eq!(payload.get("slug"), Some(&json!("home")));
        assert_eq!(payload.get("title"), Some(&json!("Startseite")));
        assert!(payload.get("locale").is_none());
    }

    #[test]
    fn test_from_args() {
        let mut args: SaveArgs = vec![json!("pages"), json!("page"), json!("en-about"), json!({})];
        let event = SaveEvent::from_args(&mut args).unwrap();
        assert_eq!(event.identifier, "en-about");
        assert!(event.payload.is_empty());
    }

    #[test]
    fn test_from_args_missing_argument() {
        let mut args: SaveArgs = vec![json!("pages"), json!("page"), json!("en-about")];
        assert!(SaveEvent::from_args(&mut args).is_none());

        let mut args: SaveArgs = Vec::new();
        assert!(SaveEvent::from_args(&mut args).is_none());
    }

    #[test]
    fn test_from_args_wrong_types() {
        let mut args: SaveArgs = vec![json!(null), json!(null), json!(42), json!({})];
        assert!(SaveEvent::from_args(&mut args).is_none());

        let mut args: SaveArgs = vec![json!(null), json!(null), json!("en-about"), json!("text")];
        assert!(SaveEvent::from_args(&mut args).is_none());
    }

    #[test]
    fn test_split_save_args() {
        let options = WrapLocaleOptions::default();
        let pattern = LocalePattern::default();
        let mut args: SaveArgs = vec![json!("pages"), json!("page"), json!("de-ch-home"), json!({})];

        split_save_args(&pattern, &options, &mut args);
        assert_eq!(args[3], json!({"locale": "de-ch", "path": "home"}));

        let mut short: SaveArgs = vec![json!("de-ch-home")];
        split_save_args(&pattern, &options, &mut short);
        assert_eq!(short, vec![json!("de-ch-home")]);
    }
}
