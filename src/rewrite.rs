/// 标识符改写
///
/// 容器加载/保存前，给记录标识符加上当前语言前缀。
use std::borrow::Cow;

use tracing::debug;

use crate::host::{Identified, Lifecycle};
use crate::state::SharedLocale;
use crate::utils::has_locale_prefix;

/// 计算带语言前缀的标识符
///
/// - 语言为空或未设置：原样返回
/// - 已以 `<locale>-` 开头：原样返回（幂等）
/// - 否则返回 `<locale>-<identifier>`
///
/// # 示例
/// ```
/// use wrap_locale::prefix_identifier;
///
/// assert_eq!(prefix_identifier("home", Some("de-ch")), "de-ch-home");
/// assert_eq!(prefix_identifier("de-ch-home", Some("de-ch")), "de-ch-home");
/// assert_eq!(prefix_identifier("home", None), "home");
/// ```
pub fn prefix_identifier<'a>(identifier: &'a str, locale: Option<&str>) -> Cow<'a, str> {
    match locale {
        Some(locale) if !locale.is_empty() && !has_locale_prefix(identifier, locale) => {
            Cow::Owned(format!("{}-{}", locale, identifier))
        }
        _ => Cow::Borrowed(identifier),
    }
}

/// 容器生命周期回调：按当前语言改写容器标识符
///
/// `PreLoad` 与 `PreSave` 使用同一逻辑，但分别注册。
pub(crate) fn rewrite_container_id<T>(event: Lifecycle, locale: &SharedLocale, target: &mut T)
where
    T: Identified + ?Sized,
{
    let current = locale.active();
    debug!(?event, id = target.id(), locale = ?current, "container lifecycle");

    let Some(current) = current else {
        return;
    };

    let prefixed = match prefix_identifier(target.id(), Some(current.as_str())) {
        Cow::Owned(prefixed) => prefixed,
        Cow::Borrowed(_) => return,
    };
    target.set_id(prefixed);
}
