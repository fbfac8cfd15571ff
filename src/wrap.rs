/// 带语言感知的外观
///
/// 在宿主外观上增加 `set_locale` / `locale` / `get_locale`，
/// 并在外观第一次 `PreLoad` 时给当时已注册的容器和适配器挂载处理器。
use std::rc::Rc;

use tracing::debug;

use crate::host::{Containers, Controller, Identified, Lifecycle, LocaleSettable, SaveArgs, Wrap};
use crate::options::WrapLocaleOptions;
use crate::pattern::LocalePattern;
use crate::rewrite::rewrite_container_id;
use crate::split::split_save_args;
use crate::state::{Attachment, AttachmentState, SharedLocale};
use crate::utils::WrapLocaleError;

/// 语言感知外观
///
/// # 示例
/// ```
/// use wrap_locale::memory::{MemoryAdapter, MemoryContainer, MemoryWrap};
/// use wrap_locale::{LocalizedWrap, Payload, WrapLocaleOptions};
///
/// let wrap = MemoryWrap::new()
///     .with_container(MemoryContainer::new("home").with_adapter(MemoryAdapter::new("pages", "page")));
/// let mut wrap = LocalizedWrap::new(wrap, WrapLocaleOptions::default())?;
///
/// wrap.set_locale(Some("de-ch"));
/// wrap.inner_mut().load();
/// wrap.inner_mut().save(&Payload::new());
///
/// let record = wrap.inner().container(0).unwrap().adapter().unwrap().record("de-ch-home").unwrap();
/// assert_eq!(record["locale"], "de-ch");
/// assert_eq!(record["path"], "home");
/// # Ok::<(), wrap_locale::WrapLocaleError>(())
/// ```
#[derive(Debug)]
pub struct LocalizedWrap<W: Wrap> {
    wrap: W,
    options: Rc<WrapLocaleOptions>,
    pattern: Rc<LocalePattern>,
    locale: SharedLocale,
    attachment: AttachmentState,
}

impl<W: Wrap> LocalizedWrap<W> {
    /// 给外观安装语言插件
    ///
    /// # 参数
    /// * `wrap` - 宿主外观
    /// * `options` - 插件配置
    ///
    /// # 错误
    /// 语言代码模式非法时返回 `WrapLocaleError::InvalidPattern`
    pub fn new(mut wrap: W, options: WrapLocaleOptions) -> Result<Self, WrapLocaleError> {
        let pattern = Rc::new(options.compile_pattern()?);
        let options = Rc::new(options);
        let locale = SharedLocale::new();
        let attachment = AttachmentState::default();

        // 容器在插件安装时可能还不存在，所以推迟到外观第一次加载时挂载
        {
            let options = Rc::clone(&options);
            let pattern = Rc::clone(&pattern);
            let locale = locale.clone();
            let attachment = attachment.clone();
            wrap.on(
                Lifecycle::PreLoad,
                Box::new(move |containers: &mut (dyn Containers + 'static)| {
                    if attachment.attach() {
                        attach_handlers(containers, &locale, &pattern, &options);
                    }
                }),
            );
        }

        Ok(Self {
            wrap,
            options,
            pattern,
            locale,
            attachment,
        })
    }

    /// 设置当前语言（可链式调用）
    ///
    /// 同时按 flow 顺序调用每个支持语言设置的子控制器。`None` 时什么也不做。
    ///
    /// # 参数
    /// * `value` - 语言，例如 `de-CH`
    pub fn set_locale(&mut self, value: Option<&str>) -> &mut Self {
        debug!(locale = ?value, "wrap set locale");

        let Some(value) = value else {
            return self;
        };
        self.locale.set(value);

        let attribute = self.options.attribute.as_str();
        for (key, controller) in self.wrap.flow_mut() {
            let Some(settable) = controller.as_locale_settable() else {
                continue;
            };
            if settable.locale_attribute() != attribute {
                continue;
            }
            debug!(key, "wrap flow");
            settable.set_locale(value);
        }

        self
    }

    /// `set_locale` 的别名
    pub fn locale(&mut self, value: Option<&str>) -> &mut Self {
        self.set_locale(value)
    }

    /// 读取当前语言，例如 `en` 或 `en-GB`
    pub fn get_locale(&self) -> Option<String> {
        let locale = self.locale.get();
        debug!(locale = ?locale, "wrap get locale");
        locale
    }

    pub fn attachment(&self) -> Attachment {
        self.attachment.get()
    }

    pub fn options(&self) -> &WrapLocaleOptions {
        &self.options
    }

    pub fn pattern(&self) -> &LocalePattern {
        &self.pattern
    }

    pub fn inner(&self) -> &W {
        &self.wrap
    }

    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.wrap
    }

    /// 取回宿主外观
    ///
    /// 已注册的处理器仍然留在宿主上，并继续读取同一份语言状态。
    pub fn into_inner(self) -> W {
        self.wrap
    }
}

impl<W: Wrap> Controller for LocalizedWrap<W> {
    fn as_locale_settable(&mut self) -> Option<&mut dyn LocaleSettable> {
        Some(self as &mut dyn LocaleSettable)
    }
}

/// 嵌套在其他外观 flow 中时继续向下分发
impl<W: Wrap> LocaleSettable for LocalizedWrap<W> {
    fn locale_attribute(&self) -> &str {
        &self.options.attribute
    }

    fn set_locale(&mut self, locale: &str) {
        LocalizedWrap::set_locale(self, Some(locale));
    }
}

/// 给容器挂载标识符改写，给适配器挂载字段拆分
fn attach_handlers<C>(
    containers: &mut C,
    locale: &SharedLocale,
    pattern: &Rc<LocalePattern>,
    options: &Rc<WrapLocaleOptions>,
) where
    C: Containers + ?Sized,
{
    let containers = containers.containers_mut();
    debug!(count = containers.len(), "attach handlers");

    for container in containers {
        for event in [Lifecycle::PreLoad, Lifecycle::PreSave] {
            let locale = locale.clone();
            container.on(
                event,
                Box::new(move |target: &mut (dyn Identified + 'static)| {
                    rewrite_container_id(event, &locale, target);
                }),
            );
        }

        let Some(adapter) = container.adapter_mut() else {
            continue;
        };
        let pattern = Rc::clone(pattern);
        let options = Rc::clone(options);
        adapter.on_save(Box::new(move |args: &mut SaveArgs| {
            split_save_args(&pattern, &options, args);
        }));
    }
}
