/// 当前语言状态
///
/// 单线程共享：外观持有一份，所有容器和适配器回调持有同一份的句柄，
/// 每次事件触发时重新读取，不缓存值。
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// 外观上的当前语言
#[derive(Debug, Clone, Default)]
pub struct SharedLocale {
    inner: Rc<RefCell<Option<String>>>,
}

impl SharedLocale {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取当前语言，从未设置时返回 `None`
    pub fn get(&self) -> Option<String> {
        self.inner.borrow().clone()
    }

    /// 读取非空的当前语言
    ///
    /// 空字符串与未设置同等对待。
    pub fn active(&self) -> Option<String> {
        self.get().filter(|locale| !locale.is_empty())
    }

    pub fn set(&self, locale: &str) {
        *self.inner.borrow_mut() = Some(locale.to_string());
    }

    /// 检查两个句柄是否指向同一份状态
    pub fn ptr_eq(&self, other: &SharedLocale) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// 处理器挂载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attachment {
    #[default]
    Unattached,
    Attached,
}

/// 共享的挂载状态（外观的 `PreLoad` 监听器与外观本身共用）
#[derive(Debug, Clone, Default)]
pub struct AttachmentState {
    inner: Rc<Cell<Attachment>>,
}

impl AttachmentState {
    pub fn get(&self) -> Attachment {
        self.inner.get()
    }

    /// 切换到 `Attached`
    ///
    /// # 返回
    /// 本次调用完成了切换时返回 `true`，已经挂载过则返回 `false`
    pub fn attach(&self) -> bool {
        self.inner.replace(Attachment::Attached) == Attachment::Unattached
    }
}
