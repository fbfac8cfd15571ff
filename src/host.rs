/// 宿主契约 - trait 定义
///
/// 插件只依赖这些接口：外观（wrap）、容器、适配器以及它们的生命周期事件。
/// 具体的宿主实现不在本 crate 的职责之内，`memory` 模块只提供测试用的内存实现。
use serde_json::Value;

use crate::options::DEFAULT_ATTRIBUTE;

/// 生命周期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    PreLoad,
    PreSave,
}

/// 事件监听器
pub type Listener<T> = Box<dyn FnMut(&mut T)>;

/// 适配器保存事件的位置参数列表
///
/// 约定：下标 2 为标识符，下标 3 为负载对象。
pub type SaveArgs = Vec<Value>;

/// 生命周期事件分发器
///
/// 监听器按注册顺序调用，同一事件可以注册多个监听器。
pub struct EventEmitter<T: ?Sized> {
    listeners: Vec<(Lifecycle, Listener<T>)>,
}

impl<T: ?Sized> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// 注册监听器
    pub fn on(&mut self, event: Lifecycle, listener: Listener<T>) {
        self.listeners.push((event, listener));
    }

    /// 触发事件
    ///
    /// # 参数
    /// * `event` - 事件类型
    /// * `target` - 传给每个监听器的事件目标
    pub fn emit(&mut self, event: Lifecycle, target: &mut T) {
        for (kind, listener) in self.listeners.iter_mut() {
            if *kind == event {
                listener(&mut *target);
            }
        }
    }

    /// 某个事件已注册的监听器数量
    pub fn listener_count(&self, event: Lifecycle) -> usize {
        self.listeners.iter().filter(|(kind, _)| *kind == event).count()
    }
}

impl<T: ?Sized> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> std::fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("pre_load", &self.listener_count(Lifecycle::PreLoad))
            .field("pre_save", &self.listener_count(Lifecycle::PreSave))
            .finish()
    }
}

/// 带标识符的对象（容器的 id 读写）
pub trait Identified {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
}

/// 容器
///
/// # 职责
/// - 暴露记录标识符的读写
/// - 在加载/保存前触发 `PreLoad` / `PreSave`
/// - 可选地暴露底层适配器
pub trait Container: Identified {
    /// 注册容器生命周期监听器
    ///
    /// 监听器收到的目标就是容器自身的标识符槽。
    fn on(&mut self, event: Lifecycle, listener: Listener<dyn Identified>);

    /// 底层存储适配器，没有时返回 `None`
    fn adapter_mut(&mut self) -> Option<&mut dyn Adapter>;
}

/// 存储适配器
pub trait Adapter {
    /// 注册保存前监听器，监听器收到位置参数列表
    fn on_save(&mut self, listener: Listener<SaveArgs>);
}

/// 外观在 `PreLoad` 时可见的容器集合
pub trait Containers {
    fn containers_mut(&mut self) -> Vec<&mut dyn Container>;
}

/// 外观（wrap）
///
/// 组合多个容器，并持有一个有序的子控制器流（flow）。
pub trait Wrap {
    /// 按声明顺序返回子控制器
    fn flow_mut(&mut self) -> Vec<(&str, &mut dyn Controller)>;

    /// 注册外观生命周期监听器，监听器收到当前的容器集合
    fn on(&mut self, event: Lifecycle, listener: Listener<dyn Containers>);
}

/// 流中的子控制器
pub trait Controller {
    /// 支持语言设置时返回自身，默认不支持
    fn as_locale_settable(&mut self) -> Option<&mut dyn LocaleSettable> {
        None
    }
}

/// 支持语言设置的子控制器
pub trait LocaleSettable {
    /// 设置操作的名称，只有与配置的 `attribute` 一致才会被调用
    fn locale_attribute(&self) -> &str {
        DEFAULT_ATTRIBUTE
    }

    fn set_locale(&mut self, locale: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut emitter: EventEmitter<String> = EventEmitter::new();

        for name in ["first", "second"] {
            let calls = Rc::clone(&calls);
            emitter.on(
                Lifecycle::PreSave,
                Box::new(move |target: &mut String| {
                    calls.borrow_mut().push(name);
                    target.push_str(name);
                }),
            );
        }

        let mut target = String::new();
        emitter.emit(Lifecycle::PreSave, &mut target);

        assert_eq!(*calls.borrow(), vec!["first", "second"]);
        assert_eq!(target, "firstsecond");
    }

    #[test]
    fn test_emit_filters_by_event() {
        let mut emitter: EventEmitter<u32> = EventEmitter::new();
        emitter.on(Lifecycle::PreLoad, Box::new(|n: &mut u32| *n += 1));
        emitter.on(Lifecycle::PreSave, Box::new(|n: &mut u32| *n += 10));

        let mut n = 0;
        emitter.emit(Lifecycle::PreLoad, &mut n);
        assert_eq!(n, 1);

        assert_eq!(emitter.listener_count(Lifecycle::PreLoad), 1);
        assert_eq!(emitter.listener_count(Lifecycle::PreSave), 1);
    }
}
