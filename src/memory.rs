/// 内存宿主
///
/// 宿主契约的最小内存实现，供集成测试和命令行演示使用。
/// 不是存储系统：记录只保存在 `BTreeMap` 里。
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::host::{
    Adapter, Container, Containers, Controller, EventEmitter, Identified, Lifecycle, Listener,
    LocaleSettable, SaveArgs, Wrap,
};
use crate::options::DEFAULT_ATTRIBUTE;
use crate::split::{Payload, PAYLOAD_POSITION};

/// 内存适配器
///
/// 保存事件的位置参数为 `[place, kind, id, payload]`。
#[derive(Debug)]
pub struct MemoryAdapter {
    place: String,
    kind: String,
    records: BTreeMap<String, Value>,
    events: EventEmitter<SaveArgs>,
}

impl MemoryAdapter {
    pub fn new(place: &str, kind: &str) -> Self {
        Self {
            place: place.to_string(),
            kind: kind.to_string(),
            records: BTreeMap::new(),
            events: EventEmitter::new(),
        }
    }

    /// 保存记录
    ///
    /// 先触发 `PreSave`，监听器可以修改负载，再按标识符存储负载。
    pub fn save(&mut self, id: &str, payload: Payload) {
        let mut args: SaveArgs = vec![
            Value::String(self.place.clone()),
            Value::String(self.kind.clone()),
            Value::String(id.to_string()),
            Value::Object(payload),
        ];
        self.events.emit(Lifecycle::PreSave, &mut args);

        let record = args.into_iter().nth(PAYLOAD_POSITION).unwrap_or_default();
        self.records.insert(id.to_string(), record);
    }

    pub fn record(&self, id: &str) -> Option<&Value> {
        self.records.get(id)
    }

    pub fn records(&self) -> &BTreeMap<String, Value> {
        &self.records
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count(Lifecycle::PreSave)
    }
}

impl Adapter for MemoryAdapter {
    fn on_save(&mut self, listener: Listener<SaveArgs>) {
        self.events.on(Lifecycle::PreSave, listener);
    }
}

#[derive(Debug)]
struct IdSlot(String);

impl Identified for IdSlot {
    fn id(&self) -> &str {
        &self.0
    }

    fn set_id(&mut self, id: String) {
        self.0 = id;
    }
}

/// 内存容器
#[derive(Debug)]
pub struct MemoryContainer {
    slot: IdSlot,
    adapter: Option<MemoryAdapter>,
    events: EventEmitter<dyn Identified>,
}

impl MemoryContainer {
    pub fn new(id: &str) -> Self {
        Self {
            slot: IdSlot(id.to_string()),
            adapter: None,
            events: EventEmitter::new(),
        }
    }

    pub fn with_adapter(mut self, adapter: MemoryAdapter) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// 加载记录
    ///
    /// 先触发 `PreLoad`，再用（可能已改写的）标识符从适配器读取。
    pub fn load(&mut self) -> Option<Value> {
        self.events.emit(Lifecycle::PreLoad, &mut self.slot);
        self.adapter.as_ref()?.record(&self.slot.0).cloned()
    }

    /// 保存记录
    pub fn save(&mut self, payload: Payload) {
        self.events.emit(Lifecycle::PreSave, &mut self.slot);
        if let Some(adapter) = self.adapter.as_mut() {
            adapter.save(&self.slot.0, payload);
        }
    }

    pub fn adapter(&self) -> Option<&MemoryAdapter> {
        self.adapter.as_ref()
    }

    pub fn listener_count(&self, event: Lifecycle) -> usize {
        self.events.listener_count(event)
    }
}

impl Identified for MemoryContainer {
    fn id(&self) -> &str {
        self.slot.id()
    }

    fn set_id(&mut self, id: String) {
        self.slot.set_id(id);
    }
}

impl Container for MemoryContainer {
    fn on(&mut self, event: Lifecycle, listener: Listener<dyn Identified>) {
        self.events.on(event, listener);
    }

    fn adapter_mut(&mut self) -> Option<&mut dyn Adapter> {
        self.adapter.as_mut().map(|adapter| adapter as &mut dyn Adapter)
    }
}

impl Containers for Vec<MemoryContainer> {
    fn containers_mut(&mut self) -> Vec<&mut dyn Container> {
        self.iter_mut()
            .map(|container| container as &mut dyn Container)
            .collect()
    }
}

/// 内存子控制器
///
/// 记录收到的每一次语言设置，便于检查分发结果。
#[derive(Debug, Clone, Default)]
pub struct MemoryController {
    attribute: Option<String>,
    received: Rc<RefCell<Vec<String>>>,
}

impl MemoryController {
    /// 不支持语言设置的控制器
    pub fn plain() -> Self {
        Self::default()
    }

    /// 支持默认语言设置操作的控制器
    pub fn localized() -> Self {
        Self::with_attribute(DEFAULT_ATTRIBUTE)
    }

    pub fn with_attribute(attribute: &str) -> Self {
        Self {
            attribute: Some(attribute.to_string()),
            received: Rc::default(),
        }
    }

    /// 收到的语言（与所有克隆共享）
    pub fn received(&self) -> Vec<String> {
        self.received.borrow().clone()
    }
}

impl Controller for MemoryController {
    fn as_locale_settable(&mut self) -> Option<&mut dyn LocaleSettable> {
        if self.attribute.is_some() {
            Some(self as &mut dyn LocaleSettable)
        } else {
            None
        }
    }
}

impl LocaleSettable for MemoryController {
    fn locale_attribute(&self) -> &str {
        self.attribute.as_deref().unwrap_or(DEFAULT_ATTRIBUTE)
    }

    fn set_locale(&mut self, locale: &str) {
        self.received.borrow_mut().push(locale.to_string());
    }
}

/// 内存外观
#[derive(Default)]
pub struct MemoryWrap {
    flow: Vec<(String, Box<dyn Controller>)>,
    containers: Vec<MemoryContainer>,
    events: EventEmitter<dyn Containers>,
}

impl MemoryWrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_controller(mut self, key: &str, controller: impl Controller + 'static) -> Self {
        self.flow.push((key.to_string(), Box::new(controller)));
        self
    }

    pub fn with_container(mut self, container: MemoryContainer) -> Self {
        self.add_container(container);
        self
    }

    /// 注册容器
    ///
    /// 处理器挂载之后注册的容器不会被挂载。
    pub fn add_container(&mut self, container: MemoryContainer) {
        self.containers.push(container);
    }

    pub fn container(&self, index: usize) -> Option<&MemoryContainer> {
        self.containers.get(index)
    }

    /// 加载所有容器
    ///
    /// 先触发外观的 `PreLoad`，再依次加载每个容器。
    pub fn load(&mut self) -> Vec<Option<Value>> {
        self.events.emit(Lifecycle::PreLoad, &mut self.containers);
        self.containers.iter_mut().map(MemoryContainer::load).collect()
    }

    /// 用同一份负载保存所有容器
    pub fn save(&mut self, payload: &Payload) {
        for container in self.containers.iter_mut() {
            container.save(payload.clone());
        }
    }

    pub fn listener_count(&self, event: Lifecycle) -> usize {
        self.events.listener_count(event)
    }
}

impl std::fmt::Debug for MemoryWrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.flow.iter().map(|(key, _)| key.as_str()).collect();
        f.debug_struct("MemoryWrap")
            .field("flow", &keys)
            .field("containers", &self.containers)
            .field("events", &self.events)
            .finish()
    }
}

impl Wrap for MemoryWrap {
    fn flow_mut(&mut self) -> Vec<(&str, &mut dyn Controller)> {
        let mut flow: Vec<(&str, &mut dyn Controller)> = Vec::with_capacity(self.flow.len());
        for (key, controller) in self.flow.iter_mut() {
            flow.push((key.as_str(), controller.as_mut()));
        }
        flow
    }

    fn on(&mut self, event: Lifecycle, listener: Listener<dyn Containers>) {
        self.events.on(event, listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_adapter_save_and_record() {
        let mut adapter = MemoryAdapter::new("pages", "page");
        let mut payload = Payload::new();
        payload.insert("title".to_string(), json!("Home"));

        adapter.save("home", payload);
        assert_eq!(adapter.record("home"), Some(&json!({"title": "Home"})));
        assert_eq!(adapter.records().len(), 1);
    }

    #[test]
    fn test_adapter_save_args_layout() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut adapter = MemoryAdapter::new("pages", "page");
        {
            let seen = Rc::clone(&seen);
            adapter.on_save(Box::new(move |args: &mut SaveArgs| {
                seen.borrow_mut().extend(args.iter().cloned());
            }));
        }

        adapter.save("home", Payload::new());
        assert_eq!(*seen.borrow(), vec![json!("pages"), json!("page"), json!("home"), json!({})]);
        assert_eq!(adapter.listener_count(), 1);
    }

    #[test]
    fn test_container_load_without_adapter() {
        let mut container = MemoryContainer::new("home");
        assert!(container.load().is_none());
        assert!(container.adapter_mut().is_none());
    }

    #[test]
    fn test_container_listener_sees_id() {
        let mut container = MemoryContainer::new("home");
        container.on(
            Lifecycle::PreSave,
            Box::new(|target: &mut (dyn Identified + 'static)| {
                let id = format!("{}-v2", target.id());
                target.set_id(id);
            }),
        );

        container.save(Payload::new());
        assert_eq!(container.id(), "home-v2");
        assert_eq!(container.listener_count(Lifecycle::PreSave), 1);
        assert_eq!(container.listener_count(Lifecycle::PreLoad), 0);
    }

    #[test]
    fn test_controller_capability() {
        let mut plain = MemoryController::plain();
        assert!(plain.as_locale_settable().is_none());

        let mut localized = MemoryController::localized();
        let handle = localized.clone();
        localized.as_locale_settable().unwrap().set_locale("fr");
        assert_eq!(handle.received(), vec!["fr".to_string()]);
    }

    #[test]
    fn test_wrap_flow_order() {
        let mut wrap = MemoryWrap::new()
            .with_controller("a", MemoryController::plain())
            .with_controller("b", MemoryController::localized());

        let keys: Vec<String> = wrap.flow_mut().into_iter().map(|(key, _)| key.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}
