//! # Dom 模块
//!
//! 宿主环境的元素树模型。
//!
//! ## 设计说明
//!
//! 轮播核心假设宿主提供一棵"类 DOM"元素树（标签、class 列表、行内样式、
//! `data-*` 属性、子节点、冒泡事件）。本模块把这个平台服务显式化为一个
//! 保留模式（retained）的轻量元素树，使核心逻辑完全无头、可确定性测试：
//!
//! - [`Element`] 是 `Rc<RefCell<_>>` 句柄，克隆句柄共享同一节点；
//! - 父链接用 `Weak` 持有，不形成引用环；
//! - 事件沿父链冒泡，监听器注册返回 [`ListenerId`]，可显式移除
//!   （不依赖宿主 GC 做清理）；
//! - 事件负载 `detail` 为 `serde_json::Value`，与配置层共用同一套
//!   值模型。
//!
//! 真实浏览器宿主只需在边界处把 DOM 变更/事件与这棵树同步。

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use serde_json::Value;

/// 监听器句柄，用于显式移除
pub type ListenerId = u64;

/// 派发给监听器的事件
#[derive(Debug, Clone)]
pub struct DomEvent {
    /// 事件名
    pub name: String,
    /// 事件负载
    pub detail: Value,
    /// 最初派发事件的元素（冒泡过程中保持不变）
    pub target: Element,
}

/// 事件监听回调
pub type EventCallback = Rc<dyn Fn(&DomEvent)>;

struct Listener {
    id: ListenerId,
    event: String,
    callback: EventCallback,
}

struct ElementData {
    tag: String,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<Element>,
    parent: Weak<RefCell<ElementData>>,
    listeners: Vec<Listener>,
    next_listener_id: ListenerId,
}

/// 元素句柄
///
/// 克隆句柄共享同一个底层节点（等价于 JS 中传递元素引用）。
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<ElementData>>,
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.inner.borrow();
        f.debug_struct("Element")
            .field("tag", &data.tag)
            .field("classes", &data.classes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl Element {
    /// 创建新元素
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ElementData {
                tag: tag.into(),
                classes: Vec::new(),
                styles: BTreeMap::new(),
                attributes: BTreeMap::new(),
                text: String::new(),
                children: Vec::new(),
                parent: Weak::new(),
                listeners: Vec::new(),
                next_listener_id: 1,
            })),
        }
    }

    /// 创建元素并附带 class（构建测试夹具/插件 UI 时的便捷方法）
    pub fn with_class(tag: impl Into<String>, class: &str) -> Self {
        let element = Self::new(tag);
        element.add_class(class);
        element
    }

    /// 标签名
    pub fn tag(&self) -> String {
        self.inner.borrow().tag.clone()
    }

    // ========== class ==========

    /// 添加 class（已存在则不重复，保持首次出现顺序）
    pub fn add_class(&self, class: &str) {
        let mut data = self.inner.borrow_mut();
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
    }

    /// 移除 class
    pub fn remove_class(&self, class: &str) {
        self.inner.borrow_mut().classes.retain(|c| c != class);
    }

    /// 按条件添加/移除 class
    pub fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// 是否包含 class
    pub fn has_class(&self, class: &str) -> bool {
        self.inner.borrow().classes.iter().any(|c| c == class)
    }

    /// class 列表（按首次出现顺序）
    pub fn classes(&self) -> Vec<String> {
        self.inner.borrow().classes.clone()
    }

    /// 空格连接的 class 字符串
    pub fn class_string(&self) -> String {
        self.inner.borrow().classes.join(" ")
    }

    // ========== 行内样式 ==========

    /// 设置行内样式
    pub fn set_style(&self, property: &str, value: &str) {
        self.inner
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    /// 读取行内样式
    pub fn style(&self, property: &str) -> Option<String> {
        self.inner.borrow().styles.get(property).cloned()
    }

    /// 移除单项行内样式
    pub fn remove_style(&self, property: &str) {
        self.inner.borrow_mut().styles.remove(property);
    }

    /// 清空全部行内样式
    pub fn clear_styles(&self) {
        self.inner.borrow_mut().styles.clear();
    }

    // ========== 属性 ==========

    /// 设置属性
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// 读取属性
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.borrow().attributes.get(name).cloned()
    }

    /// 读取 `data-*` 属性（`data("effect")` 读取 `data-effect`）
    pub fn data(&self, key: &str) -> Option<String> {
        self.attribute(&format!("data-{key}"))
    }

    /// 设置 `data-*` 属性
    pub fn set_data(&self, key: &str, value: &str) {
        self.set_attribute(&format!("data-{key}"), value);
    }

    /// 所有 `data-*` 属性（键为去掉 `data-` 前缀后的名字）
    pub fn data_attributes(&self) -> BTreeMap<String, String> {
        self.inner
            .borrow()
            .attributes
            .iter()
            .filter_map(|(k, v)| {
                k.strip_prefix("data-")
                    .map(|key| (key.to_string(), v.clone()))
            })
            .collect()
    }

    // ========== 文本 ==========

    /// 设置文本内容
    pub fn set_text(&self, text: impl Into<String>) {
        self.inner.borrow_mut().text = text.into();
    }

    /// 文本内容
    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    // ========== 树结构 ==========

    /// 追加子元素
    pub fn append_child(&self, child: &Element) {
        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child.clone());
    }

    /// 原位替换子元素，返回是否找到了被替换的节点
    pub fn replace_child(&self, new: &Element, old: &Element) -> bool {
        let mut data = self.inner.borrow_mut();
        let Some(pos) = data.children.iter().position(|c| c == old) else {
            return false;
        };
        old.inner.borrow_mut().parent = Weak::new();
        new.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        data.children[pos] = new.clone();
        true
    }

    /// 子元素句柄列表
    pub fn children(&self) -> Vec<Element> {
        self.inner.borrow().children.clone()
    }

    /// 父元素
    pub fn parent(&self) -> Option<Element> {
        self.inner
            .borrow()
            .parent
            .upgrade()
            .map(|inner| Element { inner })
    }

    /// 深度优先收集满足条件的后代（不含自身）
    pub fn descendants(&self, predicate: &dyn Fn(&Element) -> bool) -> Vec<Element> {
        let mut found = Vec::new();
        for child in self.children() {
            if predicate(&child) {
                found.push(child.clone());
            }
            found.extend(child.descendants(predicate));
        }
        found
    }

    /// 自身或最近的携带指定 class 的祖先
    pub fn closest(&self, class: &str) -> Option<Element> {
        let mut node = Some(self.clone());
        while let Some(current) = node {
            if current.has_class(class) {
                return Some(current);
            }
            node = current.parent();
        }
        None
    }

    /// 在子树内（含自身）查找第一个匹配选择器的元素
    ///
    /// 支持的选择器形式：`#id`、`.class`、`tag`。
    pub fn query_selector(&self, selector: &str) -> Option<Element> {
        let matches: Box<dyn Fn(&Element) -> bool> = if let Some(id) = selector.strip_prefix('#') {
            let id = id.to_string();
            Box::new(move |e: &Element| e.attribute("id").as_deref() == Some(id.as_str()))
        } else if let Some(class) = selector.strip_prefix('.') {
            let class = class.to_string();
            Box::new(move |e: &Element| e.has_class(&class))
        } else {
            let tag = selector.to_string();
            Box::new(move |e: &Element| e.tag() == tag)
        };

        if matches(self) {
            return Some(self.clone());
        }
        self.descendants(&matches).into_iter().next()
    }

    /// 结构/内容深拷贝
    ///
    /// 拷贝标签、class、样式、属性、文本和整棵子树；
    /// 不拷贝父链接和事件监听器（与 `innerHTML` 克隆语义一致）。
    pub fn deep_clone(&self) -> Element {
        let data = self.inner.borrow();
        let clone = Element::new(data.tag.clone());
        {
            let mut clone_data = clone.inner.borrow_mut();
            clone_data.classes = data.classes.clone();
            clone_data.styles = data.styles.clone();
            clone_data.attributes = data.attributes.clone();
            clone_data.text = data.text.clone();
        }
        for child in &data.children {
            clone.append_child(&child.deep_clone());
        }
        clone
    }

    // ========== 事件 ==========

    /// 注册事件监听器，返回可用于移除的 [`ListenerId`]
    pub fn add_listener(&self, event: &str, callback: impl Fn(&DomEvent) + 'static) -> ListenerId {
        let mut data = self.inner.borrow_mut();
        let id = data.next_listener_id;
        data.next_listener_id += 1;
        data.listeners.push(Listener {
            id,
            event: event.to_string(),
            callback: Rc::new(callback),
        });
        id
    }

    /// 移除监听器，返回是否存在
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut data = self.inner.borrow_mut();
        let before = data.listeners.len();
        data.listeners.retain(|l| l.id != id);
        data.listeners.len() != before
    }

    /// 派发冒泡事件：先触发自身监听器，再沿父链上传
    pub fn emit(&self, name: &str, detail: Value) {
        let event = DomEvent {
            name: name.to_string(),
            detail,
            target: self.clone(),
        };
        let mut node = Some(self.clone());
        while let Some(current) = node {
            current.dispatch(&event);
            node = current.parent();
        }
    }

    /// 触发点击（插件注入的按钮通过该入口接收用户输入）
    pub fn click(&self) {
        self.emit("click", Value::Null);
    }

    fn dispatch(&self, event: &DomEvent) {
        // 先收集回调再调用，避免回调内再借用节点时冲突
        let callbacks: Vec<EventCallback> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.event == event.name)
            .map(|l| l.callback.clone())
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }
}

/// 解析 `"800px"` / `"800"` 形式的样式长度值
pub fn parse_px(value: &str) -> Option<f32> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

/// 将元素置为可见（display/visibility + `active` 标记），幂等
pub fn show_element(element: &Element) {
    element.set_style("display", "block");
    element.set_style("visibility", "visible");
    element.add_class(crate::slide::ACTIVE_CLASS);
}

/// 将元素置为隐藏，幂等
pub fn hide_element(element: &Element) {
    element.set_style("display", "none");
    element.set_style("visibility", "hidden");
    element.remove_class(crate::slide::ACTIVE_CLASS);
}
