//! # Plugin 模块
//!
//! 构建期一次性应用的可选扩展：注入控制 UI、订阅轮播事件。
//!
//! ## 契约
//!
//! 插件暴露名称、类型标签和 `apply`；`apply` 拿到 [`PluginContext`]
//! （根元素、解析后的配置、幻灯片数量、当前索引、指令队列），
//! 可以注入 DOM、注册事件监听，并通过指令队列驱动播放门面。
//! 默认注入到根元素下共享的插件层（`carousel-plugins`），
//! 声明 `contained() == false` 的插件直接挂在根元素上。
//!
//! 与过渡/特效不同，**显式配置的插件解析失败是硬错误**：
//! 配置里点名要一个不存在的插件说明是配置 bug，不做降级。

mod markers;
mod navigation;
mod playback;
mod registry;

pub use markers::{DOT_CLASS, DOTS_CLASS, DotMarkersPlugin};
pub use navigation::{ArrowNavigationPlugin, NAVIGATION_CLASS};
pub use playback::{ClassicPlaybackPlugin, PLAY_BUTTON_CLASS, PLAYBACK_CLASS};
pub use registry::PluginRegistry;

use serde::{Deserialize, Serialize};

use crate::command::CommandQueue;
use crate::dom::Element;
use crate::error::CarouselResult;
use crate::options::CarouselOptions;

/// 共享插件层的 class
pub const PLUGINS_LAYER_CLASS: &str = "carousel-plugins";

/// 插件类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginType {
    /// 播放控制（播放/停止按钮）
    Playback,
    /// 位置指示（圆点等）
    Markers,
    /// 前后导航（箭头）
    Navigation,
}

impl PluginType {
    /// 解析类型标签字符串
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "playback" => Some(Self::Playback),
            "markers" => Some(Self::Markers),
            "navigation" => Some(Self::Navigation),
            _ => None,
        }
    }
}

impl std::fmt::Display for PluginType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Playback => "playback",
            Self::Markers => "markers",
            Self::Navigation => "navigation",
        };
        write!(f, "{label}")
    }
}

/// 传给插件 `apply` 的上下文
pub struct PluginContext<'a> {
    /// 轮播根元素
    pub root: &'a Element,
    /// 解析后的轮播配置
    pub options: &'a CarouselOptions,
    /// 幻灯片数量
    pub slides_count: usize,
    /// 应用插件时的当前索引
    pub current_index: usize,
    /// 发往播放门面的指令队列
    pub commands: CommandQueue,
}

impl PluginContext<'_> {
    /// 共享插件层：根元素下的 `carousel-plugins` 容器，没有则创建
    pub fn plugins_layer(&self) -> Element {
        if let Some(layer) = self
            .root
            .children()
            .into_iter()
            .find(|child| child.has_class(PLUGINS_LAYER_CLASS))
        {
            return layer;
        }
        let layer = Element::with_class("div", PLUGINS_LAYER_CLASS);
        self.root.append_child(&layer);
        layer
    }
}

/// 插件契约
pub trait Plugin: std::fmt::Debug {
    /// 插件名称
    fn name(&self) -> &str;

    /// 插件类型标签
    fn plugin_type(&self) -> PluginType;

    /// 是否注入到共享插件层（false = 直接挂在根元素上）
    fn contained(&self) -> bool {
        true
    }

    /// 把插件应用到轮播上（构建期调用一次）
    fn apply(&mut self, ctx: &PluginContext<'_>) -> CarouselResult<()>;

    /// 移除插件注册的监听器（轮播销毁时调用）
    fn teardown(&mut self) {}
}
