//! # 事件名称
//!
//! 轮播对外派发的冒泡事件。负载统一放在 `detail`（JSON 值）里。

/// 一次切换提交后派发（detail: `{duration, index}`）
pub const EVENT_TRANSITION: &str = "carousel-transition";

/// 自动播放暂停时派发
pub const EVENT_PAUSE: &str = "carousel-pause";

/// 幻灯片出场前派发
pub const EVENT_BEFORE_TRANSITION: &str = "carousel-before-transition";

/// 幻灯片入场完成后派发
pub const EVENT_AFTER_TRANSITION: &str = "carousel-after-transition";
