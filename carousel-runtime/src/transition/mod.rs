//! # Transition 模块
//!
//! 幻灯片切换时的进出场动画策略。
//!
//! ## 契约
//!
//! 过渡是按名称解析的多态策略（[`Transition`] trait）：
//! `begin` 启动某个方向的动画并把元素置为起始状态，之后每个 tick
//! 调用 `update(dt)` 推进，返回 `false` 表示完成且元素已处于终态
//! （入场 = 可见，出场 = 隐藏）。
//!
//! 解析未命中的名称降级为瞬时无动画过渡（[`InstantTransition`]），
//! 而不是报错——过渡缺失是可降级的展示问题，不是配置错误。

mod fade;
mod none;
mod registry;
mod slide;

pub use fade::FadeTransition;
pub use none::InstantTransition;
pub use registry::TransitionRegistry;
pub use slide::SlideTransition;

use crate::dom::Element;
use crate::error::CarouselResult;

/// 过渡方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    /// 入场
    In,
    /// 出场
    Out,
}

/// 过渡策略
pub trait Transition {
    /// 策略名称（注册表键）
    fn name(&self) -> &str;

    /// 是否瞬时（无动画）；瞬时入场不受 `gap` 延迟影响
    fn is_instant(&self) -> bool {
        false
    }

    /// 启动指定方向的动画，把元素置为起始状态
    fn begin(&mut self, element: &Element, direction: TransitionDirection) -> CarouselResult<()>;

    /// 推进动画
    ///
    /// # 返回
    /// - `Ok(true)`: 仍在进行中
    /// - `Ok(false)`: 已完成，元素处于终态
    fn update(&mut self, element: &Element, dt: f32) -> CarouselResult<bool>;
}
