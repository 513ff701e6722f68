//! # Effect 模块
//!
//! 作用于幻灯片**内部元素**的视觉特效，独立于幻灯片级过渡。
//!
//! ## 契约
//!
//! - 特效在幻灯片构建期通过元素上的 `data-effect` 标记发现并绑定，
//!   每个绑定独占自己的特效实例（不跨幻灯片共享）；
//! - `prepare` 在幻灯片被临时置为"可测量"状态时调用，用于读取布局
//!   （容器尺寸、目标位置）；
//! - `begin` + `update(dt)` 驱动播放；同一时机的多个特效严格按
//!   发现顺序逐个播放，互不重叠；
//! - `is_persistent` 为真的特效在 `reset_effects` 时保持不动；
//! - `should_repeat` 为真的特效每次轮到该幻灯片都会重播，
//!   否则整个生命周期只播一次。
//!
//! 特效状态全部保存在特效实例里，不写回共享元素的属性。

mod bounce_in;
mod glow;
mod ken_burns;
pub mod layout;
mod registry;

pub use bounce_in::BounceInEffect;
pub use glow::GlowEffect;
pub use ken_burns::KenBurnsEffect;
pub use registry::EffectRegistry;

use crate::dom::Element;
use crate::error::CarouselResult;

/// 特效的触发时机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectTiming {
    /// 幻灯片出场前（`before-transition` 钩子）
    BeforeTransition,
    /// 幻灯片入场后（`after-transition` 钩子）
    #[default]
    AfterTransition,
}

impl EffectTiming {
    /// 解析 `data-effect-timing` 属性值
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "before" | "before-transition" => Some(Self::BeforeTransition),
            "after" | "after-transition" => Some(Self::AfterTransition),
            _ => None,
        }
    }
}

/// 特效策略
pub trait Effect {
    /// 策略名称（注册表键）
    fn name(&self) -> &str;

    /// 是否持久：持久特效不被 `reset_effects` 还原
    fn is_persistent(&self) -> bool {
        false
    }

    /// 是否每个轮播周期重播
    fn should_repeat(&self) -> bool {
        false
    }

    /// 布局测量钩子；元素此刻可测量（visibility:hidden + display:block）
    ///
    /// 允许有意地持久化样式修改（如位置归一化）。
    fn prepare(&mut self, element: &Element) -> CarouselResult<()> {
        let _ = element;
        Ok(())
    }

    /// 启动播放，把元素置为起始状态
    fn begin(&mut self, element: &Element) -> CarouselResult<()>;

    /// 推进播放
    ///
    /// # 返回
    /// - `Ok(true)`: 仍在进行中
    /// - `Ok(false)`: 已完成
    fn update(&mut self, element: &Element, dt: f32) -> CarouselResult<bool>;

    /// 还原特效对元素样式的修改
    fn reset(&mut self, element: &Element);
}
