//! # Animation 模块
//!
//! 过渡/特效共用的时间轴原语。
//!
//! 动画只关注标量值随时间的变化，不假设目标类型；
//! 具体把值写到哪个样式上由各过渡/特效策略自己决定。

mod easing;
mod timeline;

pub use easing::Easing;
pub use timeline::{Timeline, TimelineState};
