//! # Carousel Runtime
//!
//! 幻灯片轮播组件的核心运行时库。
//!
//! ## 架构概述
//!
//! `carousel-runtime` 是纯逻辑核心，不依赖任何真实浏览器环境。
//! 宿主通过 **tick 驱动 + 指令队列** 与核心通信：
//!
//! ```text
//! Host                               Carousel
//!   │                                   │
//!   │──── tick(dt) ───────────────────►│  消费指令 → 定时器 → 过渡/特效
//!   │──── notify_*(可见性信号) ───────►│  翻译为 pause / resume
//!   │                                   │
//!   │◄─── 冒泡 DOM 事件 ───────────────│  carousel-transition / -pause / ...
//! ```
//!
//! 插件注入的按钮把 [`command::ControlCommand`] 排进共享队列，
//! 门面在每个 tick 开头统一消费；过渡与特效全部由毫秒时间轴推进，
//! 没有真实定时器，测试以合成 `dt` 步进，完全确定。
//!
//! ## 核心类型
//!
//! - [`Carousel`]：播放门面（自动播放定时器、配置、插件、可见性）
//! - [`Slider`]：索引簿记 + 过渡编排（飞行锁、fork/join 动画对）
//! - [`Slide`]：单张幻灯片（渲染元素、过渡实例、特效绑定）
//! - [`Element`]：宿主元素树的轻量模型
//! - [`Extensions`]：过渡/特效/插件注册表集合
//!
//! ## 模块结构
//!
//! - [`dom`]：元素树与冒泡事件
//! - [`options`]：配置记录与 `data-*` 解析
//! - [`animation`]：缓动与时间轴
//! - [`transition`] / [`effect`] / [`plugin`]：三类可扩展策略
//! - [`slide`] / [`slider`] / [`carousel`]：核心编排
//! - [`visibility`]：可见性驱动的播放控制
//! - [`command`]：插件 UI → 门面 的指令通道
//! - [`error`]：错误类型定义

pub mod animation;
pub mod carousel;
pub mod command;
pub mod dom;
pub mod effect;
pub mod error;
pub mod events;
pub mod extensions;
pub mod options;
pub mod plugin;
pub mod slide;
pub mod slider;
pub mod transition;
pub mod visibility;

// 重导出核心类型
pub use carousel::{CONTAINER_CLASS, Carousel, ROOT_CLASS};
pub use command::ControlCommand;
pub use dom::Element;
pub use error::{CarouselError, CarouselResult};
pub use extensions::Extensions;
pub use slide::Slide;
pub use slider::Slider;
pub use visibility::{VisibilityAction, VisibilityController};
