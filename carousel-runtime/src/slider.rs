//! # Slider 模块
//!
//! 索引簿记 + 过渡编排引擎。
//!
//! ## 过渡协议
//!
//! `advance(delta)` 只负责启动：若已有过渡在飞行中则直接返回
//! （不排队、不报错），否则标记飞行中并进入阶段机。阶段由
//! `tick(dt)` 驱动：
//!
//! ```text
//! BeforeHooks   当前片 before-transition 事件 + before 时机特效播完
//!     │         下一片 prepare_effects()
//!     ▼
//! Pair          出场(当前片)与入场(下一片)并发推进；
//!     │         配置了 gap 且入场非瞬时时，入场延迟 gap 毫秒启动；
//!     │         两者都完成后 Pair 才算结束（fork/join）
//!     ▼
//! AfterHooks    下一片 after-transition 事件 + after 时机特效播完
//!     │
//!     ▼         提交索引，在最近的轮播根元素上派发 carousel-transition
//! ```
//!
//! ## 飞行锁
//!
//! 同一时刻至多一个过渡在动，由 `in_flight` 保证；**任何**退出路径
//! （完成或策略报错）都会释放锁，滑块不可能被一次异常永久卡死。
//! 策略错误记录日志后吞掉，索引不提交——调用方看到的只是这次切换
//! 没有发生。瞬时阶段在同一个 tick 内连续推进，不额外消耗帧。

use serde_json::json;
use tracing::{debug, warn};

use crate::dom::Element;
use crate::error::{CarouselError, CarouselResult};
use crate::events::EVENT_TRANSITION;
use crate::extensions::Extensions;
use crate::options::SliderOptions;
use crate::slide::Slide;
use crate::transition::TransitionDirection;

/// 过渡阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransitionPhase {
    /// 出场前钩子（事件 + before 特效）
    BeforeHooks,
    /// 出入场动画并发推进
    Pair,
    /// 入场后钩子（事件 + after 特效）
    AfterHooks,
}

/// 一次飞行中的过渡
#[derive(Debug)]
struct TransitionRun {
    from: usize,
    to: usize,
    phase: TransitionPhase,
    /// 入场动画启动前剩余的延迟
    gap_remaining: f32,
    in_started: bool,
    out_done: bool,
    in_done: bool,
}

/// 滑块：幻灯片序列 + 当前索引 + 过渡编排
pub struct Slider {
    container: Element,
    slides: Vec<Slide>,
    index: usize,
    options: SliderOptions,
    in_flight: Option<TransitionRun>,
}

impl Slider {
    /// 从容器构建滑块
    ///
    /// 同步把容器现有的每个子元素转换成幻灯片（此后新增的子元素
    /// 不会被采集），全部隐藏，并用渲染元素原位替换源元素。
    /// 初始索引越界时归零。
    pub fn new(container: &Element, options: SliderOptions, extensions: &Extensions) -> Self {
        let mut slides = Vec::new();
        for child in container.children() {
            let slide = Slide::new(&child, &options, extensions);
            slide.hide();
            container.replace_child(slide.element(), &child);
            slides.push(slide);
        }

        let index = if options.index < slides.len() {
            options.index
        } else {
            0
        };

        Self {
            container: container.clone(),
            slides,
            index,
            options,
            in_flight: None,
        }
    }

    // ========== 访问器 ==========

    /// 幻灯片数量
    pub fn slides_count(&self) -> usize {
        self.slides.len()
    }

    /// 指定索引的幻灯片
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// 指定索引的幻灯片（可变）
    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// 当前幻灯片
    pub fn current_slide(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    /// 当前索引
    pub fn index(&self) -> usize {
        self.index
    }

    /// 直接设置索引
    ///
    /// 调用方契约：`index` 必须在 `[0, len)` 内（空滑块除外）。
    /// 这里不做回绕或钳制——带校验的路径是 `next_index`/`advance_index`，
    /// 越界直接写入属于调用方 bug，debug 构建下断言暴露。
    pub fn set_index(&mut self, index: usize) {
        debug_assert!(
            self.slides.is_empty() || index < self.slides.len(),
            "set_index 越界: {index}"
        );
        self.index = index;
    }

    /// 按增量计算回绕后的目标索引；空滑块返回 0
    pub fn next_index(&self, delta: i64) -> usize {
        let length = self.slides.len() as i64;
        if length == 0 {
            return 0;
        }
        (self.index as i64 + delta).rem_euclid(length) as usize
    }

    /// 静默跳转：只改索引，不做任何过渡动画
    pub fn advance_index(&mut self, delta: i64) {
        let next = self.next_index(delta);
        self.set_index(next);
    }

    /// 是否有过渡在飞行中
    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    // ========== 过渡编排 ==========

    /// 启动一次切换
    ///
    /// 飞行中或空滑块时是无操作；返回是否真正启动了过渡。
    pub fn advance(&mut self, delta: i64) -> bool {
        if self.in_flight.is_some() || self.slides.is_empty() {
            return false;
        }

        let from = self.index;
        let to = self.next_index(delta);
        debug!(from, to, "开始切换");

        self.slides[from].before_transition();
        self.in_flight = Some(TransitionRun {
            from,
            to,
            phase: TransitionPhase::BeforeHooks,
            gap_remaining: 0.0,
            in_started: false,
            out_done: false,
            in_done: false,
        });
        true
    }

    /// 推进特效播放与飞行中的过渡
    ///
    /// 瞬时阶段会在本次调用内连续推进到底（动画时间只消耗一次）。
    pub fn tick(&mut self, dt: f32) {
        for slide in &mut self.slides {
            slide.update_effects(dt);
        }

        let mut dt_left = dt;
        while self.step(&mut dt_left) {}
    }

    /// 推进一个阶段；返回是否发生了阶段切换（调用方据此继续推进）
    fn step(&mut self, dt_left: &mut f32) -> bool {
        let Some(run) = self.in_flight.as_ref() else {
            return false;
        };
        let (from, to, phase) = (run.from, run.to, run.phase);

        match phase {
            TransitionPhase::BeforeHooks => {
                if !self.slides[from].effects_idle() {
                    return false;
                }
                self.slides[to].prepare_effects();
                if let Err(e) = self.begin_pair(from, to) {
                    self.abort(e);
                    return false;
                }
                if let Some(run) = self.in_flight.as_mut() {
                    run.phase = TransitionPhase::Pair;
                }
                true
            }
            TransitionPhase::Pair => {
                let dt = std::mem::replace(dt_left, 0.0);
                match self.update_pair(dt) {
                    Err(e) => {
                        self.abort(e);
                        false
                    }
                    Ok(true) => false,
                    Ok(false) => {
                        self.slides[to].after_transition();
                        if let Some(run) = self.in_flight.as_mut() {
                            run.phase = TransitionPhase::AfterHooks;
                        }
                        true
                    }
                }
            }
            TransitionPhase::AfterHooks => {
                if !self.slides[to].effects_idle() {
                    return false;
                }
                self.commit(to);
                false
            }
        }
    }

    /// 启动出入场动画对；入场按需延迟
    fn begin_pair(&mut self, from: usize, to: usize) -> CarouselResult<()> {
        self.slides[from].begin_transition(TransitionDirection::Out)?;

        let gap = if self.options.gap > 0.0 && !self.slides[to].is_transition_in_instant() {
            self.options.gap
        } else {
            0.0
        };

        let in_started = gap <= 0.0;
        if in_started {
            self.slides[to].begin_transition(TransitionDirection::In)?;
        }
        if let Some(run) = self.in_flight.as_mut() {
            run.gap_remaining = gap;
            run.in_started = in_started;
        }
        Ok(())
    }

    /// 并发推进出入场动画；`Ok(false)` 表示两者都已完成
    fn update_pair(&mut self, dt: f32) -> CarouselResult<bool> {
        let (from, to, mut out_done, mut in_started, mut in_done, mut gap_remaining) = {
            let run = self.in_flight.as_ref().expect("Pair 阶段必有飞行记录");
            (
                run.from,
                run.to,
                run.out_done,
                run.in_started,
                run.in_done,
                run.gap_remaining,
            )
        };

        if !out_done {
            out_done = !self.slides[from].update_transition(TransitionDirection::Out, dt)?;
        }

        if !in_started {
            gap_remaining -= dt;
            if gap_remaining <= 0.0 {
                self.slides[to].begin_transition(TransitionDirection::In)?;
                in_started = true;
                // 越过延迟边界的剩余时间计入入场动画
                let overshoot = -gap_remaining;
                gap_remaining = 0.0;
                in_done = !self.slides[to].update_transition(TransitionDirection::In, overshoot)?;
            }
        } else if !in_done {
            in_done = !self.slides[to].update_transition(TransitionDirection::In, dt)?;
        }

        let run = self.in_flight.as_mut().expect("Pair 阶段必有飞行记录");
        run.out_done = out_done;
        run.in_started = in_started;
        run.in_done = in_done;
        run.gap_remaining = gap_remaining;
        Ok(!(out_done && in_done))
    }

    /// 提交切换：写入索引并对外广播
    fn commit(&mut self, to: usize) {
        self.set_index(to);
        self.in_flight = None;
        debug!(index = to, "切换完成");

        let target = self
            .container
            .closest(crate::carousel::ROOT_CLASS)
            .unwrap_or_else(|| self.container.clone());
        target.emit(
            EVENT_TRANSITION,
            json!({
                "duration": self.options.slide_duration,
                "index": to,
            }),
        );
    }

    /// 过渡策略失败：记录并释放飞行锁，索引保持不变
    fn abort(&mut self, error: CarouselError) {
        warn!(error = %error, "过渡执行失败，保持原索引并释放过渡锁");
        self.in_flight = None;
    }
}

impl std::fmt::Debug for Slider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slider")
            .field("slides", &self.slides.len())
            .field("index", &self.index)
            .field("transitioning", &self.is_transitioning())
            .finish()
    }
}
