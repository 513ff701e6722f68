//! # Slide 模块
//!
//! 单张幻灯片：持有渲染元素、进出场过渡实例和发现到的特效绑定。
//!
//! ## 生命周期
//!
//! 幻灯片在滑块初始化时从容器子元素一次性创建（之后新增的子元素
//! 不会被采集），随滑块存活到轮播销毁。构建时：
//!
//! 1. 深拷贝源元素为渲染元素，合并 class
//!    （原有 ∪ 固定标记 class ∪ 配置附加 class，按首次出现去重）；
//! 2. 扫描渲染元素的后代，把携带 `data-effect` 标记的元素绑定到
//!    注册表解析出的特效实例上（未注册的名称告警跳过，不失败）；
//! 3. 从注册表解析进出场过渡实例，此后不再变更。
//!
//! `has_played` 只由幻灯片自己在特效播完后置位；同一时机的特效
//! 严格按发现顺序逐个播放。

use std::collections::VecDeque;

use serde_json::{Value, json};
use tracing::warn;

use crate::dom::{Element, hide_element, show_element};
use crate::effect::{Effect, EffectTiming};
use crate::error::CarouselResult;
use crate::events::{EVENT_AFTER_TRANSITION, EVENT_BEFORE_TRANSITION};
use crate::extensions::Extensions;
use crate::options::{SlideOptions, SliderOptions, resolve_slide_options};
use crate::transition::{Transition, TransitionDirection};

/// 可见幻灯片携带的标记 class
pub const ACTIVE_CLASS: &str = "active";

/// 每张幻灯片的固定标记 class
pub const SLIDE_MARKER_CLASS: &str = "carousel-slide";

/// 特效绑定：目标元素 + 独占的特效实例 + 播放状态
pub struct EffectBinding {
    target: Element,
    effect: Box<dyn Effect>,
    timing: EffectTiming,
    has_played: bool,
}

impl EffectBinding {
    /// 特效名称
    pub fn effect_name(&self) -> &str {
        self.effect.name()
    }

    /// 触发时机
    pub fn timing(&self) -> EffectTiming {
        self.timing
    }

    /// 是否已播放过
    pub fn has_played(&self) -> bool {
        self.has_played
    }
}

/// 单张幻灯片
pub struct Slide {
    original: Element,
    element: Element,
    options: SlideOptions,
    transition_in: Box<dyn Transition>,
    transition_out: Box<dyn Transition>,
    effects: Vec<EffectBinding>,
    /// 待播放的特效（绑定下标，发现顺序）
    queue: VecDeque<usize>,
    /// 正在播放的特效
    active: Option<usize>,
}

impl Slide {
    /// 从源元素构建幻灯片
    pub fn new(source: &Element, slider_options: &SliderOptions, extensions: &Extensions) -> Self {
        let options = resolve_slide_options(slider_options, source);

        let element = source.deep_clone();
        element.add_class(SLIDE_MARKER_CLASS);
        for class in options.class.split_whitespace() {
            element.add_class(class);
        }

        let effects = Self::discover_effects(&element, extensions);
        let transition_in = extensions.transitions.resolve(&options.transition_in);
        let transition_out = extensions.transitions.resolve(&options.transition_out);

        Self {
            original: source.clone(),
            element,
            options,
            transition_in,
            transition_out,
            effects,
            queue: VecDeque::new(),
            active: None,
        }
    }

    /// 扫描后代元素上的 `data-effect` 标记并绑定特效实例
    fn discover_effects(element: &Element, extensions: &Extensions) -> Vec<EffectBinding> {
        let marked = element.descendants(&|e| e.data("effect").is_some());
        let mut bindings = Vec::new();
        for target in marked {
            let name = target.data("effect").unwrap_or_default();
            let Some(effect) = extensions.effects.resolve(&name) else {
                warn!(effect = %name, "未注册的特效，已跳过");
                continue;
            };
            let timing = target
                .data("effect-timing")
                .and_then(|raw| EffectTiming::parse(&raw))
                .unwrap_or_default();
            bindings.push(EffectBinding {
                target,
                effect,
                timing,
                has_played: false,
            });
        }
        bindings
    }

    // ========== 可见性 ==========

    /// 显示幻灯片（幂等）
    pub fn show(&self) {
        show_element(&self.element);
    }

    /// 隐藏幻灯片（幂等）
    pub fn hide(&self) {
        hide_element(&self.element);
    }

    /// 当前是否可见（display 不为 none）
    pub fn is_visible(&self) -> bool {
        self.element.style("display").as_deref() != Some("none")
    }

    // ========== 过渡 ==========

    /// 启动指定方向的过渡
    pub fn begin_transition(&mut self, direction: TransitionDirection) -> CarouselResult<()> {
        match direction {
            TransitionDirection::In => self.transition_in.begin(&self.element, direction),
            TransitionDirection::Out => self.transition_out.begin(&self.element, direction),
        }
    }

    /// 推进指定方向的过渡；`Ok(false)` 表示完成
    pub fn update_transition(
        &mut self,
        direction: TransitionDirection,
        dt: f32,
    ) -> CarouselResult<bool> {
        match direction {
            TransitionDirection::In => self.transition_in.update(&self.element, dt),
            TransitionDirection::Out => self.transition_out.update(&self.element, dt),
        }
    }

    /// 入场过渡是否瞬时（瞬时入场不受 gap 延迟影响）
    pub fn is_transition_in_instant(&self) -> bool {
        self.transition_in.is_instant()
    }

    // ========== 特效 ==========

    /// 临时把幻灯片置为"可测量但不可见"，运行所有特效的布局钩子，
    /// 然后恢复先前的显示状态
    ///
    /// 特效 `prepare` 里有意做出的样式修改（如位置归一化）会保留。
    pub fn prepare_effects(&mut self) {
        let prior_display = self.element.style("display");
        let prior_visibility = self.element.style("visibility");
        self.element.set_style("visibility", "hidden");
        self.element.set_style("display", "block");

        for binding in &mut self.effects {
            if let Err(e) = binding.effect.prepare(&binding.target) {
                warn!(effect = binding.effect.name(), error = %e, "特效布局测量失败，已跳过");
            }
        }

        restore_style(&self.element, "display", prior_display);
        restore_style(&self.element, "visibility", prior_visibility);
    }

    /// 把指定时机的特效按发现顺序排入播放队列
    ///
    /// 已播放过的特效只有声明 `should_repeat` 才会重播。
    pub fn play_effects(&mut self, timing: EffectTiming) {
        for (index, binding) in self.effects.iter().enumerate() {
            if binding.timing != timing {
                continue;
            }
            if binding.has_played && !binding.effect.should_repeat() {
                continue;
            }
            if self.queue.contains(&index) || self.active == Some(index) {
                continue;
            }
            self.queue.push_back(index);
        }
    }

    /// 推进特效播放（严格串行：同一时刻至多一个特效在播）
    ///
    /// 播放失败的特效告警后跳过，不会阻塞队列。
    pub fn update_effects(&mut self, dt: f32) {
        let mut dt = dt;
        loop {
            if self.active.is_none() {
                let Some(next) = self.queue.pop_front() else {
                    return;
                };
                let binding = &mut self.effects[next];
                match binding.effect.begin(&binding.target) {
                    Ok(()) => self.active = Some(next),
                    Err(e) => {
                        warn!(effect = binding.effect.name(), error = %e, "特效启动失败，已跳过");
                        binding.has_played = true;
                        continue;
                    }
                }
            }

            let index = self.active.expect("active 必然已设置");
            let binding = &mut self.effects[index];
            match binding.effect.update(&binding.target, dt) {
                Ok(true) => return,
                Ok(false) => {
                    binding.has_played = true;
                    self.active = None;
                    // 同一 tick 内接续下一个特效，但不重复计时
                    dt = 0.0;
                }
                Err(e) => {
                    warn!(effect = binding.effect.name(), error = %e, "特效播放失败，已跳过");
                    binding.has_played = true;
                    self.active = None;
                    dt = 0.0;
                }
            }
        }
    }

    /// 是否没有待播/在播的特效
    pub fn effects_idle(&self) -> bool {
        self.active.is_none() && self.queue.is_empty()
    }

    /// 还原所有非持久特效
    pub fn reset_effects(&mut self) {
        for binding in &mut self.effects {
            if !binding.effect.is_persistent() {
                binding.effect.reset(&binding.target);
            }
        }
    }

    // ========== 生命周期钩子 ==========

    /// 出场前钩子：派发事件并排入 before 时机的特效
    pub fn before_transition(&mut self) {
        self.element.emit(EVENT_BEFORE_TRANSITION, Value::Null);
        self.play_effects(EffectTiming::BeforeTransition);
    }

    /// 入场后钩子：派发事件并排入 after 时机的特效
    pub fn after_transition(&mut self) {
        self.element.emit(EVENT_AFTER_TRANSITION, Value::Null);
        self.play_effects(EffectTiming::AfterTransition);
    }

    // ========== 访问器 ==========

    /// 渲染元素
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// 构建时的源元素
    pub fn original(&self) -> &Element {
        &self.original
    }

    /// 展示时长（毫秒）
    pub fn duration(&self) -> f32 {
        self.options.duration
    }

    /// 渲染元素的 class 字符串
    pub fn class(&self) -> String {
        self.element.class_string()
    }

    /// 特效绑定（按发现顺序）
    pub fn effect_bindings(&self) -> &[EffectBinding] {
        &self.effects
    }

    /// 读取配置项；未知键返回 `None` 并告警，从不报错
    pub fn get_option(&self, key: &str) -> Option<Value> {
        match key {
            "duration" => Some(json!(self.options.duration)),
            "class" => Some(json!(self.class())),
            "transition_in" => serde_json::to_value(&self.options.transition_in).ok(),
            "transition_out" => serde_json::to_value(&self.options.transition_out).ok(),
            _ => {
                warn!(key, "幻灯片不存在该配置项");
                None
            }
        }
    }
}

impl std::fmt::Debug for Slide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slide")
            .field("class", &self.class())
            .field("effects", &self.effects.len())
            .field("visible", &self.is_visible())
            .finish()
    }
}

fn restore_style(element: &Element, property: &str, prior: Option<String>) {
    match prior {
        Some(value) => element.set_style(property, &value),
        None => element.remove_style(property),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{CarouselOptions, resolve_slider_options};

    fn slider_options() -> SliderOptions {
        resolve_slider_options(&CarouselOptions::default())
    }

    fn source_with_effect(effect: &str) -> Element {
        let source = Element::with_class("section", "promo");
        let span = Element::new("span");
        span.set_data("effect", effect);
        span.set_data("duration", "100");
        source.append_child(&span);
        source
    }

    #[test]
    fn test_class_merge_dedups_and_keeps_order() {
        let source = Element::with_class("section", "promo");
        source.add_class("carousel-slide");
        let slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());

        assert_eq!(slide.class(), "promo carousel-slide");
    }

    #[test]
    fn test_effect_discovery() {
        let source = source_with_effect("ken-burns");
        let slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());

        assert_eq!(slide.effect_bindings().len(), 1);
        assert_eq!(slide.effect_bindings()[0].effect_name(), "ken-burns");
        assert_eq!(
            slide.effect_bindings()[0].timing(),
            EffectTiming::AfterTransition
        );
    }

    #[test]
    fn test_unknown_effect_is_skipped_without_error() {
        let source = source_with_effect("sparkle");
        let slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());
        assert!(slide.effect_bindings().is_empty());
    }

    #[test]
    fn test_show_hide_toggle_active_class() {
        let source = Element::new("section");
        let slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());

        slide.hide();
        assert!(!slide.is_visible());
        assert!(!slide.element().has_class(ACTIVE_CLASS));

        slide.show();
        assert!(slide.is_visible());
        assert!(slide.element().has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_prepare_effects_restores_prior_state() {
        let source = Element::new("section");
        let mut slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());
        slide.hide();

        slide.prepare_effects();
        assert_eq!(slide.element().style("display").as_deref(), Some("none"));
        assert_eq!(slide.element().style("visibility").as_deref(), Some("hidden"));
    }

    #[test]
    fn test_effects_play_sequentially_and_mark_played() {
        let source = Element::with_class("section", "promo");
        for _ in 0..2 {
            let span = Element::new("span");
            span.set_data("effect", "ken-burns");
            span.set_data("duration", "50");
            span.set_data("wait", "0");
            source.append_child(&span);
        }
        let mut slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());

        slide.play_effects(EffectTiming::AfterTransition);
        assert!(!slide.effects_idle());

        // 第一个 tick：只有第一个特效在动
        slide.update_effects(25.0);
        let first = &slide.effect_bindings()[0];
        let second = &slide.effect_bindings()[1];
        assert!(!first.has_played());
        assert!(!second.has_played());

        // 播完两个（串行，时间足够）
        for _ in 0..10 {
            slide.update_effects(60.0);
        }
        assert!(slide.effects_idle());
        assert!(slide.effect_bindings()[0].has_played());
        assert!(slide.effect_bindings()[1].has_played());
    }

    #[test]
    fn test_before_transition_emits_event_and_queues_effects() {
        let source = Element::new("section");
        let span = Element::new("span");
        span.set_data("effect", "ken-burns");
        span.set_data("effect-timing", "before");
        source.append_child(&span);

        let mut slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());

        let seen = std::rc::Rc::new(std::cell::Cell::new(false));
        {
            let seen = seen.clone();
            slide
                .element()
                .add_listener(EVENT_BEFORE_TRANSITION, move |_| seen.set(true));
        }

        slide.before_transition();
        assert!(seen.get());
        assert!(!slide.effects_idle());
    }

    #[test]
    fn test_reset_effects_spares_persistent_ones() {
        let source = Element::new("section");
        let glow = Element::new("span");
        glow.set_data("effect", "glow");
        source.append_child(&glow);
        let kb = Element::new("img");
        kb.set_data("effect", "ken-burns");
        source.append_child(&kb);

        let mut slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());
        slide.play_effects(EffectTiming::AfterTransition);
        for _ in 0..200 {
            slide.update_effects(100.0);
        }

        let glow_target = slide.effect_bindings()[0].target.clone();
        assert!(glow_target.style("animation").is_some());

        slide.reset_effects();
        // 持久辉光保留，ken-burns 被还原
        assert!(glow_target.style("animation").is_some());
        let kb_target = slide.effect_bindings()[1].target.clone();
        assert_eq!(
            kb_target.style("transform").as_deref(),
            Some("scale(1) translate(0px, 0px)")
        );
    }

    #[test]
    fn test_played_effects_do_not_replay_unless_repeatable() {
        let source = Element::new("section");
        let glow = Element::new("span");
        glow.set_data("effect", "glow");
        source.append_child(&glow);

        let mut slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());
        slide.play_effects(EffectTiming::AfterTransition);
        slide.update_effects(16.0);
        assert!(slide.effect_bindings()[0].has_played());

        // glow 不可重播：第二次排队不产生任何待播项
        slide.play_effects(EffectTiming::AfterTransition);
        assert!(slide.effects_idle());
    }

    #[test]
    fn test_get_option_unknown_key_returns_none() {
        let source = Element::new("section");
        let slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());

        assert_eq!(slide.get_option("duration"), Some(json!(6000.0)));
        assert!(slide.get_option("class").is_some());
        assert!(slide.get_option("nonexistent").is_none());
    }

    #[test]
    fn test_per_slide_transition_override() {
        let source = Element::new("section");
        source.set_data("transition-in", "fade");
        let mut slide = Slide::new(&source, &slider_options(), &Extensions::with_builtins());

        assert!(!slide.is_transition_in_instant());
        slide.begin_transition(TransitionDirection::In).unwrap();
        assert_eq!(slide.element().style("opacity").as_deref(), Some("0"));
    }
}
