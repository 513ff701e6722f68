//! # Carousel 模块
//!
//! 播放门面：自动播放定时器 + 配置 + 对外 API。
//!
//! ## 构建顺序（关键）
//!
//! 解析根元素 → 合并配置（显式入参 > `data-*` > 默认值）→ 构建滑块
//! （同步隐藏全部幻灯片）→ 可见性控制器 → 解析并应用插件 → 显示
//! 初始幻灯片并触发其入场特效 → 若声明自动播放则武装定时器。
//! 任何一步失败都会中止构建，并包装成单个
//! [`CarouselError::Construction`] 返回——不存在半初始化的实例。
//!
//! ## 时间模型
//!
//! 宿主按帧调用 [`Carousel::tick`]（毫秒增量）。每个 tick：
//! 先消费插件指令队列，再推进自动播放定时器（到点即请求
//! `advance`，飞行中的过渡由滑块的飞行锁吸收重入），最后驱动
//! 滑块的过渡/特效。**定时器句柄的有无是"正在播放"的唯一事实**；
//! `is_active` 是声明的播放意图，二者由 persist 标记解耦。

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::command::{CommandQueue, ControlCommand, command_queue, drain_commands};
use crate::dom::Element;
use crate::error::{CarouselError, CarouselResult};
use crate::events::EVENT_PAUSE;
use crate::extensions::Extensions;
use crate::options::{CarouselOptions, resolve_carousel_options, resolve_slider_options};
use crate::plugin::{Plugin, PluginContext};
use crate::slide::Slide;
use crate::slider::Slider;
use crate::visibility::{VisibilityAction, VisibilityController};

/// 轮播根元素的 class
pub const ROOT_CLASS: &str = "carousel";

/// 幻灯片容器的 class
pub const CONTAINER_CLASS: &str = "carousel-container";

/// 自动播放定时器；句柄存在 ⇔ 正在播放
#[derive(Debug)]
struct AutoplayTimer {
    interval: f32,
    elapsed: f32,
}

/// 轮播播放门面
pub struct Carousel {
    element: Element,
    options: CarouselOptions,
    slider: Slider,
    visibility: VisibilityController,
    plugins: Vec<Box<dyn Plugin>>,
    timer: Option<AutoplayTimer>,
    commands: CommandQueue,
}

impl Carousel {
    /// 以默认配置构建
    pub fn new(root: &Element) -> CarouselResult<Self> {
        Self::with_options(root, Value::Null)
    }

    /// 以显式配置构建；`overrides` 为 JSON 对象（或 `null`）
    pub fn with_options(root: &Element, overrides: Value) -> CarouselResult<Self> {
        Self::with_extensions(root, overrides, &Extensions::with_builtins())
    }

    /// 在文档树内按选择器定位根元素后构建
    pub fn from_selector(
        document: &Element,
        selector: &str,
        overrides: Value,
    ) -> CarouselResult<Self> {
        let root = document.query_selector(selector).ok_or_else(|| {
            CarouselError::Construction(
                CarouselError::RootNotFound {
                    selector: selector.to_string(),
                }
                .to_string(),
            )
        })?;
        Self::with_options(&root, overrides)
    }

    /// 以自定义扩展集构建
    pub fn with_extensions(
        root: &Element,
        overrides: Value,
        extensions: &Extensions,
    ) -> CarouselResult<Self> {
        Self::build(root, overrides, extensions)
            .map_err(|e| CarouselError::Construction(e.to_string()))
    }

    fn build(root: &Element, overrides: Value, extensions: &Extensions) -> CarouselResult<Self> {
        let overrides = match overrides {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            other => {
                return Err(CarouselError::InvalidOptions(format!(
                    "显式配置必须是 JSON 对象，收到: {other}"
                )));
            }
        };

        let options = resolve_carousel_options(root, &overrides)?;
        let container = root
            .descendants(&|e| e.has_class(CONTAINER_CLASS))
            .into_iter()
            .next()
            .ok_or(CarouselError::MissingContainer)?;

        let slider_options = resolve_slider_options(&options);
        let slider = Slider::new(&container, slider_options, extensions);

        let mut carousel = Self {
            element: root.clone(),
            options,
            slider,
            visibility: VisibilityController::new(),
            plugins: Vec::new(),
            timer: None,
            commands: command_queue(),
        };

        carousel.apply_plugins(extensions)?;
        carousel.init_first_slide();
        if carousel.is_active() {
            carousel.play(false);
        }
        Ok(carousel)
    }

    /// 解析并应用配置的插件；未注册的插件键是硬错误
    fn apply_plugins(&mut self, extensions: &Extensions) -> CarouselResult<()> {
        let Some(spec) = self.options.plugins.clone() else {
            return Ok(());
        };
        for (plugin_type, key) in spec.resolve() {
            let mut plugin = extensions.plugins.resolve(plugin_type, &key)?;
            let ctx = PluginContext {
                root: &self.element,
                options: &self.options,
                slides_count: self.slider.slides_count(),
                current_index: self.slider.index(),
                commands: self.commands.clone(),
            };
            plugin.apply(&ctx)?;
            drop(ctx);
            self.plugins.push(plugin);
        }
        Ok(())
    }

    /// 显示初始幻灯片并触发其入场钩子（仅构建期一次）
    fn init_first_slide(&mut self) {
        let index = self.slider.index();
        if let Some(slide) = self.slider.slide_mut(index) {
            slide.show();
            slide.after_transition();
        }
    }

    // ========== 播放控制 ==========

    /// 开始自动播放
    ///
    /// 定时器已武装时幂等；`persist` 为真时把播放意图置为 true。
    /// 意图为 false 且未声明 persist 时不会武装定时器。
    pub fn play(&mut self, persist: bool) {
        if persist {
            self.options.is_active = true;
        }
        if self.timer.is_some() || !self.options.is_active {
            return;
        }
        debug!(interval = self.options.slide_speed, "自动播放开始");
        self.timer = Some(AutoplayTimer {
            interval: self.options.slide_speed,
            elapsed: 0.0,
        });
    }

    /// 暂停自动播放
    ///
    /// 已暂停时幂等；`persist` 为真时把播放意图置为 false。
    /// 不打断飞行中的过渡——只是不再调度下一次 tick。
    pub fn pause(&mut self, persist: bool) {
        if persist {
            self.options.is_active = false;
        }
        self.element.emit(EVENT_PAUSE, Value::Null);
        if self.timer.take().is_some() {
            debug!("自动播放暂停");
        }
    }

    /// 宿主驱动入口：消费指令 → 推进定时器 → 驱动滑块
    pub fn tick(&mut self, dt: f32) {
        self.process_commands();

        let mut fire = false;
        if let Some(timer) = self.timer.as_mut() {
            timer.elapsed += dt;
            if timer.elapsed >= timer.interval {
                timer.elapsed = 0.0;
                fire = true;
            }
        }
        if fire {
            let delta = if self.options.direction { 1 } else { -1 };
            self.slider.advance(delta);
        }

        self.slider.tick(dt);
    }

    fn process_commands(&mut self) {
        for command in drain_commands(&self.commands) {
            debug!(?command, "处理指令");
            match command {
                ControlCommand::Play { persist } => self.play(persist),
                ControlCommand::Pause { persist } => self.pause(persist),
                ControlCommand::Advance { delta } => {
                    self.slider.advance(delta);
                    self.play(false);
                }
                ControlCommand::Goto { index } => {
                    let delta = index as i64 - self.slider.index() as i64;
                    if delta != 0 {
                        self.slider.advance(delta);
                        self.play(false);
                    }
                }
            }
        }
    }

    // ========== 可见性信号 ==========

    /// 宿主上报：根元素与视口的交叠变化
    pub fn notify_intersection(&mut self, intersecting: bool) {
        let action = self.visibility.intersection_changed(intersecting);
        self.apply_visibility_action(action);
    }

    /// 宿主上报：页面可见性变化（标签页隐藏/显示）
    pub fn notify_page_visibility(&mut self, visible: bool) {
        let action = self.visibility.page_visibility_changed(visible);
        self.apply_visibility_action(action);
    }

    /// 宿主上报：窗口焦点变化
    pub fn notify_window_focus(&mut self, focused: bool) {
        let action = self.visibility.focus_changed(focused);
        self.apply_visibility_action(action);
    }

    fn apply_visibility_action(&mut self, action: Option<VisibilityAction>) {
        match action {
            Some(VisibilityAction::Pause) => self.pause(false),
            Some(VisibilityAction::Resume) => self.resume_if_active(),
            None => {}
        }
    }

    /// 只在 意图为真 && 未在播放 && 缓存可见 时恢复播放
    fn resume_if_active(&mut self) {
        if self.is_active() && !self.is_playing() && self.visibility.is_visible() {
            self.play(false);
        }
    }

    /// 断开可见性观察（幂等）
    pub fn disconnect_visibility(&mut self) {
        self.visibility.disconnect();
    }

    /// 销毁前清理：断开观察、移除插件监听、卸下定时器
    pub fn teardown(&mut self) {
        self.visibility.disconnect();
        for plugin in &mut self.plugins {
            plugin.teardown();
        }
        self.timer = None;
    }

    // ========== 状态查询 ==========

    /// 是否正在播放（定时器句柄的有无是唯一事实）
    pub fn is_playing(&self) -> bool {
        self.timer.is_some()
    }

    /// 是否已暂停
    pub fn is_paused(&self) -> bool {
        !self.is_playing()
    }

    /// 声明的播放意图
    pub fn is_active(&self) -> bool {
        self.options.is_active
    }

    /// 根元素当前是否可见（可见性控制器的缓存）
    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    // ========== 访问器 ==========

    /// 幻灯片数量
    pub fn slides_count(&self) -> usize {
        self.slider.slides_count()
    }

    /// 指定索引的幻灯片；越界报错（错误信息携带越界索引）
    pub fn slide(&self, index: usize) -> CarouselResult<&Slide> {
        self.slider
            .slide(index)
            .ok_or(CarouselError::SlideOutOfBounds {
                index,
                count: self.slider.slides_count(),
            })
    }

    /// 当前可见的幻灯片
    pub fn visible_slide(&self) -> CarouselResult<&Slide> {
        self.slide(self.visible_slide_index())
    }

    /// 当前可见幻灯片的索引
    pub fn visible_slide_index(&self) -> usize {
        self.slider.index()
    }

    /// 轮播根元素
    pub fn container(&self) -> &Element {
        &self.element
    }

    /// 内部滑块
    pub fn slider(&self) -> &Slider {
        &self.slider
    }

    /// 内部滑块（可变）
    pub fn slider_mut(&mut self) -> &mut Slider {
        &mut self.slider
    }

    /// 已应用的插件实例
    pub fn plugins(&self) -> &[Box<dyn Plugin>] {
        &self.plugins
    }

    // ========== 配置读写 ==========

    /// 读取配置项；未知键返回 `None` 并告警
    pub fn get_option(&self, key: &str) -> Option<Value> {
        let serialized = serde_json::to_value(&self.options).ok()?;
        match serialized.get(key) {
            Some(value) => Some(value.clone()),
            None => {
                warn!(key, "不存在该配置项");
                None
            }
        }
    }

    /// 更新配置项
    ///
    /// 未知键或类型不符时告警并忽略，从不报错、从不新增键。
    /// `slide_speed` 的更新会同步到已武装的定时器。
    pub fn update_option(&mut self, key: &str, value: Value) {
        let Ok(Value::Object(mut serialized)) = serde_json::to_value(&self.options) else {
            return;
        };
        if !serialized.contains_key(key) {
            warn!(key, "不存在该配置项，忽略更新");
            return;
        }
        serialized.insert(key.to_string(), value);
        match serde_json::from_value::<CarouselOptions>(Value::Object(serialized)) {
            Ok(options) => {
                if let Some(timer) = self.timer.as_mut() {
                    timer.interval = options.slide_speed;
                }
                self.options = options;
            }
            Err(e) => warn!(key, error = %e, "配置值类型不符，忽略更新"),
        }
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("slides", &self.slides_count())
            .field("index", &self.visible_slide_index())
            .field("playing", &self.is_playing())
            .field("active", &self.is_active())
            .finish()
    }
}
