//! # Ken Burns 特效
//!
//! 对幻灯片内的背景图做缓慢的缩放 + 平移（pan/zoom）。
//! 每次轮到该幻灯片都会重播。
//!
//! 可通过目标元素上的 `data-*` 调整：
//! - `data-zoom-start` / `data-zoom-final`：起止缩放比例
//! - `data-pan-amount`：平移距离（像素）
//! - `data-pan-direction`：平移方向（角度）
//! - `data-duration`：时长（毫秒）
//! - `data-wait`：启动延迟（毫秒）

use super::Effect;
use crate::animation::{Easing, Timeline};
use crate::dom::Element;
use crate::error::CarouselResult;

const DEFAULT_ZOOM_START: f32 = 1.0;
const DEFAULT_ZOOM_FINAL: f32 = 1.2;
const DEFAULT_PAN_AMOUNT: f32 = 30.0;
const DEFAULT_PAN_DIRECTION_DEG: f32 = 45.0;
const DEFAULT_DURATION_MS: f32 = 6000.0;
const DEFAULT_WAIT_MS: f32 = 100.0;

/// Ken Burns（pan/zoom）特效
#[derive(Debug, Default)]
pub struct KenBurnsEffect {
    zoom_start: f32,
    zoom_final: f32,
    pan_x: f32,
    pan_y: f32,
    timeline: Option<Timeline>,
}

impl KenBurnsEffect {
    /// 创建特效实例；参数在 `begin` 时从目标元素解析
    pub fn new() -> Self {
        Self::default()
    }

    fn data_number(element: &Element, key: &str, fallback: f32) -> f32 {
        element
            .data(key)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(fallback)
    }

    fn apply_transform(&self, element: &Element, progress: f32) {
        let zoom = self.zoom_start + (self.zoom_final - self.zoom_start) * progress;
        let x = self.pan_x * progress;
        let y = self.pan_y * progress;
        element.set_style(
            "transform",
            &format!("scale({zoom:.4}) translate({x:.1}px, {y:.1}px)"),
        );
    }
}

impl Effect for KenBurnsEffect {
    fn name(&self) -> &str {
        "ken-burns"
    }

    fn should_repeat(&self) -> bool {
        true
    }

    fn begin(&mut self, element: &Element) -> CarouselResult<()> {
        self.zoom_start = Self::data_number(element, "zoom-start", DEFAULT_ZOOM_START);
        self.zoom_final = Self::data_number(element, "zoom-final", DEFAULT_ZOOM_FINAL);
        let pan_amount = Self::data_number(element, "pan-amount", DEFAULT_PAN_AMOUNT);
        let pan_direction =
            Self::data_number(element, "pan-direction", DEFAULT_PAN_DIRECTION_DEG).to_radians();
        self.pan_x = pan_direction.cos() * pan_amount;
        self.pan_y = pan_direction.sin() * pan_amount;

        let duration = Self::data_number(element, "duration", DEFAULT_DURATION_MS);
        let wait = Self::data_number(element, "wait", DEFAULT_WAIT_MS);
        self.timeline = Some(
            Timeline::new(0.0, 1.0, duration)
                .with_delay(wait)
                .with_easing(Easing::EaseInOutSine),
        );

        self.apply_transform(element, 0.0);
        Ok(())
    }

    fn update(&mut self, element: &Element, dt: f32) -> CarouselResult<bool> {
        let Some(timeline) = self.timeline.as_mut() else {
            return Ok(false);
        };
        let running = timeline.update(dt);
        let progress = timeline.value();
        self.apply_transform(element, progress);
        if !running {
            self.timeline = None;
        }
        Ok(running)
    }

    fn reset(&mut self, element: &Element) {
        self.timeline = None;
        element.set_style("transform", "scale(1) translate(0px, 0px)");
    }
}
