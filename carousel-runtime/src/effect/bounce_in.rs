//! # Bounce In 特效
//!
//! 元素从容器外落入：下坠 → 触底反弹 → 回落到目标位置，三个阶段的
//! 时长与各自的位移距离成正比。支持重力加速模式与匀速（flat）模式。
//!
//! 可通过目标元素上的 `data-*` 调整：
//! - `data-duration`：总时长（毫秒）
//! - `data-direction`：水平入场方向（true = 左侧）
//! - `data-elasticity`：反弹高度比例（可大于 1）
//! - `data-gravity`：false 时关闭加速度，用匀速运动
//! - `data-wait`：启动延迟（毫秒）

use super::Effect;
use super::layout::{
    element_bounds, normalize_element_style, offset_relative_to_parent, parent_bounds,
};
use crate::dom::Element;
use crate::error::CarouselResult;
use crate::options::parse_bool;

const DEFAULT_DURATION_MS: f32 = 800.0;
const DEFAULT_ELASTICITY: f32 = 0.85;
const DEFAULT_WAIT_MS: f32 = 0.0;

/// 落入反弹特效
#[derive(Debug, Default)]
pub struct BounceInEffect {
    prepared: bool,
    duration: f32,
    wait: f32,
    gravity_enabled: bool,

    container_height: f32,
    start_x: f32,
    start_y: f32,
    final_x: f32,
    final_y: f32,
    /// 触底位置（反弹前的最低点）
    floor: f32,
    /// 反弹峰值位置
    peak_y: f32,
    bounce_height: f32,

    drop_ms: f32,
    rebound_ms: f32,
    settle_ms: f32,
    /// 匀速模式的平均速度（px/ms）
    avg_speed: f32,
    gravity: f32,
    speed_x: f32,

    elapsed: f32,
    running: bool,
}

impl BounceInEffect {
    /// 创建特效实例；布局参数在 `prepare` 时测量
    pub fn new() -> Self {
        Self::default()
    }

    fn data_number(element: &Element, key: &str, fallback: f32) -> f32 {
        element
            .data(key)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(fallback)
    }

    /// 保证反弹高度足以到达最终位置
    fn clamp_elasticity(&self, requested: f32) -> f32 {
        if self.container_height <= 0.0 {
            return requested;
        }
        let required = (self.floor - self.final_y) / self.container_height;
        requested.max(required)
    }

    fn phase_y(&self, t: f32) -> f32 {
        if !self.gravity_enabled {
            return self.flat_y(t);
        }

        if t <= self.drop_ms {
            // 阶段 1：自由下坠到触底
            self.start_y + 0.5 * self.gravity * t * t
        } else if t <= self.drop_ms + self.rebound_ms {
            // 阶段 2：反弹上升
            let tau = t - self.drop_ms;
            let v0 = (2.0 * self.gravity * self.bounce_height).sqrt();
            self.floor - v0 * tau + 0.5 * self.gravity * tau * tau
        } else if self.settle_ms > 1.0 {
            // 阶段 3：从峰值回落到目标位置
            let tau = t - self.drop_ms - self.rebound_ms;
            let settle_gravity =
                2.0 * (self.final_y - self.peak_y) / (self.settle_ms * self.settle_ms);
            self.peak_y + 0.5 * settle_gravity * tau * tau
        } else {
            self.final_y
        }
    }

    fn flat_y(&self, t: f32) -> f32 {
        if t <= self.drop_ms {
            self.start_y + t * self.avg_speed
        } else if t <= self.drop_ms + self.rebound_ms {
            self.floor - (t - self.drop_ms) * self.avg_speed
        } else {
            self.peak_y + (t - self.drop_ms - self.rebound_ms) * self.avg_speed
        }
    }

    fn apply_position(&self, element: &Element, x: f32, y: f32) {
        element.set_style("transform", &format!("translate({x:.1}px, {y:.1}px)"));
    }
}

impl Effect for BounceInEffect {
    fn name(&self) -> &str {
        "bounce-in"
    }

    fn prepare(&mut self, element: &Element) -> CarouselResult<()> {
        let (container_width, container_height) = parent_bounds(element)?;
        let (element_width, element_height) = element_bounds(element);
        self.container_height = container_height;

        let (final_x, final_y) = offset_relative_to_parent(element);
        self.final_x = final_x;
        self.final_y = final_y;

        normalize_element_style(element);

        self.duration = Self::data_number(element, "duration", DEFAULT_DURATION_MS).max(1.0);
        self.wait = Self::data_number(element, "wait", DEFAULT_WAIT_MS).max(0.0);
        let direction = element
            .data("direction")
            .map(|raw| parse_bool(&raw))
            .unwrap_or(true);
        self.gravity_enabled = element
            .data("gravity")
            .map(|raw| parse_bool(&raw))
            .unwrap_or(true);

        self.floor = container_height - element_height;
        let elasticity = self
            .clamp_elasticity(Self::data_number(element, "elasticity", DEFAULT_ELASTICITY));

        self.bounce_height = if self.gravity_enabled {
            elasticity * container_height
        } else {
            self.floor
        };
        self.peak_y = if self.gravity_enabled {
            self.floor - self.bounce_height
        } else {
            0.0
        };

        let drop_distance = container_height;
        let settle_distance = (self.final_y - self.peak_y).max(0.0);
        let total = (drop_distance + self.bounce_height + settle_distance).max(1.0);
        self.drop_ms = self.duration * drop_distance / total;
        self.rebound_ms = self.duration * self.bounce_height / total;
        self.settle_ms = self.duration * settle_distance / total;
        self.avg_speed = total / self.duration;
        self.gravity = if self.gravity_enabled && self.drop_ms > 0.0 {
            2.0 * drop_distance / (self.drop_ms * self.drop_ms)
        } else {
            0.0
        };

        self.start_x = if direction { -element_width } else { container_width };
        self.start_y = -element_height;
        self.speed_x = (self.final_x - self.start_x) / self.duration;
        self.prepared = true;
        Ok(())
    }

    fn begin(&mut self, element: &Element) -> CarouselResult<()> {
        if !self.prepared {
            self.prepare(element)?;
        }
        self.elapsed = -self.wait;
        self.running = true;
        self.apply_position(element, self.start_x, self.start_y);
        Ok(())
    }

    fn update(&mut self, element: &Element, dt: f32) -> CarouselResult<bool> {
        if !self.running {
            return Ok(false);
        }
        self.elapsed += dt;
        if self.elapsed < 0.0 {
            return Ok(true);
        }
        if self.elapsed >= self.duration {
            self.apply_position(element, self.final_x, self.final_y);
            self.running = false;
            return Ok(false);
        }

        let x = self.start_x + self.elapsed * self.speed_x;
        let y = self.phase_y(self.elapsed);
        self.apply_position(element, x, y);
        Ok(true)
    }

    fn reset(&mut self, _element: &Element) {
        // 落点即终态，无需还原
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Element, Element) {
        let container = Element::new("div");
        container.set_style("width", "400px");
        container.set_style("height", "300px");
        let target = Element::new("span");
        target.set_style("width", "40px");
        target.set_style("height", "30px");
        container.append_child(&target);
        (container, target)
    }

    #[test]
    fn test_bounce_lands_on_final_position() {
        let (_container, target) = fixture();
        target.set_data("duration", "100");
        let mut effect = BounceInEffect::new();

        effect.prepare(&target).unwrap();
        effect.begin(&target).unwrap();
        assert_eq!(target.style("transform").as_deref(), Some("translate(-40.0px, -30.0px)"));

        let mut guard = 0;
        while effect.update(&target, 10.0).unwrap() {
            guard += 1;
            assert!(guard < 100, "动画未收敛");
        }
        assert_eq!(target.style("transform").as_deref(), Some("translate(0.0px, 0.0px)"));
    }

    #[test]
    fn test_wait_holds_start_position() {
        let (_container, target) = fixture();
        target.set_data("duration", "100");
        target.set_data("wait", "50");
        let mut effect = BounceInEffect::new();
        effect.prepare(&target).unwrap();
        effect.begin(&target).unwrap();

        assert!(effect.update(&target, 30.0).unwrap());
        assert_eq!(target.style("transform").as_deref(), Some("translate(-40.0px, -30.0px)"));
    }

    #[test]
    fn test_direction_false_enters_from_the_right() {
        let (_container, target) = fixture();
        target.set_data("direction", "false");
        let mut effect = BounceInEffect::new();
        effect.prepare(&target).unwrap();
        effect.begin(&target).unwrap();
        assert_eq!(target.style("transform").as_deref(), Some("translate(400.0px, -30.0px)"));
    }

    #[test]
    fn test_flat_mode_moves_linearly() {
        let (_container, target) = fixture();
        target.set_data("duration", "100");
        target.set_data("gravity", "false");
        let mut effect = BounceInEffect::new();
        effect.prepare(&target).unwrap();
        effect.begin(&target).unwrap();

        assert!(effect.update(&target, 10.0).unwrap());
        let transform = target.style("transform").unwrap();
        assert!(transform.starts_with("translate("), "{transform}");
    }

    #[test]
    fn test_prepare_requires_parent() {
        let orphan = Element::new("span");
        let mut effect = BounceInEffect::new();
        assert!(effect.prepare(&orphan).is_err());
    }

    #[test]
    fn test_prepare_normalizes_position() {
        let (_container, target) = fixture();
        let mut effect = BounceInEffect::new();
        effect.prepare(&target).unwrap();
        // 位置归一化是有意持久的样式修改
        assert_eq!(target.style("position").as_deref(), Some("absolute"));
    }
}
