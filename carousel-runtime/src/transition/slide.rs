//! # 平移过渡
//!
//! 沿水平方向把旧幻灯片推出、新幻灯片推入。
//! 位移距离取容器（父元素）的宽度；方向由配置的 direction 决定。

use super::{Transition, TransitionDirection};
use crate::animation::{Easing, Timeline};
use crate::dom::{Element, hide_element, parse_px, show_element};
use crate::error::{CarouselError, CarouselResult};
use crate::options::TransitionOptions;

/// 平移过渡
#[derive(Debug)]
pub struct SlideTransition {
    duration: f32,
    /// true = 正向（新片从右侧进入）
    forward: bool,
    width: f32,
    direction: Option<TransitionDirection>,
    timeline: Option<Timeline>,
}

impl SlideTransition {
    /// 按配置创建
    pub fn new(options: &TransitionOptions) -> Self {
        Self {
            duration: options.duration,
            forward: options.direction,
            width: 0.0,
            direction: None,
            timeline: None,
        }
    }

    fn sign(&self) -> f32 {
        if self.forward { 1.0 } else { -1.0 }
    }

    fn resolve_width(&mut self, element: &Element) -> CarouselResult<()> {
        let parent = element
            .parent()
            .ok_or_else(|| CarouselError::TransitionFailed {
                name: "slide".to_string(),
                message: "元素没有父容器，无法计算位移宽度".to_string(),
            })?;
        self.width = parent
            .style("width")
            .as_deref()
            .and_then(parse_px)
            .unwrap_or(0.0);
        Ok(())
    }

    fn offset(&self, progress: f32, direction: TransitionDirection) -> f32 {
        match direction {
            // 从 +width（或 -width）滑到 0
            TransitionDirection::In => self.width * self.sign() * (1.0 - progress),
            // 从 0 滑到 -width（或 +width）
            TransitionDirection::Out => -self.width * self.sign() * progress,
        }
    }
}

impl Transition for SlideTransition {
    fn name(&self) -> &str {
        "slide"
    }

    fn begin(&mut self, element: &Element, direction: TransitionDirection) -> CarouselResult<()> {
        self.resolve_width(element)?;
        show_element(element);
        element.set_style(
            "transform",
            &format!("translateX({:.1}px)", self.offset(0.0, direction)),
        );
        self.direction = Some(direction);
        self.timeline = Some(Timeline::new(0.0, 1.0, self.duration).with_easing(Easing::Linear));
        Ok(())
    }

    fn update(&mut self, element: &Element, dt: f32) -> CarouselResult<bool> {
        let Some(timeline) = self.timeline.as_mut() else {
            return Ok(false);
        };
        let Some(direction) = self.direction else {
            return Ok(false);
        };

        let running = timeline.update(dt);
        let value = timeline.value();
        let offset = self.offset(value, direction);
        element.set_style("transform", &format!("translateX({offset:.1}px)"));
        if running {
            return Ok(true);
        }

        element.remove_style("transform");
        if direction == TransitionDirection::Out {
            hide_element(element);
        }
        self.timeline = None;
        Ok(false)
    }
}
