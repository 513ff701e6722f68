//! # 淡入淡出过渡
//!
//! 出场：opacity 1 → 0 后隐藏；入场：先显示再 opacity 0 → 1。

use super::{Transition, TransitionDirection};
use crate::animation::{Easing, Timeline};
use crate::dom::{Element, hide_element, show_element};
use crate::error::CarouselResult;
use crate::options::TransitionOptions;

/// 淡入淡出过渡
#[derive(Debug)]
pub struct FadeTransition {
    duration: f32,
    direction: Option<TransitionDirection>,
    timeline: Option<Timeline>,
}

impl FadeTransition {
    /// 按配置创建
    pub fn new(options: &TransitionOptions) -> Self {
        Self {
            duration: options.duration,
            direction: None,
            timeline: None,
        }
    }
}

impl Transition for FadeTransition {
    fn name(&self) -> &str {
        "fade"
    }

    fn begin(&mut self, element: &Element, direction: TransitionDirection) -> CarouselResult<()> {
        let timeline = match direction {
            TransitionDirection::In => {
                show_element(element);
                element.set_style("opacity", "0");
                Timeline::new(0.0, 1.0, self.duration)
            }
            TransitionDirection::Out => {
                element.set_style("opacity", "1");
                Timeline::new(1.0, 0.0, self.duration)
            }
        };
        self.direction = Some(direction);
        self.timeline = Some(timeline.with_easing(Easing::Linear));
        Ok(())
    }

    fn update(&mut self, element: &Element, dt: f32) -> CarouselResult<bool> {
        let Some(timeline) = self.timeline.as_mut() else {
            return Ok(false);
        };

        let running = timeline.update(dt);
        element.set_style("opacity", &format!("{:.3}", timeline.value()));
        if running {
            return Ok(true);
        }

        match self.direction {
            Some(TransitionDirection::Out) => {
                hide_element(element);
                element.remove_style("opacity");
            }
            Some(TransitionDirection::In) | None => {
                element.set_style("opacity", "1");
            }
        }
        self.timeline = None;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fade(duration: f32) -> FadeTransition {
        FadeTransition::new(&TransitionOptions {
            name: "fade".to_string(),
            duration,
            direction: true,
        })
    }

    #[test]
    fn test_fade_in_progresses_opacity() {
        let element = Element::new("section");
        let mut transition = fade(100.0);
        transition.begin(&element, TransitionDirection::In).unwrap();

        assert_eq!(element.style("opacity").as_deref(), Some("0"));
        assert!(transition.update(&element, 50.0).unwrap());
        let mid: f32 = element.style("opacity").unwrap().parse().unwrap();
        assert!(mid > 0.0 && mid < 1.0);

        assert!(!transition.update(&element, 60.0).unwrap());
        assert_eq!(element.style("opacity").as_deref(), Some("1"));
        assert_eq!(element.style("display").as_deref(), Some("block"));
    }

    #[test]
    fn test_fade_out_hides_element_at_end() {
        let element = Element::new("section");
        let mut transition = fade(80.0);
        transition.begin(&element, TransitionDirection::Out).unwrap();

        assert!(transition.update(&element, 40.0).unwrap());
        assert!(!transition.update(&element, 50.0).unwrap());
        assert_eq!(element.style("display").as_deref(), Some("none"));
        assert!(element.style("opacity").is_none());
        assert!(!element.has_class("active"));
    }

    #[test]
    fn test_zero_duration_fade_finishes_on_first_update() {
        let element = Element::new("section");
        let mut transition = fade(0.0);
        transition.begin(&element, TransitionDirection::In).unwrap();
        assert!(!transition.update(&element, 0.0).unwrap());
        assert_eq!(element.style("opacity").as_deref(), Some("1"));
    }
}
