//! # 瞬时过渡
//!
//! 无动画：出场立即隐藏，入场立即显示。
//! 同时是注册表解析未命中时的安全默认策略。

use super::{Transition, TransitionDirection};
use crate::dom::{Element, hide_element, show_element};
use crate::error::CarouselResult;

/// 瞬时无动画过渡
#[derive(Debug, Default)]
pub struct InstantTransition;

impl Transition for InstantTransition {
    fn name(&self) -> &str {
        "none"
    }

    fn is_instant(&self) -> bool {
        true
    }

    fn begin(&mut self, element: &Element, direction: TransitionDirection) -> CarouselResult<()> {
        match direction {
            TransitionDirection::In => show_element(element),
            TransitionDirection::Out => hide_element(element),
        }
        Ok(())
    }

    fn update(&mut self, _element: &Element, _dt: f32) -> CarouselResult<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_in_out() {
        let element = Element::new("section");
        let mut transition = InstantTransition;

        transition
            .begin(&element, TransitionDirection::In)
            .unwrap();
        assert_eq!(element.style("display").as_deref(), Some("block"));
        assert!(element.has_class("active"));
        assert!(!transition.update(&element, 16.0).unwrap());

        transition
            .begin(&element, TransitionDirection::Out)
            .unwrap();
        assert_eq!(element.style("display").as_deref(), Some("none"));
        assert!(!element.has_class("active"));
    }
}
