//! # 特效布局辅助
//!
//! 特效在 `prepare` 阶段需要的布局读取与样式归一化。
//! 尺寸与偏移都来自行内样式（宿主负责把真实布局同步到样式上）。

use crate::dom::{Element, parse_px};
use crate::error::{CarouselError, CarouselResult};

/// 元素自身的尺寸（样式 `width`/`height`，缺省为 0）
pub fn element_bounds(element: &Element) -> (f32, f32) {
    let width = element.style("width").as_deref().and_then(parse_px).unwrap_or(0.0);
    let height = element.style("height").as_deref().and_then(parse_px).unwrap_or(0.0);
    (width, height)
}

/// 父容器的尺寸；没有父元素时报错
pub fn parent_bounds(element: &Element) -> CarouselResult<(f32, f32)> {
    let parent = element.parent().ok_or_else(|| CarouselError::EffectFailed {
        name: "layout".to_string(),
        message: "元素没有父容器，无法测量".to_string(),
    })?;
    Ok(element_bounds(&parent))
}

/// 元素相对父容器的偏移（样式 `left`/`top`，缺省为 0）
pub fn offset_relative_to_parent(element: &Element) -> (f32, f32) {
    let x = element.style("left").as_deref().and_then(parse_px).unwrap_or(0.0);
    let y = element.style("top").as_deref().and_then(parse_px).unwrap_or(0.0);
    (x, y)
}

/// 把元素归一化为可动画状态（绝对定位、无边距、无残留变换）
///
/// 这些修改是有意持久的：位置归一化后特效才能用 transform 驱动。
pub fn normalize_element_style(element: &Element) {
    element.set_style("position", "absolute");
    element.set_style("margin", "0");
    element.remove_style("transform");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_bounds() {
        let container = Element::new("div");
        container.set_style("width", "640px");
        container.set_style("height", "360px");
        let child = Element::new("span");
        container.append_child(&child);

        assert_eq!(parent_bounds(&child).unwrap(), (640.0, 360.0));
    }

    #[test]
    fn test_parent_bounds_requires_parent() {
        let orphan = Element::new("span");
        assert!(parent_bounds(&orphan).is_err());
    }

    #[test]
    fn test_offsets_default_to_zero() {
        let element = Element::new("span");
        assert_eq!(offset_relative_to_parent(&element), (0.0, 0.0));

        element.set_style("left", "24px");
        element.set_style("top", "16");
        assert_eq!(offset_relative_to_parent(&element), (24.0, 16.0));
    }

    #[test]
    fn test_normalize_clears_transform() {
        let element = Element::new("span");
        element.set_style("transform", "scale(2)");
        normalize_element_style(&element);
        assert!(element.style("transform").is_none());
        assert_eq!(element.style("position").as_deref(), Some("absolute"));
    }
}
