//! # 配置解析
//!
//! 把 `data-*` 属性、显式入参与默认值按优先级合并为强类型配置记录。

use serde_json::{Map, Value};
use tracing::warn;

use super::{
    CAROUSEL_OPTION_KEYS, CarouselOptions, SlideOptions, SliderOptions, TransitionOptions,
};
use crate::dom::Element;
use crate::error::{CarouselError, CarouselResult};

/// 把属性字符串解析成标量 JSON 值
///
/// `"true"`/`"false"` → 布尔，数字串 → 数值，其余原样返回字符串。
pub fn parse_scalar(value: &str) -> Value {
    match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            // 整数优先，slide_index 这类整型配置才能正确反序列化
            if let Ok(number) = value.parse::<i64>() {
                return Value::from(number);
            }
            if let Ok(number) = value.parse::<f64>() {
                if let Some(number) = serde_json::Number::from_f64(number) {
                    return Value::Number(number);
                }
            }
            Value::String(value.to_string())
        }
    }
}

/// 按常见书写习惯把字符串解析成布尔
///
/// `"false"`/`"0"`/`"no"`/`"off"`/空串 → `false`，其余非空 → `true`。
pub fn parse_bool(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    !["false", "0", "no", "off", ""].contains(&normalized.as_str())
}

/// 提取元素上可识别的 `data-*` 配置
///
/// 属性名中的 `-` 归一化为 `_` 后与 `allowed` 匹配
/// （`data-slide-speed` 与 `data-slide_speed` 等价）。
pub fn extract_data_options(element: &Element, allowed: &[&str]) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in element.data_attributes() {
        let normalized = key.replace('-', "_");
        if allowed.contains(&normalized.as_str()) {
            map.insert(normalized, parse_scalar(&value));
        }
    }
    map
}

/// 解析轮播根配置：显式入参 > `data-*` 属性 > 默认值
pub fn resolve_carousel_options(
    element: &Element,
    overrides: &Map<String, Value>,
) -> CarouselResult<CarouselOptions> {
    let mut merged = extract_data_options(element, CAROUSEL_OPTION_KEYS);
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }

    serde_json::from_value(Value::Object(merged))
        .map_err(|e| CarouselError::InvalidOptions(e.to_string()))
}

/// 由轮播配置归一化出滑块配置
pub fn resolve_slider_options(options: &CarouselOptions) -> SliderOptions {
    let (transition_in, transition_out) = options.transition.resolve();
    SliderOptions {
        index: options.slide_index,
        slide_duration: options.slide_speed,
        slide_direction: options.direction,
        slide_class: options.slide_class.clone(),
        gap: options.gap,
        transition_in,
        transition_out,
    }
}

/// 解析单张幻灯片的最终配置
///
/// 基线是滑块配置；幻灯片源元素上可以再覆盖：
/// - `data-duration`：展示时长；
/// - `data-transition-in` / `data-transition-out`：名称或 JSON 配置对象；
/// - `data-transitions`：`{"in": ..., "out": ...}` JSON 整体配置。
pub fn resolve_slide_options(slider: &SliderOptions, source: &Element) -> SlideOptions {
    let mut resolved = SlideOptions {
        duration: slider.slide_duration,
        class: slider.slide_class.clone(),
        transition_in: slider.transition_in.clone(),
        transition_out: slider.transition_out.clone(),
    };

    if let Some(raw) = source.data("duration") {
        match raw.parse::<f32>() {
            Ok(duration) => resolved.duration = duration,
            Err(_) => warn!(value = %raw, "data-duration 不是数字，已忽略"),
        }
    }

    if let Some(raw) = source.data("transition-in") {
        if let Some(options) = parse_transition_override(&raw) {
            resolved.transition_in = options;
        }
    }
    if let Some(raw) = source.data("transition-out") {
        if let Some(options) = parse_transition_override(&raw) {
            resolved.transition_out = options;
        }
    }

    if let Some(raw) = source.data("transitions") {
        match serde_json::from_str::<TransitionPairBlob>(&raw) {
            Ok(blob) => {
                if let Some(options) = blob.transition_in {
                    resolved.transition_in = options;
                }
                if let Some(options) = blob.transition_out {
                    resolved.transition_out = options;
                }
            }
            Err(_) => warn!(value = %raw, "data-transitions 不是合法 JSON，已忽略"),
        }
    }

    resolved
}

/// `data-transitions` 的 JSON 结构
#[derive(serde::Deserialize)]
struct TransitionPairBlob {
    #[serde(rename = "in", default)]
    transition_in: Option<TransitionOptions>,
    #[serde(rename = "out", default)]
    transition_out: Option<TransitionOptions>,
}

fn parse_transition_override(raw: &str) -> Option<TransitionOptions> {
    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        match serde_json::from_str::<TransitionOptions>(trimmed) {
            Ok(options) => Some(options),
            Err(_) => {
                warn!(value = %raw, "过渡配置不是合法 JSON，已忽略");
                None
            }
        }
    } else {
        Some(TransitionOptions {
            name: trimmed.to_string(),
            ..TransitionOptions::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn root_with_data(pairs: &[(&str, &str)]) -> Element {
        let element = Element::with_class("div", "carousel");
        for (key, value) in pairs {
            element.set_data(key, value);
        }
        element
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_scalar("true"), json!(true));
        assert_eq!(parse_scalar("false"), json!(false));
        assert_eq!(parse_scalar("42"), json!(42));
        assert_eq!(parse_scalar("2.5"), json!(2.5));
        assert_eq!(parse_scalar("fade"), json!("fade"));
    }

    #[test]
    fn test_parse_bool() {
        for falsy in ["false", "0", "no", "off", "", "  OFF "] {
            assert!(!parse_bool(falsy), "{falsy:?}");
        }
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
    }

    #[test]
    fn test_data_attributes_override_defaults() {
        let root = root_with_data(&[("slide-speed", "2500"), ("is-active", "false")]);
        let options = resolve_carousel_options(&root, &Map::new()).unwrap();
        assert_eq!(options.slide_speed, 2500.0);
        assert!(!options.is_active);
        // 未覆盖的字段保持默认
        assert!(options.direction);
    }

    #[test]
    fn test_explicit_overrides_beat_data_attributes() {
        let root = root_with_data(&[("slide-speed", "2500")]);
        let mut overrides = Map::new();
        overrides.insert("slide_speed".to_string(), json!(100));
        let options = resolve_carousel_options(&root, &overrides).unwrap();
        assert_eq!(options.slide_speed, 100.0);
    }

    #[test]
    fn test_unrecognized_data_attributes_are_ignored() {
        let root = root_with_data(&[("effect", "glow"), ("slide-speed", "300")]);
        let options = resolve_carousel_options(&root, &Map::new()).unwrap();
        assert_eq!(options.slide_speed, 300.0);
    }

    #[test]
    fn test_invalid_option_type_is_a_construction_error() {
        let mut overrides = Map::new();
        overrides.insert("slide_index".to_string(), json!("not-a-number"));
        let root = root_with_data(&[]);
        assert!(resolve_carousel_options(&root, &overrides).is_err());
    }

    #[test]
    fn test_slider_options_from_carousel_options() {
        let mut overrides = Map::new();
        overrides.insert("transition".to_string(), json!("fade"));
        overrides.insert("gap".to_string(), json!(120));
        let root = root_with_data(&[]);
        let options = resolve_carousel_options(&root, &overrides).unwrap();

        let slider = resolve_slider_options(&options);
        assert_eq!(slider.gap, 120.0);
        assert_eq!(slider.transition_in.name, "fade");
        assert_eq!(slider.transition_out.name, "fade");
        assert_eq!(slider.slide_duration, 6000.0);
    }

    #[test]
    fn test_slide_options_data_overrides() {
        let options = CarouselOptions::default();
        let slider = resolve_slider_options(&options);

        let source = Element::new("section");
        source.set_data("duration", "1234");
        source.set_data("transition-in", "fade");
        source.set_data("transition-out", r#"{"name": "slide", "duration": 250}"#);

        let slide = resolve_slide_options(&slider, &source);
        assert_eq!(slide.duration, 1234.0);
        assert_eq!(slide.transition_in.name, "fade");
        assert_eq!(slide.transition_out.name, "slide");
        assert_eq!(slide.transition_out.duration, 250.0);
    }

    #[test]
    fn test_slide_options_transitions_blob() {
        let options = CarouselOptions::default();
        let slider = resolve_slider_options(&options);

        let source = Element::new("section");
        source.set_data(
            "transitions",
            r#"{"in": {"name": "fade"}, "out": {"name": "none"}}"#,
        );

        let slide = resolve_slide_options(&slider, &source);
        assert_eq!(slide.transition_in.name, "fade");
        assert_eq!(slide.transition_out.name, "none");
    }

    #[test]
    fn test_malformed_slide_overrides_fall_back() {
        let options = CarouselOptions::default();
        let slider = resolve_slider_options(&options);

        let source = Element::new("section");
        source.set_data("duration", "soon");
        source.set_data("transitions", "{broken json");

        let slide = resolve_slide_options(&slider, &source);
        assert_eq!(slide.duration, slider.slide_duration);
        assert_eq!(slide.transition_in.name, slider.transition_in.name);
    }
}
