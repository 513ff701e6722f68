//! # Pulsating Glow 特效
//!
//! 给元素叠加霓虹式脉动辉光（文字阴影与/或盒阴影的多层扩散），
//! 以无限交替动画的形式持续存在——这是一个**持久**特效，
//! `reset_effects` 不会清除它。
//!
//! 可通过目标元素上的 `data-*` 调整：
//! - `data-glow-font` / `data-glow-border`：启用文字/边框辉光
//! - `data-font-glow-color` / `data-box-glow-color`：颜色
//!   （`"r, g, b"`、`rgb(...)` 或 hex）
//! - `data-intensity`：辉光强度（0-1）
//! - `data-blur-increment`：每层阴影的模糊增量（像素）
//! - `data-duration`：单次脉动时长（毫秒）

use super::Effect;
use crate::dom::Element;
use crate::error::{CarouselError, CarouselResult};
use crate::options::parse_bool;

const DEFAULT_INTENSITY: f32 = 0.6;
const DEFAULT_BLUR_INCREMENT: f32 = 6.0;
const DEFAULT_DURATION_MS: f32 = 1500.0;
const DEFAULT_COLOR: &str = "255, 255, 255";
const SHADOW_STEPS: usize = 3;
const ANIMATION_NAME: &str = "carousel-glow";

/// RGB 颜色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

/// 解析常见颜色书写：`"188, 19, 254"`、`"rgb(188 19 254)"`、
/// `"#bc13fe"`、`"bc13fe"`、`"#c3e"`、`"c3e"`
pub(crate) fn resolve_to_rgb(input: &str) -> CarouselResult<Rgb> {
    let input = input.trim();

    let components: Vec<&str> = if input.starts_with("rgb") {
        input
            .trim_start_matches("rgb")
            .trim_matches(|c| c == '(' || c == ')')
            .split([',', ' '])
            .filter(|s| !s.is_empty())
            .collect()
    } else if input.contains(',') {
        input.split(',').map(str::trim).collect()
    } else {
        Vec::new()
    };

    if components.len() == 3 {
        let parsed: Vec<u8> = components
            .iter()
            .filter_map(|c| c.trim().parse().ok())
            .collect();
        if let [r, g, b] = parsed[..] {
            return Ok(Rgb { r, g, b });
        }
    }

    let hex = input.strip_prefix('#').unwrap_or(input);
    let hex = if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        hex.chars().flat_map(|c| [c, c]).collect::<String>()
    } else {
        hex.to_string()
    };
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(Rgb {
            r: u8::from_str_radix(&hex[0..2], 16).unwrap_or(0),
            g: u8::from_str_radix(&hex[2..4], 16).unwrap_or(0),
            b: u8::from_str_radix(&hex[4..6], 16).unwrap_or(0),
        });
    }

    Err(CarouselError::EffectFailed {
        name: "glow".to_string(),
        message: format!("无法识别的颜色: {input}"),
    })
}

/// 逐层放大模糊半径、递减不透明度，拼出辉光阴影串
fn shadow_steps(color: Rgb, intensity: f32, blur_increment: f32) -> String {
    (0..SHADOW_STEPS)
        .map(|i| {
            let blur = (i + 1) as f32 * blur_increment * intensity;
            let opacity = (1.0 - i as f32 * 0.2).max(0.0);
            format!(
                "0 0 {blur:.1}px rgba({}, {}, {}, {opacity:.2})",
                color.r, color.g, color.b
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// 脉动辉光特效（持久）
#[derive(Debug, Default)]
pub struct GlowEffect;

impl GlowEffect {
    /// 创建特效实例；参数在 `begin` 时从目标元素解析
    pub fn new() -> Self {
        Self
    }

    fn data_number(element: &Element, key: &str, fallback: f32) -> f32 {
        element
            .data(key)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(fallback)
    }

    fn data_flag(element: &Element, key: &str, fallback: bool) -> bool {
        element
            .data(key)
            .map(|raw| parse_bool(&raw))
            .unwrap_or(fallback)
    }
}

impl Effect for GlowEffect {
    fn name(&self) -> &str {
        "glow"
    }

    fn is_persistent(&self) -> bool {
        true
    }

    fn begin(&mut self, element: &Element) -> CarouselResult<()> {
        let glow_font = Self::data_flag(element, "glow-font", true);
        let glow_border = Self::data_flag(element, "glow-border", true);
        let intensity = Self::data_number(element, "intensity", DEFAULT_INTENSITY);
        let blur_increment = Self::data_number(element, "blur-increment", DEFAULT_BLUR_INCREMENT);
        let duration = Self::data_number(element, "duration", DEFAULT_DURATION_MS);

        if glow_font {
            let color = element
                .data("font-glow-color")
                .unwrap_or_else(|| DEFAULT_COLOR.to_string());
            element.set_style(
                "text-shadow",
                &shadow_steps(resolve_to_rgb(&color)?, intensity, blur_increment),
            );
        }
        if glow_border {
            let color = element
                .data("box-glow-color")
                .unwrap_or_else(|| DEFAULT_COLOR.to_string());
            element.set_style(
                "box-shadow",
                &shadow_steps(resolve_to_rgb(&color)?, intensity, blur_increment),
            );
        }

        element.set_style(
            "animation",
            &format!("{ANIMATION_NAME} {duration:.0}ms infinite alternate"),
        );
        element.set_style("will-change", "opacity, box-shadow, text-shadow");
        Ok(())
    }

    fn update(&mut self, _element: &Element, _dt: f32) -> CarouselResult<bool> {
        // 辉光以无限动画的形式驻留，启动即视为完成
        Ok(false)
    }

    fn reset(&mut self, element: &Element) {
        element.remove_style("animation");
        element.remove_style("will-change");
        element.remove_style("text-shadow");
        element.remove_style("box-shadow");
    }
}
