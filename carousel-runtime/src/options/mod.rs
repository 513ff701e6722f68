//! # Options 模块
//!
//! 配置记录与解析。
//!
//! ## 配置优先级
//!
//! 1. 构建时显式传入的配置（最高）
//! 2. 根元素上的 `data-*` 属性
//! 3. 默认值（最低）
//!
//! 所有配置记录都是 serde 结构体，缺省字段由 `#[serde(default = ...)]`
//! 填充；三层合并在 [`resolve`] 子模块里以 `serde_json::Value` 完成，
//! 最终反序列化成强类型记录。没有任何进程级可变默认状态。

mod resolve;

pub use resolve::{
    extract_data_options, parse_bool, parse_scalar, resolve_carousel_options,
    resolve_slide_options, resolve_slider_options,
};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::plugin::PluginType;

/// 轮播根配置（对应构建入参与 `data-*` 属性）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselOptions {
    /// 自动前进间隔（毫秒）
    #[serde(default = "default_slide_speed")]
    pub slide_speed: f32,

    /// 是否声明为自动播放（播放意图，区别于"定时器当前是否武装"）
    #[serde(default = "default_true")]
    pub is_active: bool,

    /// 前进方向（true = 正向）
    #[serde(default = "default_true")]
    pub direction: bool,

    /// 出场动画开始到入场动画开始之间的间隔（毫秒）
    #[serde(default)]
    pub gap: f32,

    /// 过渡配置：名称 / 单配置对象 / `{in, out}` 成对配置
    #[serde(default)]
    pub transition: TransitionSpec,

    /// 附加到每张幻灯片上的 class
    #[serde(default = "default_slide_class")]
    pub slide_class: String,

    /// 幻灯片内背景图片的 class
    #[serde(default = "default_slide_image_class")]
    pub slide_image_class: String,

    /// "上一张"按钮 class
    #[serde(default = "default_button_prev_class")]
    pub button_prev_class: String,

    /// "下一张"按钮 class
    #[serde(default = "default_button_next_class")]
    pub button_next_class: String,

    /// "停止"按钮 class
    #[serde(default = "default_button_stop_class")]
    pub button_stop_class: String,

    /// 指示点/缩略图容器 class
    #[serde(default = "default_thumbnails_class")]
    pub thumbnails_class: String,

    /// 初始幻灯片索引（越界时归零）
    #[serde(default)]
    pub slide_index: usize,

    /// 插件配置（插件类型 → 注册名）
    #[serde(default)]
    pub plugins: Option<PluginSpec>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        // 空对象 + serde 默认值即为内置默认配置
        serde_json::from_value(serde_json::Value::Object(Default::default()))
            .expect("内置默认配置必定可反序列化")
    }
}

/// 识别为配置项的键（`data-*` 提取与 `update_option` 共用）
pub const CAROUSEL_OPTION_KEYS: &[&str] = &[
    "slide_speed",
    "is_active",
    "direction",
    "gap",
    "transition",
    "slide_class",
    "slide_image_class",
    "button_prev_class",
    "button_next_class",
    "button_stop_class",
    "thumbnails_class",
    "slide_index",
    "plugins",
];

/// 过渡配置的三种书写形式
///
/// 变体顺序即 untagged 匹配顺序：`Single` 靠 `TransitionOptions` 的
/// `deny_unknown_fields` 拒绝 `{in, out}` 形式的输入，再落到 `Pair`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransitionSpec {
    /// 仅名称，进出场共用
    Name(String),
    /// 单配置对象，进出场共用
    Single(TransitionOptions),
    /// 进出场分别配置
    Pair {
        #[serde(rename = "in", default)]
        transition_in: Option<TransitionOptions>,
        #[serde(rename = "out", default)]
        transition_out: Option<TransitionOptions>,
    },
}

impl Default for TransitionSpec {
    fn default() -> Self {
        TransitionSpec::Pair {
            transition_in: None,
            transition_out: None,
        }
    }
}

impl TransitionSpec {
    /// 归一化为 `(入场, 出场)` 配置对
    pub fn resolve(&self) -> (TransitionOptions, TransitionOptions) {
        match self {
            TransitionSpec::Name(name) => {
                let named = TransitionOptions {
                    name: name.clone(),
                    ..TransitionOptions::default()
                };
                (named.clone(), named)
            }
            TransitionSpec::Pair {
                transition_in,
                transition_out,
            } => (
                transition_in.clone().unwrap_or_default(),
                transition_out.clone().unwrap_or_default(),
            ),
            TransitionSpec::Single(options) => (options.clone(), options.clone()),
        }
    }
}

/// 单个过渡策略的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionOptions {
    /// 过渡名称（注册表键）
    #[serde(default = "default_transition_name")]
    pub name: String,

    /// 过渡时长（毫秒）
    #[serde(default = "default_transition_duration")]
    pub duration: f32,

    /// 过渡方向（true = 正向）
    #[serde(default = "default_true")]
    pub direction: bool,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            name: default_transition_name(),
            duration: default_transition_duration(),
            direction: true,
        }
    }
}

/// 插件配置的两种书写形式
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginSpec {
    /// `{"playback": "classic", "markers": "dots"}`
    Map(BTreeMap<PluginType, String>),
    /// 紧凑字符串：`"playback:classic,markers:dots"`，或 JSON 字符串
    Compact(String),
}

impl PluginSpec {
    /// 归一化为 插件类型 → 注册名 映射
    ///
    /// 紧凑字符串优先按 JSON 解析，失败后按 `type:key,type:key` 拆分；
    /// 无法识别的片段跳过并告警。
    pub fn resolve(&self) -> BTreeMap<PluginType, String> {
        match self {
            PluginSpec::Map(map) => map.clone(),
            PluginSpec::Compact(raw) => {
                if let Ok(map) = serde_json::from_str::<BTreeMap<PluginType, String>>(raw) {
                    return map;
                }
                let mut map = BTreeMap::new();
                for pair in raw.split(',') {
                    let mut parts = pair.splitn(2, ':');
                    let (Some(kind), Some(key)) = (parts.next(), parts.next()) else {
                        continue;
                    };
                    let (kind, key) = (kind.trim(), key.trim());
                    if kind.is_empty() || key.is_empty() {
                        continue;
                    }
                    match PluginType::parse(kind) {
                        Some(plugin_type) => {
                            map.insert(plugin_type, key.to_string());
                        }
                        None => warn!(plugin_type = kind, "未知的插件类型，已跳过"),
                    }
                }
                map
            }
        }
    }
}

/// 滑块层配置（由轮播配置归一化而来）
#[derive(Debug, Clone)]
pub struct SliderOptions {
    /// 初始索引
    pub index: usize,
    /// 幻灯片默认展示时长（毫秒）
    pub slide_duration: f32,
    /// 默认前进方向
    pub slide_direction: bool,
    /// 附加到幻灯片的 class
    pub slide_class: String,
    /// 出场/入场动画的启动间隔（毫秒）
    pub gap: f32,
    /// 入场过渡配置
    pub transition_in: TransitionOptions,
    /// 出场过渡配置
    pub transition_out: TransitionOptions,
}

/// 单张幻灯片的最终配置（滑块配置 + 幻灯片自身 `data-*` 覆盖）
#[derive(Debug, Clone)]
pub struct SlideOptions {
    /// 展示时长（毫秒）
    pub duration: f32,
    /// 附加 class
    pub class: String,
    /// 入场过渡配置
    pub transition_in: TransitionOptions,
    /// 出场过渡配置
    pub transition_out: TransitionOptions,
}

fn default_slide_speed() -> f32 {
    6000.0
}

fn default_true() -> bool {
    true
}

fn default_slide_class() -> String {
    "carousel-slide".to_string()
}

fn default_slide_image_class() -> String {
    "carousel-slide-background".to_string()
}

fn default_button_prev_class() -> String {
    "carousel-button-prev".to_string()
}

fn default_button_next_class() -> String {
    "carousel-button-next".to_string()
}

fn default_button_stop_class() -> String {
    "carousel-button-stop".to_string()
}

fn default_thumbnails_class() -> String {
    "carousel-thumbnail".to_string()
}

fn default_transition_name() -> String {
    "none".to_string()
}

fn default_transition_duration() -> f32 {
    500.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let options = CarouselOptions::default();
        assert_eq!(options.slide_speed, 6000.0);
        assert!(options.is_active);
        assert!(options.direction);
        assert_eq!(options.gap, 0.0);
        assert_eq!(options.slide_index, 0);
        assert_eq!(options.slide_class, "carousel-slide");
        assert!(options.plugins.is_none());
    }

    #[test]
    fn test_transition_spec_from_name() {
        let spec: TransitionSpec = serde_json::from_value(json!("fade")).unwrap();
        let (transition_in, transition_out) = spec.resolve();
        assert_eq!(transition_in.name, "fade");
        assert_eq!(transition_out.name, "fade");
        assert_eq!(transition_in.duration, 500.0);
    }

    #[test]
    fn test_transition_spec_from_single_object() {
        let spec: TransitionSpec =
            serde_json::from_value(json!({"name": "slide", "duration": 800.0})).unwrap();
        let (transition_in, transition_out) = spec.resolve();
        assert_eq!(transition_in.name, "slide");
        assert_eq!(transition_out.duration, 800.0);
        assert!(transition_out.direction);
    }

    #[test]
    fn test_transition_spec_from_pair() {
        let spec: TransitionSpec = serde_json::from_value(json!({
            "in": {"name": "fade"},
            "out": {"name": "slide", "direction": false}
        }))
        .unwrap();
        let (transition_in, transition_out) = spec.resolve();
        assert_eq!(transition_in.name, "fade");
        assert_eq!(transition_out.name, "slide");
        assert!(!transition_out.direction);
    }

    #[test]
    fn test_plugin_spec_compact_form() {
        let spec = PluginSpec::Compact("playback:classic, markers:dots".to_string());
        let map = spec.resolve();
        assert_eq!(map.get(&PluginType::Playback).map(String::as_str), Some("classic"));
        assert_eq!(map.get(&PluginType::Markers).map(String::as_str), Some("dots"));
    }

    #[test]
    fn test_plugin_spec_compact_json_form() {
        let spec = PluginSpec::Compact(r#"{"playback": "classic"}"#.to_string());
        let map = spec.resolve();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&PluginType::Playback).map(String::as_str), Some("classic"));
    }

    #[test]
    fn test_plugin_spec_skips_malformed_pairs() {
        let spec = PluginSpec::Compact("playback:classic,bogus,unknown:thing".to_string());
        let map = spec.resolve();
        assert_eq!(map.len(), 1);
    }
}
