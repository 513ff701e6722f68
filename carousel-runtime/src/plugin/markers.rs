//! # 圆点指示插件
//!
//! 每张幻灯片对应一个圆点；点击跳到对应索引，并订阅
//! `carousel-transition` 事件同步高亮（事件 detail 携带新索引）。
//! 注册的监听器在 `teardown` 时显式移除。

use serde_json::Value;

use super::{Plugin, PluginContext, PluginType};
use crate::command::{ControlCommand, push_command};
use crate::dom::{Element, ListenerId};
use crate::error::CarouselResult;
use crate::events::EVENT_TRANSITION;
use crate::slide::ACTIVE_CLASS;

/// 圆点容器的 class
pub const DOTS_CLASS: &str = "carousel-dots";

/// 单个圆点的 class
pub const DOT_CLASS: &str = "carousel-dot";

/// 圆点指示插件
#[derive(Debug, Default)]
pub struct DotMarkersPlugin {
    sync_listener: Option<(Element, ListenerId)>,
}

impl DotMarkersPlugin {
    /// 创建插件实例
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for DotMarkersPlugin {
    fn name(&self) -> &str {
        "dot-markers"
    }

    fn plugin_type(&self) -> PluginType {
        PluginType::Markers
    }

    fn apply(&mut self, ctx: &PluginContext<'_>) -> CarouselResult<()> {
        let wrapper = Element::with_class("div", DOTS_CLASS);
        wrapper.add_class(&ctx.options.thumbnails_class);

        let mut dots = Vec::with_capacity(ctx.slides_count);
        for index in 0..ctx.slides_count {
            let dot = Element::with_class("button", DOT_CLASS);
            dot.set_attribute("aria-label", &format!("Slide {}", index + 1));
            {
                let commands = ctx.commands.clone();
                dot.add_listener("click", move |_| {
                    push_command(&commands, ControlCommand::Goto { index });
                });
            }
            wrapper.append_child(&dot);
            dots.push(dot);
        }

        if let Some(dot) = dots.get(ctx.current_index) {
            dot.add_class(ACTIVE_CLASS);
        }

        // 切换提交后按 detail.index 同步高亮
        let listener_id = {
            let dots = dots.clone();
            ctx.root.add_listener(EVENT_TRANSITION, move |event| {
                let Value::Number(index) = &event.detail["index"] else {
                    return;
                };
                let active = index.as_u64().unwrap_or(0) as usize;
                for (i, dot) in dots.iter().enumerate() {
                    dot.toggle_class(ACTIVE_CLASS, i == active);
                }
            })
        };
        self.sync_listener = Some((ctx.root.clone(), listener_id));

        ctx.plugins_layer().append_child(&wrapper);
        Ok(())
    }

    fn teardown(&mut self) {
        if let Some((root, id)) = self.sync_listener.take() {
            root.remove_listener(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{command_queue, drain_commands};
    use crate::options::CarouselOptions;
    use serde_json::json;

    fn apply_to_fixture() -> (Element, crate::command::CommandQueue, DotMarkersPlugin) {
        let root = Element::with_class("div", "carousel");
        let options = CarouselOptions::default();
        let queue = command_queue();
        let ctx = PluginContext {
            root: &root,
            options: &options,
            slides_count: 3,
            current_index: 0,
            commands: queue.clone(),
        };
        let mut plugin = DotMarkersPlugin::new();
        plugin.apply(&ctx).unwrap();
        (root, queue, plugin)
    }

    fn dots(root: &Element) -> Vec<Element> {
        root.descendants(&|e| e.has_class(DOT_CLASS))
    }

    #[test]
    fn test_one_dot_per_slide_with_initial_active() {
        let (root, _queue, _plugin) = apply_to_fixture();
        let dots = dots(&root);
        assert_eq!(dots.len(), 3);
        assert!(dots[0].has_class(ACTIVE_CLASS));
        assert!(!dots[1].has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_dot_click_requests_goto() {
        let (root, queue, _plugin) = apply_to_fixture();
        dots(&root)[2].click();
        assert_eq!(
            drain_commands(&queue),
            vec![ControlCommand::Goto { index: 2 }]
        );
    }

    #[test]
    fn test_transition_event_syncs_active_dot() {
        let (root, _queue, _plugin) = apply_to_fixture();
        root.emit(EVENT_TRANSITION, json!({"duration": 500.0, "index": 2}));

        let dots = dots(&root);
        assert!(!dots[0].has_class(ACTIVE_CLASS));
        assert!(dots[2].has_class(ACTIVE_CLASS));
    }

    #[test]
    fn test_teardown_removes_sync_listener() {
        let (root, _queue, mut plugin) = apply_to_fixture();
        plugin.teardown();
        root.emit(EVENT_TRANSITION, json!({"duration": 500.0, "index": 2}));

        // 监听器已移除，高亮不再变化
        let dots = dots(&root);
        assert!(dots[0].has_class(ACTIVE_CLASS));
        assert!(!dots[2].has_class(ACTIVE_CLASS));
    }
}
