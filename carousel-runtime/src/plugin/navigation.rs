//! # 箭头导航插件
//!
//! 注入前后导航箭头。手动切换后补一条 `Play`（非持久）：
//! 意图已经在播放的轮播在手动翻页后继续自动播放。
//! 导航箭头不进共享插件层，直接挂在根元素上。

use super::{Plugin, PluginContext, PluginType};
use crate::command::{ControlCommand, push_command};
use crate::dom::Element;
use crate::error::CarouselResult;

/// 导航容器的 class
pub const NAVIGATION_CLASS: &str = "carousel-navigation";

/// 前后箭头导航插件
#[derive(Debug, Default)]
pub struct ArrowNavigationPlugin;

impl ArrowNavigationPlugin {
    /// 创建插件实例
    pub fn new() -> Self {
        Self
    }

    fn arrow_button(
        ctx: &PluginContext<'_>,
        class: &str,
        label: &str,
        delta: i64,
    ) -> Element {
        let button = Element::with_class("button", class);
        button.set_attribute("aria-label", label);
        let commands = ctx.commands.clone();
        button.add_listener("click", move |_| {
            push_command(&commands, ControlCommand::Advance { delta });
            push_command(&commands, ControlCommand::Play { persist: false });
        });
        button
    }
}

impl Plugin for ArrowNavigationPlugin {
    fn name(&self) -> &str {
        "arrow-navigation"
    }

    fn plugin_type(&self) -> PluginType {
        PluginType::Navigation
    }

    fn contained(&self) -> bool {
        false
    }

    fn apply(&mut self, ctx: &PluginContext<'_>) -> CarouselResult<()> {
        let wrapper = Element::with_class("div", NAVIGATION_CLASS);
        wrapper.append_child(&Self::arrow_button(
            ctx,
            &ctx.options.button_next_class,
            "Next slide",
            1,
        ));
        wrapper.append_child(&Self::arrow_button(
            ctx,
            &ctx.options.button_prev_class,
            "Previous slide",
            -1,
        ));
        ctx.root.append_child(&wrapper);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{command_queue, drain_commands};
    use crate::options::CarouselOptions;

    #[test]
    fn test_arrows_advance_then_rearm() {
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

        ArrowNavigationPlugin::new().apply(&ctx).unwrap();

        // 不进插件层，直接挂在根元素上
        assert!(root.children().iter().any(|c| c.has_class(NAVIGATION_CLASS)));

        let next = root
            .query_selector(&format!(".{}", options.button_next_class))
            .unwrap();
        let prev = root
            .query_selector(&format!(".{}", options.button_prev_class))
            .unwrap();

        next.click();
        prev.click();

        assert_eq!(
            drain_commands(&queue),
            vec![
                ControlCommand::Advance { delta: 1 },
                ControlCommand::Play { persist: false },
                ControlCommand::Advance { delta: -1 },
                ControlCommand::Play { persist: false },
            ]
        );
    }
}
