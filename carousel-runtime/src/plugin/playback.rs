//! # 经典播放控制插件
//!
//! 在插件层注入播放/停止两个按钮。点击走指令队列并携带 persist
//! 标记——用户按下按钮是对播放意图的显式表态，会更新 `is_active`。

use super::{Plugin, PluginContext, PluginType};
use crate::command::{ControlCommand, push_command};
use crate::dom::Element;
use crate::error::CarouselResult;

/// 播放控制按钮容器的 class
pub const PLAYBACK_CLASS: &str = "carousel-playback";

/// 播放按钮的 class
pub const PLAY_BUTTON_CLASS: &str = "carousel-play-button";

/// 经典播放/停止按钮插件
#[derive(Debug, Default)]
pub struct ClassicPlaybackPlugin;

impl ClassicPlaybackPlugin {
    /// 创建插件实例
    pub fn new() -> Self {
        Self
    }
}

impl Plugin for ClassicPlaybackPlugin {
    fn name(&self) -> &str {
        "classic-playback"
    }

    fn plugin_type(&self) -> PluginType {
        PluginType::Playback
    }

    fn apply(&mut self, ctx: &PluginContext<'_>) -> CarouselResult<()> {
        let wrapper = Element::with_class("div", PLAYBACK_CLASS);

        let play = Element::with_class("a", PLAY_BUTTON_CLASS);
        play.set_attribute("aria-label", "Play");
        {
            let commands = ctx.commands.clone();
            play.add_listener("click", move |_| {
                push_command(&commands, ControlCommand::Play { persist: true });
            });
        }
        wrapper.append_child(&play);

        let stop = Element::with_class("a", &ctx.options.button_stop_class);
        stop.set_attribute("aria-label", "Stop");
        {
            let commands = ctx.commands.clone();
            stop.add_listener("click", move |_| {
                push_command(&commands, ControlCommand::Pause { persist: true });
            });
        }
        wrapper.append_child(&stop);

        ctx.plugins_layer().append_child(&wrapper);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{command_queue, drain_commands};
    use crate::options::CarouselOptions;

    #[test]
    fn test_buttons_push_persistent_commands() {
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

        ClassicPlaybackPlugin::new().apply(&ctx).unwrap();

        let play = root.query_selector(&format!(".{PLAY_BUTTON_CLASS}")).unwrap();
        let stop = root
            .query_selector(&format!(".{}", options.button_stop_class))
            .unwrap();

        play.click();
        stop.click();

        assert_eq!(
            drain_commands(&queue),
            vec![
                ControlCommand::Play { persist: true },
                ControlCommand::Pause { persist: true },
            ]
        );
    }
}
