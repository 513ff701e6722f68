//! # Plugin Registry
//!
//! (插件类型, 注册名) → 插件工厂 的注册表。
//! 解析未命中是硬错误（[`CarouselError::PluginNotFound`]）。

use std::collections::BTreeMap;

use super::{ArrowNavigationPlugin, ClassicPlaybackPlugin, DotMarkersPlugin, Plugin, PluginType};
use crate::error::{CarouselError, CarouselResult};

/// 插件工厂
pub type PluginFactory = Box<dyn Fn() -> Box<dyn Plugin>>;

/// 插件注册表
pub struct PluginRegistry {
    factories: BTreeMap<(PluginType, String), PluginFactory>,
}

impl PluginRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// 创建带内置插件的注册表
    ///
    /// - `playback.classic`：播放/停止按钮
    /// - `markers.dots`：圆点指示
    /// - `navigation.arrows`：前后箭头
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(PluginType::Playback, "classic", || {
            Box::new(ClassicPlaybackPlugin::new())
        });
        registry.register(PluginType::Markers, "dots", || {
            Box::new(DotMarkersPlugin::new())
        });
        registry.register(PluginType::Navigation, "arrows", || {
            Box::new(ArrowNavigationPlugin::new())
        });
        registry
    }

    /// 注册插件工厂（同键覆盖）
    pub fn register(
        &mut self,
        plugin_type: PluginType,
        key: &str,
        factory: impl Fn() -> Box<dyn Plugin> + 'static,
    ) {
        self.factories
            .insert((plugin_type, key.to_string()), Box::new(factory));
    }

    /// 注销插件，返回是否存在
    pub fn unregister(&mut self, plugin_type: PluginType, key: &str) -> bool {
        self.factories
            .remove(&(plugin_type, key.to_string()))
            .is_some()
    }

    /// 解析插件实例；未命中报错
    pub fn resolve(&self, plugin_type: PluginType, key: &str) -> CarouselResult<Box<dyn Plugin>> {
        self.factories
            .get(&(plugin_type, key.to_string()))
            .map(|factory| factory())
            .ok_or_else(|| CarouselError::PluginNotFound {
                plugin_type: plugin_type.to_string(),
                key: key.to_string(),
            })
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("keys", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
