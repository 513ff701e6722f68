//! # Transition Registry
//!
//! 名称 → 过渡工厂 的注册表。
//!
//! 注册表是实例而非进程级全局状态：内置一套默认策略，
//! 随 [`crate::extensions::Extensions`] 在构建期显式传入。
//! 解析未命中时降级为瞬时过渡并告警，不会失败。

use std::collections::BTreeMap;

use tracing::warn;

use super::{FadeTransition, InstantTransition, SlideTransition, Transition};
use crate::options::TransitionOptions;

/// 过渡工厂
pub type TransitionFactory = Box<dyn Fn(&TransitionOptions) -> Box<dyn Transition>>;

/// 过渡注册表
pub struct TransitionRegistry {
    factories: BTreeMap<String, TransitionFactory>,
}

impl TransitionRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// 创建带内置策略（`none`/`fade`/`slide`）的注册表
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("none", |_| Box::new(InstantTransition));
        registry.register("fade", |options| Box::new(FadeTransition::new(options)));
        registry.register("slide", |options| Box::new(SlideTransition::new(options)));
        registry
    }

    /// 注册过渡工厂（同名覆盖）
    pub fn register(
        &mut self,
        name: &str,
        factory: impl Fn(&TransitionOptions) -> Box<dyn Transition> + 'static,
    ) {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// 注销过渡，返回是否存在
    pub fn unregister(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// 按配置解析过渡实例；未命中降级为瞬时过渡
    pub fn resolve(&self, options: &TransitionOptions) -> Box<dyn Transition> {
        match self.factories.get(&options.name) {
            Some(factory) => factory(options),
            None => {
                warn!(transition = %options.name, "未注册的过渡，降级为瞬时切换");
                Box::new(InstantTransition)
            }
        }
    }
}

impl Default for TransitionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for TransitionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> TransitionOptions {
        TransitionOptions {
            name: name.to_string(),
            ..TransitionOptions::default()
        }
    }

    #[test]
    fn test_builtins_resolve_by_name() {
        let registry = TransitionRegistry::with_builtins();
        assert_eq!(registry.resolve(&named("fade")).name(), "fade");
        assert_eq!(registry.resolve(&named("slide")).name(), "slide");
        assert!(registry.resolve(&named("none")).is_instant());
    }

    #[test]
    fn test_unknown_name_falls_back_to_instant() {
        let registry = TransitionRegistry::with_builtins();
        let transition = registry.resolve(&named("wormhole"));
        assert_eq!(transition.name(), "none");
        assert!(transition.is_instant());
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = TransitionRegistry::new();
        registry.register("custom", |_| Box::new(InstantTransition));
        assert_eq!(registry.resolve(&named("custom")).name(), "none");

        assert!(registry.unregister("custom"));
        assert!(!registry.unregister("custom"));
    }
}
