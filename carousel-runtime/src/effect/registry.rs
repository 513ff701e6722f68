//! # Effect Registry
//!
//! 名称 → 特效工厂 的注册表。
//!
//! 与过渡不同，特效解析未命中返回 `None`（由调用方跳过并告警），
//! 因为缺失的特效直接不绑定即可，不需要占位实例。

use std::collections::BTreeMap;

use super::{BounceInEffect, Effect, GlowEffect, KenBurnsEffect};

/// 特效工厂
pub type EffectFactory = Box<dyn Fn() -> Box<dyn Effect>>;

/// 特效注册表
pub struct EffectRegistry {
    factories: BTreeMap<String, EffectFactory>,
}

impl EffectRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// 创建带内置特效（`ken-burns`/`bounce-in`/`glow`）的注册表
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("ken-burns", || Box::new(KenBurnsEffect::new()));
        registry.register("bounce-in", || Box::new(BounceInEffect::new()));
        registry.register("glow", || Box::new(GlowEffect::new()));
        registry
    }

    /// 注册特效工厂（同名覆盖）
    pub fn register(&mut self, name: &str, factory: impl Fn() -> Box<dyn Effect> + 'static) {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    /// 注销特效，返回是否存在
    pub fn unregister(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// 按名称解析特效实例
    pub fn resolve(&self, name: &str) -> Option<Box<dyn Effect>> {
        self.factories.get(name).map(|factory| factory())
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectRegistry")
            .field("names", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
