//! # Extensions 模块
//!
//! 过渡/特效/插件三个注册表的打包。
//!
//! 注册表随构建显式传入（默认携带内置策略），不存在进程级的
//! 可变注册状态；自定义扩展在构建前注册到自己的 `Extensions` 上。

use crate::effect::EffectRegistry;
use crate::plugin::PluginRegistry;
use crate::transition::TransitionRegistry;

/// 扩展注册表集合
#[derive(Debug, Default)]
pub struct Extensions {
    /// 过渡注册表
    pub transitions: TransitionRegistry,
    /// 特效注册表
    pub effects: EffectRegistry,
    /// 插件注册表
    pub plugins: PluginRegistry,
}

impl Extensions {
    /// 携带全部内置策略的扩展集合
    pub fn with_builtins() -> Self {
        Self::default()
    }
}
