//! # Error 模块
//!
//! 定义 carousel-runtime 中使用的错误类型。
//!
//! 错误分为两类：
//! - **构建期错误**：根元素缺失、容器缺失、配置无效、插件未注册。
//!   同步抛出并中止构建，不会返回半初始化的实例。
//! - **运行期策略错误**：过渡/特效在播放途中失败。这类错误不会
//!   传播到 `advance()` 的调用方，而是记录日志后吞掉（保活优先），
//!   详见 [`crate::slider`]。

use thiserror::Error;

/// carousel-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CarouselError {
    /// 构建失败（包装底层错误信息）
    #[error("轮播构建失败: {0}")]
    Construction(String),

    /// 选择器未匹配到根元素
    #[error("选择器 '{selector}' 未匹配到任何元素")]
    RootNotFound { selector: String },

    /// 根元素下缺少内容容器
    #[error("缺少 .carousel-container 容器元素")]
    MissingContainer,

    /// 幻灯片索引越界
    #[error("slide index {index} is out of bounds（共 {count} 张）")]
    SlideOutOfBounds { index: usize, count: usize },

    /// 配置项无法解析
    #[error("配置解析失败: {0}")]
    InvalidOptions(String),

    /// 显式配置的插件未注册（配置错误，直接失败）
    #[error("插件未找到: {plugin_type}.{key}")]
    PluginNotFound { plugin_type: String, key: String },

    /// 过渡策略执行失败
    #[error("过渡 '{name}' 执行失败: {message}")]
    TransitionFailed { name: String, message: String },

    /// 特效策略执行失败
    #[error("特效 '{name}' 执行失败: {message}")]
    EffectFailed { name: String, message: String },
}

/// Result 类型别名
pub type CarouselResult<T> = Result<T, CarouselError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message_contains_index() {
        let err = CarouselError::SlideOutOfBounds { index: 999, count: 3 };
        let message = err.to_string();
        assert!(message.contains("999"));
        assert!(message.contains("out of bounds"));
    }

    #[test]
    fn test_construction_wraps_inner_message() {
        let inner = CarouselError::MissingContainer;
        let err = CarouselError::Construction(inner.to_string());
        assert!(err.to_string().contains("carousel-container"));
    }
}
