//! # Visibility 模块
//!
//! 可见性驱动的播放控制。
//!
//! 观察三路独立信号：根元素与视口的交叠（宿主按 ~10% 阈值上报）、
//! 页面可见性（标签页隐藏/显示）、窗口焦点。任一信号表明"不可见"
//! 即请求非持久暂停（不覆盖用户声明的播放意图）；重新可见时请求
//! 恢复，门面只在 `is_active && 未在播放 && 缓存可见` 时才真正恢复
//! ——焦点回来但元素仍滚出视口时不会误启动。
//!
//! 控制器**不持有**播放门面：它把信号翻译成 [`VisibilityAction`]，
//! 由门面执行自己的 play/pause 契约。`disconnect` 幂等，断开后的
//! 信号一律忽略。

/// 可见性信号翻译出的播放动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityAction {
    /// 请求非持久暂停
    Pause,
    /// 请求按播放意图恢复
    Resume,
}

/// 可见性控制器
#[derive(Debug)]
pub struct VisibilityController {
    /// 根元素是否与视口交叠（仅由交叠信号更新的本地缓存）
    intersecting: bool,
    connected: bool,
}

impl VisibilityController {
    /// 创建控制器；初始视为可见、已连接
    pub fn new() -> Self {
        Self {
            intersecting: true,
            connected: true,
        }
    }

    /// 交叠信号：更新缓存并给出动作
    pub fn intersection_changed(&mut self, intersecting: bool) -> Option<VisibilityAction> {
        if !self.connected {
            return None;
        }
        self.intersecting = intersecting;
        Some(if intersecting {
            VisibilityAction::Resume
        } else {
            VisibilityAction::Pause
        })
    }

    /// 页面可见性信号（标签页隐藏/显示）
    ///
    /// 页面重新可见只在元素本身仍与视口交叠时请求恢复。
    pub fn page_visibility_changed(&mut self, visible: bool) -> Option<VisibilityAction> {
        if !self.connected {
            return None;
        }
        if !visible {
            Some(VisibilityAction::Pause)
        } else if self.intersecting {
            Some(VisibilityAction::Resume)
        } else {
            None
        }
    }

    /// 窗口焦点信号
    ///
    /// 失焦请求暂停；回焦请求恢复（门面侧仍会用缓存可见性把关）。
    pub fn focus_changed(&mut self, focused: bool) -> Option<VisibilityAction> {
        if !self.connected {
            return None;
        }
        Some(if focused {
            VisibilityAction::Resume
        } else {
            VisibilityAction::Pause
        })
    }

    /// 缓存的可见状态
    pub fn is_visible(&self) -> bool {
        self.intersecting
    }

    /// 断开观察；幂等，可重复调用
    pub fn disconnect(&mut self) {
        self.connected = false;
    }

    /// 是否仍在观察
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

impl Default for VisibilityController {
    fn default() -> Self {
        Self::new()
    }
}
