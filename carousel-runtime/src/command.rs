//! # Command 模块
//!
//! 插件 UI 与播放门面之间的指令通道。
//!
//! 插件注入的按钮不直接调用门面方法（监听回调里重入门面会打破
//! 借用纪律），而是把指令排进共享队列，由门面在每个 tick 开头
//! 统一消费。按钮与门面之间只剩这一条显式的发布/订阅通道。

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// 用户/插件发往播放门面的指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// 开始自动播放；`persist` 为真时同步更新播放意图
    Play { persist: bool },
    /// 暂停自动播放；`persist` 为真时同步更新播放意图
    Pause { persist: bool },
    /// 相对切换
    Advance { delta: i64 },
    /// 跳到指定幻灯片
    Goto { index: usize },
}

/// 共享指令队列
pub type CommandQueue = Rc<RefCell<VecDeque<ControlCommand>>>;

/// 创建空指令队列
pub fn command_queue() -> CommandQueue {
    Rc::new(RefCell::new(VecDeque::new()))
}

/// 入队一条指令
pub fn push_command(queue: &CommandQueue, command: ControlCommand) {
    queue.borrow_mut().push_back(command);
}

/// 取空队列
pub fn drain_commands(queue: &CommandQueue) -> Vec<ControlCommand> {
    queue.borrow_mut().drain(..).collect()
}
