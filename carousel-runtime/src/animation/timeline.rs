//! # Timeline 模块
//!
//! 单个标量从 `from` 到 `to` 在 `duration` 毫秒内变化的时间轴。
//!
//! 时长与延迟均以**毫秒**计（与配置层的 `slide_speed`/`gap` 同单位）。
//! 可选的启动延迟 `delay` 是滑块 `gap` 和特效 `wait` 的底层实现。

use super::Easing;

/// 时间轴状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineState {
    /// 等待开始（延迟期）
    #[default]
    Pending,
    /// 正在播放
    Playing,
    /// 已完成
    Completed,
    /// 已跳过
    Skipped,
}

impl TimelineState {
    /// 是否为活跃状态（需要更新）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Playing)
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// 标量时间轴
#[derive(Debug, Clone)]
pub struct Timeline {
    /// 起始值
    pub from: f32,
    /// 目标值
    pub to: f32,
    /// 动画时长（毫秒）
    pub duration: f32,
    /// 延迟启动（毫秒）
    pub delay: f32,
    /// 缓动函数
    pub easing: Easing,
    /// 当前状态
    pub state: TimelineState,
    /// 当前进度（0.0 - 1.0，已应用缓动）
    pub progress: f32,
    elapsed: f32,
}

impl Timeline {
    /// 创建新的时间轴；时长为 0 时立即完成
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        let state = if duration <= 0.0 {
            TimelineState::Completed
        } else {
            TimelineState::Pending
        };

        Self {
            from,
            to,
            duration: duration.max(0.0),
            delay: 0.0,
            easing: Easing::default(),
            state,
            progress: if state == TimelineState::Completed { 1.0 } else { 0.0 },
            elapsed: 0.0,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// 设置启动延迟
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        if self.delay > 0.0 && self.state == TimelineState::Completed {
            // 零时长但带延迟：延迟结束后才算完成
            self.state = TimelineState::Pending;
            self.progress = 0.0;
        }
        self
    }

    /// 更新时间轴
    ///
    /// # 返回
    /// - `true`: 仍在进行中
    /// - `false`: 已结束
    pub fn update(&mut self, dt: f32) -> bool {
        match self.state {
            TimelineState::Pending => {
                self.elapsed += dt;
                if self.elapsed >= self.delay {
                    self.state = TimelineState::Playing;
                    let overshoot = self.elapsed - self.delay;
                    self.elapsed = overshoot;
                    self.update_playing(overshoot)
                } else {
                    true
                }
            }
            TimelineState::Playing => {
                self.elapsed += dt;
                self.update_playing(self.elapsed)
            }
            TimelineState::Completed | TimelineState::Skipped => false,
        }
    }

    fn update_playing(&mut self, elapsed: f32) -> bool {
        if self.duration <= 0.0 {
            self.progress = 1.0;
            self.state = TimelineState::Completed;
            return false;
        }

        let raw_progress = elapsed / self.duration;
        if raw_progress >= 1.0 {
            self.progress = 1.0;
            self.state = TimelineState::Completed;
            false
        } else {
            self.progress = self.easing.apply(raw_progress);
            true
        }
    }

    /// 跳到终点
    pub fn skip(&mut self) {
        if self.state.is_active() {
            self.progress = 1.0;
            self.state = TimelineState::Skipped;
        }
    }

    /// 当前插值
    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeline_lifecycle() {
        let mut tl = Timeline::new(0.0, 1.0, 1000.0).with_easing(Easing::Linear);
        assert_eq!(tl.state, TimelineState::Pending);

        assert!(tl.update(100.0));
        assert_eq!(tl.state, TimelineState::Playing);

        assert!(tl.update(400.0));
        let value = tl.value();
        assert!(value > 0.0 && value < 1.0);

        assert!(!tl.update(600.0));
        assert_eq!(tl.state, TimelineState::Completed);
        assert_eq!(tl.value(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let tl = Timeline::new(0.0, 1.0, 0.0);
        assert_eq!(tl.state, TimelineState::Completed);
        assert_eq!(tl.value(), 1.0);
    }

    #[test]
    fn test_delay_holds_pending_state() {
        let mut tl = Timeline::new(0.0, 1.0, 100.0).with_delay(50.0);

        assert!(tl.update(30.0));
        assert_eq!(tl.state, TimelineState::Pending);
        assert_eq!(tl.value(), 0.0);

        // 跨过延迟边界，多出的时间计入播放
        assert!(tl.update(70.0));
        assert_eq!(tl.state, TimelineState::Playing);
        assert!(tl.value() > 0.0);
    }

    #[test]
    fn test_zero_duration_with_delay_waits_out_the_delay() {
        let mut tl = Timeline::new(0.0, 1.0, 0.0).with_delay(40.0);
        assert!(tl.update(20.0));
        assert!(!tl.update(30.0));
        assert_eq!(tl.value(), 1.0);
    }

    #[test]
    fn test_skip_jumps_to_end() {
        let mut tl = Timeline::new(2.0, 6.0, 500.0);
        tl.update(50.0);
        tl.skip();
        assert_eq!(tl.state, TimelineState::Skipped);
        assert_eq!(tl.value(), 6.0);
        assert!(!tl.update(10.0));
    }
}
