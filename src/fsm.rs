use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::config::ButtonConfig;
use crate::event::{ButtonEvent, Ordinal};

/// 单次轮询最多产生的事件数（计数模式下的一次释放：`Release`、`Click`、`CountComplete`）。
pub const MAX_EVENTS_PER_POLL: usize = 4;

/// 一次轮询产生的事件，按触发顺序排列。
pub type Events = Vec<ButtonEvent, MAX_EVENTS_PER_POLL>;

/// 检测器的状态。
///
/// 每个状态自己携带进入时记录的时间戳，离开状态后时间戳随之消失，
/// 所以不会读到过期的计时器。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Idle,
    /// 等待有效电平稳定。`gap` 是上一个点击间隔开始的时刻，
    /// 消抖失败时回到那个间隔继续等待。
    Debounce {
        ordinal: Ordinal,
        start: Instant,
        gap: Option<Instant>,
    },
    ShortWindow {
        ordinal: Ordinal,
        start: Instant,
    },
    LongWindow {
        ordinal: Ordinal,
        start: Instant,
        long_fired: bool,
    },
    /// 释放之后等待下一次按下。`ordinal` 是已经完成的那一次点击。
    InterClickGap {
        ordinal: Ordinal,
        start: Instant,
    },
    CountingRelease,
    /// 计数序列在按住期间超时，等待释放。
    CountExpired,
}

impl DetectorState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DetectorState::Idle)
    }
}

/// 轮询式按钮模式检测器。
///
/// 它不读取引脚也不持有时钟：调用者传入已经换算过极性的电平和当前时间，
/// 检测器推进状态机并返回这一步产生的事件。
#[derive(Debug, Clone)]
pub struct Detector {
    config: ButtonConfig,
    state: DetectorState,
    clicks: u16,
    sequence_start: Instant,
    last_hold: Duration,
}

fn push(events: &mut Events, event: ButtonEvent) {
    #[cfg(feature = "defmt")]
    defmt::trace!("button event: {}", event);
    // 容量按单步最多事件数设定
    let _ = events.push(event);
}

impl Detector {
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            state: DetectorState::Idle,
            clicks: 0,
            sequence_start: Instant::from_ticks(0),
            last_hold: Duration::from_ticks(0),
        }
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ButtonConfig {
        &mut self.config
    }

    pub fn set_config(&mut self, config: ButtonConfig) {
        self.config = config;
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// 当前计数序列中已完成的点击次数。
    pub fn click_count(&self) -> u16 {
        self.clicks
    }

    /// 最近一次完成的长按窗口持续时间：从 `ShortPressStart` 到松开。
    pub fn pressed_duration(&self) -> Duration {
        self.last_hold
    }

    /// 丢弃进行中的序列，回到初始状态。配置和上一次按住时长保持不变。
    pub fn reset(&mut self) {
        self.state = DetectorState::Idle;
        self.clicks = 0;
    }

    /// 用一个采样推进状态机。
    ///
    /// * `active`: 按钮是否处于按下电平（已经考虑了极性）。
    /// * `now`: 当前的单调时间。
    pub fn step(&mut self, active: bool, now: Instant) -> Events {
        let mut events = Events::new();
        let cfg = self.config;

        let next = match self.state {
            DetectorState::Idle => {
                if self.clicks > 0 {
                    if !cfg.count_mode {
                        self.clicks = 0;
                    } else if now.saturating_duration_since(self.sequence_start) >= cfg.count_timeout {
                        self.clicks = 0;
                        push(&mut events, ButtonEvent::CountTimeout);
                    }
                }
                if active {
                    DetectorState::Debounce {
                        ordinal: Ordinal::First,
                        start: now,
                        gap: None,
                    }
                } else {
                    DetectorState::Idle
                }
            }

            DetectorState::Debounce { ordinal, start, gap } => {
                if !active {
                    // 抖动：回到上一个间隔，第一次按下则回到空闲
                    match (ordinal.previous(), gap) {
                        (Some(previous), Some(gap_start)) => DetectorState::InterClickGap {
                            ordinal: previous,
                            start: gap_start,
                        },
                        _ => DetectorState::Idle,
                    }
                } else if now.saturating_duration_since(start) < cfg.debounce {
                    self.state
                } else if ordinal != Ordinal::First {
                    DetectorState::ShortWindow { ordinal, start: now }
                } else {
                    push(&mut events, ButtonEvent::Press);
                    if cfg.count_mode {
                        if self.clicks == 0 {
                            self.sequence_start = now;
                        }
                        DetectorState::CountingRelease
                    } else {
                        DetectorState::ShortWindow { ordinal, start: now }
                    }
                }
            }

            DetectorState::ShortWindow { ordinal, start } => {
                if !active {
                    match ordinal {
                        Ordinal::First => {
                            push(&mut events, ButtonEvent::Release);
                            DetectorState::InterClickGap { ordinal, start: now }
                        }
                        Ordinal::Second if cfg.triple_click => {
                            DetectorState::InterClickGap { ordinal, start: now }
                        }
                        _ => {
                            push(&mut events, ButtonEvent::click(ordinal));
                            DetectorState::Idle
                        }
                    }
                } else if now.saturating_duration_since(start) >= cfg.short_press_time {
                    push(&mut events, ButtonEvent::short_press_start(ordinal));
                    DetectorState::LongWindow {
                        ordinal,
                        start: now,
                        long_fired: false,
                    }
                } else {
                    self.state
                }
            }

            DetectorState::LongWindow {
                ordinal,
                start,
                long_fired,
            } => {
                if !active {
                    self.last_hold = now.saturating_duration_since(start);
                    if ordinal == Ordinal::First {
                        push(&mut events, ButtonEvent::Release);
                    }
                    push(&mut events, ButtonEvent::long_press_stop(ordinal));
                    DetectorState::Idle
                } else if now.saturating_duration_since(start) >= cfg.long_press_time
                    && (!long_fired || cfg.long_press_repeat)
                {
                    push(&mut events, ButtonEvent::long_press_start(ordinal));
                    DetectorState::LongWindow {
                        ordinal,
                        start,
                        long_fired: true,
                    }
                } else {
                    self.state
                }
            }

            DetectorState::InterClickGap { ordinal, start } => {
                if now.saturating_duration_since(start) > cfg.multi_click_window {
                    push(&mut events, ButtonEvent::click(ordinal));
                    DetectorState::Idle
                } else if active {
                    match ordinal.next() {
                        Some(next) => DetectorState::Debounce {
                            ordinal: next,
                            start: now,
                            gap: Some(start),
                        },
                        None => self.state,
                    }
                } else {
                    self.state
                }
            }

            DetectorState::CountingRelease => {
                let elapsed = now.saturating_duration_since(self.sequence_start);
                if !active {
                    push(&mut events, ButtonEvent::Release);
                    if elapsed < cfg.count_timeout {
                        self.clicks = self.clicks.saturating_add(1);
                        push(&mut events, ButtonEvent::Click);
                        if self.clicks == cfg.count_target {
                            self.clicks = 0;
                            push(&mut events, ButtonEvent::CountComplete);
                        }
                    } else {
                        self.clicks = 0;
                        push(&mut events, ButtonEvent::CountTimeout);
                    }
                    DetectorState::Idle
                } else if elapsed >= cfg.count_timeout {
                    self.clicks = 0;
                    push(&mut events, ButtonEvent::CountTimeout);
                    DetectorState::CountExpired
                } else {
                    self.state
                }
            }

            DetectorState::CountExpired => {
                if active {
                    self.state
                } else {
                    push(&mut events, ButtonEvent::Release);
                    DetectorState::Idle
                }
            }
        };

        #[cfg(feature = "defmt")]
        {
            if next != self.state {
                defmt::trace!("button state: {} -> {}", self.state, next);
            }
        }
        self.state = next;
        events
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(ButtonConfig::default())
    }
}
