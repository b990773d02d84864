#![no_std]

pub mod config;
pub mod event;
pub mod fsm;
pub mod input;
pub mod runner;
pub mod sinks;

pub use config::*;
pub use event::{ButtonEvent, Ordinal};
pub use fsm::{Detector, DetectorState, Events};
pub use input::{ActiveLevel, ButtonInput, PinInput, Pull, Unbound};
pub use sinks::{EventSinks, Handler};

use embassy_time::{Duration, Instant, Ticker};
use embedded_hal::digital::InputPin;

/// 为每一种事件生成一个注册方法。
macro_rules! handler_setters {
    ($lt:lifetime; $($(#[$meta:meta])* $name:ident => $event:ident,)*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, handler: Handler<$lt>) {
                self.on(ButtonEvent::$event, handler);
            }
        )*
    };
}

/// 一个轮询驱动的按钮。
///
/// 它把一个 [`ButtonInput`]、一个 [`Detector`] 和一张 [`EventSinks`] 回调表组合在一起。
/// 调用者需要以小于消抖时间的间隔反复调用 [`Button::poll`]，
/// 每次调用会同步地执行这一步触发的所有回调，然后返回这些事件。
///
/// 不支持并发调用：所有方法都需要 `&mut self`。
pub struct Button<'a, I: ButtonInput> {
    input: I,
    detector: Detector,
    sinks: EventSinks<'a>,
    pending: Events,
}

impl<'a, P: InputPin> Button<'a, PinInput<P>> {
    /// 用一个GPIO引脚创建按钮，使用默认配置。
    pub fn from_pin(pin: P, active_level: ActiveLevel, pull: Pull) -> Self {
        Self::new(PinInput::new(pin, active_level, pull), ButtonConfig::default())
    }
}

impl<'a> Button<'a, Unbound> {
    /// 创建一个没有绑定引脚的按钮。
    ///
    /// `poll()` 对它没有任何作用，只能通过 `poll_level` 系列方法驱动。
    pub fn unbound() -> Self {
        Self::new(Unbound, ButtonConfig::default())
    }
}

impl<'a, I: ButtonInput> Button<'a, I> {
    pub fn new(input: I, config: ButtonConfig) -> Self {
        Self {
            input,
            detector: Detector::new(config),
            sinks: EventSinks::new(),
            pending: Events::new(),
        }
    }

    pub fn config(&self) -> &ButtonConfig {
        self.detector.config()
    }

    pub fn set_config(&mut self, new_config: ButtonConfig) {
        self.detector.set_config(new_config);
    }

    pub fn set_time_debounce(&mut self, debounce: Duration) {
        self.detector.config_mut().debounce = debounce;
    }

    pub fn set_time_short(&mut self, short_press_time: Duration) {
        self.detector.config_mut().short_press_time = short_press_time;
    }

    pub fn set_time_long(&mut self, long_press_time: Duration) {
        self.detector.config_mut().long_press_time = long_press_time;
    }

    pub fn set_time_double(&mut self, multi_click_window: Duration) {
        self.detector.config_mut().multi_click_window = multi_click_window;
    }

    pub fn set_triple_mode(&mut self, enabled: bool) {
        self.detector.config_mut().triple_click = enabled;
    }

    pub fn set_count_mode(&mut self, enabled: bool) {
        self.detector.config_mut().count_mode = enabled;
    }

    pub fn set_count_click_timeout(&mut self, timeout: Duration) {
        self.detector.config_mut().count_timeout = timeout;
    }

    pub fn set_count_click_target(&mut self, target: u16) {
        self.detector.config_mut().count_target = target;
    }

    pub fn set_long_press_repeat(&mut self, enabled: bool) {
        self.detector.config_mut().long_press_repeat = enabled;
    }

    /// 为某种事件注册回调，替换之前注册的回调。
    pub fn on(&mut self, event: ButtonEvent, handler: Handler<'a>) {
        self.sinks.set(event, handler);
    }

    /// 移除某种事件的回调。
    pub fn clear(&mut self, event: ButtonEvent) {
        self.sinks.clear(event);
    }

    pub fn sinks(&self) -> &EventSinks<'a> {
        &self.sinks
    }

    handler_setters! {
        'a;
        on_click => Click,
        on_double_click => DoubleClick,
        on_triple_click => TripleClick,
        /// 序列中第一次按下通过消抖时触发。
        on_press => Press,
        /// 与 `Press` 对应的那次松开时触发。
        on_release => Release,
        on_short_press_start => ShortPressStart,
        on_short_double_start => ShortDoubleStart,
        on_short_triple_start => ShortTripleStart,
        on_long_press_start => LongPressStart,
        on_long_double_start => LongDoubleStart,
        on_long_triple_start => LongTripleStart,
        on_long_press_stop => LongPressStop,
        on_long_double_stop => LongDoubleStop,
        on_long_triple_stop => LongTripleStop,
        on_count_complete => CountComplete,
        on_count_timeout => CountTimeout,
    }

    /// 采样绑定的输入并推进状态机。
    ///
    /// 输入没有可用采样时（未绑定或读取失败）什么都不做。
    pub fn poll(&mut self) -> Events {
        match self.input.sample() {
            Some(active) => self.poll_level_at(active, Instant::now()),
            None => Events::new(),
        }
    }

    /// 使用外部已经采样好的电平推进状态机。
    pub fn poll_level(&mut self, active: bool) -> Events {
        self.poll_level_at(active, Instant::now())
    }

    /// 使用外部采样的电平和外部提供的时间推进状态机。
    pub fn poll_level_at(&mut self, active: bool, now: Instant) -> Events {
        let events = self.detector.step(active, now);
        for event in events.iter() {
            self.sinks.dispatch(*event);
        }
        events
    }

    /// 等待下一个事件。
    ///
    /// 以 `poll_interval` 为周期轮询，直到有事件产生。同一步产生的多个事件会依次返回。
    /// 对于未绑定的按钮，这个方法永远不会返回。
    pub async fn next_event(&mut self, poll_interval: Duration) -> ButtonEvent {
        let mut ticker = Ticker::every(poll_interval);
        loop {
            if !self.pending.is_empty() {
                return self.pending.remove(0);
            }
            ticker.next().await;
            self.pending = self.poll();
        }
    }

    /// 最近一次完成的长按窗口持续时间。
    pub fn pressed_duration(&self) -> Duration {
        self.detector.pressed_duration()
    }

    pub fn state(&self) -> DetectorState {
        self.detector.state()
    }

    pub fn click_count(&self) -> u16 {
        self.detector.click_count()
    }

    /// 获取底层输入的不可变引用
    pub fn input(&self) -> &I {
        &self.input
    }

    /// 获取底层输入的可变引用
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// 重置按钮状态到初始空闲状态，不触发任何事件。
    ///
    /// 配置和已注册的回调保持不变。
    pub fn reset(&mut self) {
        self.detector.reset();
        self.pending.clear();
    }
}
