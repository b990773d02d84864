use embassy_futures::select::{select, Either};
use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver, Sender},
    signal::Signal,
};
use embassy_time::{Duration, Ticker};

use crate::{Button, ButtonEvent, ButtonInput};

pub type EventChannel<const N: usize> = Channel<CriticalSectionRawMutex, ButtonEvent, N>;
pub type EventSender<'a, const N: usize> = Sender<'a, CriticalSectionRawMutex, ButtonEvent, N>;
pub type EventReceiver<'a, const N: usize> = Receiver<'a, CriticalSectionRawMutex, ButtonEvent, N>;

/// 用于从其他任务请求重置检测器的信号。
pub type ResetSignal = Signal<CriticalSectionRawMutex, ()>;

/// 【后台轮询器】拥有按钮，并提供 run 方法以在后台任务中周期性轮询。
///
/// 每一步产生的事件先同步地交给按钮上注册的回调，再发送到事件通道。
/// 如果通道已满，轮询会等待接收方取走事件。
pub struct ButtonRunner<'a, 'c, I: ButtonInput, const N: usize> {
    button: Button<'a, I>,
    poll_interval: Duration,
    events: EventSender<'c, N>,
    reset: &'c ResetSignal,
}

impl<'a, 'c, I: ButtonInput, const N: usize> ButtonRunner<'a, 'c, I, N> {
    /// 创建一个新的轮询器。
    ///
    /// # 参数
    /// * `button`: 被轮询的按钮。
    /// * `poll_interval`: 轮询周期，应小于配置的消抖时间。
    /// * `channel`: 事件发送到的通道。
    /// * `reset`: 收到信号时丢弃进行中的序列。
    pub fn new(
        button: Button<'a, I>,
        poll_interval: Duration,
        channel: &'c EventChannel<N>,
        reset: &'c ResetSignal,
    ) -> Self {
        Self {
            button,
            poll_interval,
            events: channel.sender(),
            reset,
        }
    }

    pub fn button(&self) -> &Button<'a, I> {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut Button<'a, I> {
        &mut self.button
    }

    pub async fn run(mut self) -> ! {
        let mut ticker = Ticker::every(self.poll_interval);
        loop {
            match select(ticker.next(), self.reset.wait()).await {
                Either::First(_) => {
                    for event in self.button.poll() {
                        self.events.send(event).await;
                    }
                }
                Either::Second(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("button reset requested");
                    self.button.reset();
                }
            }
        }
    }
}
