use embedded_hal::digital::InputPin;

/// 一个trait，抽象了可以被周期性采样的按钮电平源。
pub trait ButtonInput {
    /// 采样一次。
    ///
    /// 返回 `Some(true)` 表示按下，`Some(false)` 表示松开，
    /// `None` 表示这次没有可用的采样（未绑定或读取失败），检测器不会被推进。
    fn sample(&mut self) -> Option<bool>;
}

/// 定义GPIO按钮的有效电平。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveLevel {
    /// 低电平有效（例如，使用上拉电阻，按下时引脚接地）。
    Low,
    /// 高电平有效（例如，使用下拉电阻，按下时引脚接VCC）。
    High,
}

/// 引脚的上下拉配置。
///
/// 检测器本身不解释这个值，它只是转交给负责配置引脚的 HAL 代码，
/// 通过 [`PinInput::pull`] 读取。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    Up,
    Down,
    None,
}

impl Pull {
    /// 与有效电平匹配的内部上下拉。
    pub const fn for_level(active_level: ActiveLevel) -> Self {
        match active_level {
            ActiveLevel::Low => Pull::Up,
            ActiveLevel::High => Pull::Down,
        }
    }
}

/// 一个直接由GPIO输入引脚驱动的按钮输入。
pub struct PinInput<P: InputPin> {
    pin: P,
    active_level: ActiveLevel,
    pull: Pull,
}

impl<P: InputPin> PinInput<P> {
    /// 创建一个新的GPIO按钮输入。
    ///
    /// # 参数
    /// * `pin`: 一个实现了 `InputPin` 的GPIO引脚，应当已经按 `pull` 配置好。
    /// * `active_level`: 按钮按下时的有效电平。
    /// * `pull`: 引脚的上下拉模式。
    pub fn new(pin: P, active_level: ActiveLevel, pull: Pull) -> Self {
        Self {
            pin,
            active_level,
            pull,
        }
    }

    pub fn active_level(&self) -> ActiveLevel {
        self.active_level
    }

    pub fn pull(&self) -> Pull {
        self.pull
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> ButtonInput for PinInput<P> {
    fn sample(&mut self) -> Option<bool> {
        let level = match self.active_level {
            ActiveLevel::Low => self.pin.is_low(),
            ActiveLevel::High => self.pin.is_high(),
        };
        match level {
            Ok(active) => Some(active),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("button pin read failed, sample skipped");
                None
            }
        }
    }
}

/// 没有绑定任何引脚的输入。
///
/// 用它构造的按钮永远不会采样，`poll()` 永远不会产生事件；
/// 只有显式传入电平的 `poll_level` 系列方法可以驱动检测器。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unbound;

impl ButtonInput for Unbound {
    fn sample(&mut self) -> Option<bool> {
        None
    }
}
