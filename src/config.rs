use embassy_time::Duration;

/// 定义按钮模式识别的通用配置参数。
///
/// 所有时间都从当前子阶段开始的时刻计算。配置可以在任何时刻修改，
/// 包括一个点击序列进行到一半时（此时的行为可能不一致，由调用者负责）。
/// 超出常理的取值（例如 0ms 消抖）不会被拒绝，只会让识别变得更敏感。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// 消抖持续时间。
    ///
    /// 有效电平需要保持这么久才会被认为是一次真实的按下。
    /// 轮询间隔必须小于这个值，否则抖动或很短的按压会被漏掉。
    pub debounce: Duration,

    /// 短按阈值。
    ///
    /// 消抖完成后继续按住超过这个时长，触发 `ShortPressStart`（及其双击/三击变体），
    /// 并进入长按窗口。
    pub short_press_time: Duration,

    /// 长按阈值，从进入长按窗口的时刻开始计算。
    pub long_press_time: Duration,

    /// 双击和三击的时间窗口。
    ///
    /// 一次释放之后，库会在此时间窗口内等待下一次按下。
    pub multi_click_window: Duration,

    /// 是否识别三击。关闭时第二次释放立即产生 `DoubleClick`。
    pub triple_click: bool,

    /// 计数模式。开启后不再区分单击/双击/长按，只统计完成的点击次数。
    pub count_mode: bool,

    /// 计数模式的超时时间，从一个计数序列的第一次按下开始计算。
    pub count_timeout: Duration,

    /// 计数模式的目标次数。为 0 时永远不会完成，只会超时。
    pub count_target: u16,

    /// 长按期间是否在每次轮询时重复触发 `LongPressStart`。
    ///
    /// 默认为 `false`：每次持续按住只触发一次。
    pub long_press_repeat: bool,
}

impl Default for ButtonConfig {
    /// 提供一套合理的默认配置。
    ///
    /// - 消抖: 10ms
    /// - 短按: 500ms
    /// - 长按: 500ms
    /// - 多击窗口: 300ms
    /// - 计数超时: 10s，目标 5 次
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(10),
            short_press_time: Duration::from_millis(500),
            long_press_time: Duration::from_millis(500),
            multi_click_window: Duration::from_millis(300),
            triple_click: false,
            count_mode: false,
            count_timeout: Duration::from_millis(10_000),
            count_target: 5,
            long_press_repeat: false,
        }
    }
}
