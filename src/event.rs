/// 点击链中的位置：第一次、第二次或第三次按下。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ordinal {
    First,
    Second,
    Third,
}

impl Ordinal {
    pub const fn next(self) -> Option<Ordinal> {
        match self {
            Ordinal::First => Some(Ordinal::Second),
            Ordinal::Second => Some(Ordinal::Third),
            Ordinal::Third => None,
        }
    }

    pub const fn previous(self) -> Option<Ordinal> {
        match self {
            Ordinal::First => None,
            Ordinal::Second => Some(Ordinal::First),
            Ordinal::Third => Some(Ordinal::Second),
        }
    }

    /// 以 1 开始的序号。
    pub const fn get(self) -> u8 {
        match self {
            Ordinal::First => 1,
            Ordinal::Second => 2,
            Ordinal::Third => 3,
        }
    }
}

/// 检测器能够识别的所有事件类型。
///
/// 这是一个扁平的枚举，每个变体对应事件表中的一个槽位，
/// 带序号的短按/长按事件可以通过 [`ButtonEvent::short_press_start`] 等构造。
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonEvent {
    Click,
    DoubleClick,
    TripleClick,
    Press,
    Release,
    ShortPressStart,
    ShortDoubleStart,
    ShortTripleStart,
    LongPressStart,
    LongDoubleStart,
    LongTripleStart,
    LongPressStop,
    LongDoubleStop,
    LongTripleStop,
    CountComplete,
    CountTimeout,
}

impl ButtonEvent {
    /// 事件种类的数量，即事件表的大小。
    pub const COUNT: usize = 16;

    pub const ALL: [ButtonEvent; Self::COUNT] = [
        ButtonEvent::Click,
        ButtonEvent::DoubleClick,
        ButtonEvent::TripleClick,
        ButtonEvent::Press,
        ButtonEvent::Release,
        ButtonEvent::ShortPressStart,
        ButtonEvent::ShortDoubleStart,
        ButtonEvent::ShortTripleStart,
        ButtonEvent::LongPressStart,
        ButtonEvent::LongDoubleStart,
        ButtonEvent::LongTripleStart,
        ButtonEvent::LongPressStop,
        ButtonEvent::LongDoubleStop,
        ButtonEvent::LongTripleStop,
        ButtonEvent::CountComplete,
        ButtonEvent::CountTimeout,
    ];

    /// 在事件表中的下标。
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 点击链完成时的事件：单击、双击或三击。
    pub const fn click(ordinal: Ordinal) -> Self {
        match ordinal {
            Ordinal::First => ButtonEvent::Click,
            Ordinal::Second => ButtonEvent::DoubleClick,
            Ordinal::Third => ButtonEvent::TripleClick,
        }
    }

    pub const fn short_press_start(ordinal: Ordinal) -> Self {
        match ordinal {
            Ordinal::First => ButtonEvent::ShortPressStart,
            Ordinal::Second => ButtonEvent::ShortDoubleStart,
            Ordinal::Third => ButtonEvent::ShortTripleStart,
        }
    }

    pub const fn long_press_start(ordinal: Ordinal) -> Self {
        match ordinal {
            Ordinal::First => ButtonEvent::LongPressStart,
            Ordinal::Second => ButtonEvent::LongDoubleStart,
            Ordinal::Third => ButtonEvent::LongTripleStart,
        }
    }

    pub const fn long_press_stop(ordinal: Ordinal) -> Self {
        match ordinal {
            Ordinal::First => ButtonEvent::LongPressStop,
            Ordinal::Second => ButtonEvent::LongDoubleStop,
            Ordinal::Third => ButtonEvent::LongTripleStop,
        }
    }

    /// 该事件属于点击链的哪一环。`Press`、`Release` 和计数事件没有序号。
    pub const fn ordinal(self) -> Option<Ordinal> {
        match self {
            ButtonEvent::Click
            | ButtonEvent::ShortPressStart
            | ButtonEvent::LongPressStart
            | ButtonEvent::LongPressStop => Some(Ordinal::First),
            ButtonEvent::DoubleClick
            | ButtonEvent::ShortDoubleStart
            | ButtonEvent::LongDoubleStart
            | ButtonEvent::LongDoubleStop => Some(Ordinal::Second),
            ButtonEvent::TripleClick
            | ButtonEvent::ShortTripleStart
            | ButtonEvent::LongTripleStart
            | ButtonEvent::LongTripleStop => Some(Ordinal::Third),
            ButtonEvent::Press
            | ButtonEvent::Release
            | ButtonEvent::CountComplete
            | ButtonEvent::CountTimeout => None,
        }
    }
}
