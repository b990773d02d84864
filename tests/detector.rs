use embassy_polled_button::{Button, ButtonEvent, DetectorState, Unbound};
use embassy_time::{Duration, Instant};

// --- Test Harness (测试工具) ---

// 以 1ms 为周期驱动一个未绑定的按钮，记录所有事件
struct Sim {
    button: Button<'static, Unbound>,
    now: u64,
    events: Vec<ButtonEvent>,
}

impl Sim {
    fn new() -> Self {
        Self {
            button: Button::unbound(),
            now: 1_000,
            events: Vec::new(),
        }
    }

    fn hold(&mut self, active: bool, ms: u64) -> &mut Self {
        for _ in 0..ms {
            let events = self
                .button
                .poll_level_at(active, Instant::from_millis(self.now));
            self.events.extend(events.iter().copied());
            self.now += 1;
        }
        self
    }

    fn press(&mut self, ms: u64) -> &mut Self {
        self.hold(true, ms)
    }

    fn release(&mut self, ms: u64) -> &mut Self {
        self.hold(false, ms)
    }

    fn count(&self, event: ButtonEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

#[test]
fn idle_input_never_fires() {
    for (triple, count) in [(false, false), (true, false), (false, true)] {
        let mut sim = Sim::new();
        sim.button.set_triple_mode(triple);
        sim.button.set_count_mode(count);
        sim.release(5_000);
        assert!(sim.events.is_empty());
        assert!(sim.button.state().is_idle());
    }
}

#[test]
fn bounce_shorter_than_debounce_is_ignored() {
    let mut sim = Sim::new();
    sim.release(100);
    for _ in 0..5 {
        sim.press(5).release(3);
    }
    sim.release(500);

    assert!(sim.events.is_empty());
    assert_eq!(sim.button.state(), DetectorState::Idle);
}

#[test]
fn single_click() {
    let mut sim = Sim::new();
    sim.release(100).press(50).release(400);

    assert_eq!(
        sim.events,
        [ButtonEvent::Press, ButtonEvent::Release, ButtonEvent::Click]
    );
}

#[test]
fn click_waits_for_the_multi_click_window() {
    let mut sim = Sim::new();
    sim.release(100).press(50).release(300);
    assert_eq!(sim.count(ButtonEvent::Click), 0);

    sim.release(2);
    assert_eq!(sim.count(ButtonEvent::Click), 1);
}

#[test]
fn double_click() {
    let mut sim = Sim::new();
    sim.release(100)
        .press(50)
        .release(100)
        .press(50)
        .release(400);

    assert_eq!(
        sim.events,
        [ButtonEvent::Press, ButtonEvent::Release, ButtonEvent::DoubleClick]
    );
    assert_eq!(sim.count(ButtonEvent::Click), 0);
}

#[test]
fn second_press_after_window_is_two_single_clicks() {
    let mut sim = Sim::new();
    sim.release(100)
        .press(50)
        .release(350)
        .press(50)
        .release(400);

    assert_eq!(sim.count(ButtonEvent::Click), 2);
    assert_eq!(sim.count(ButtonEvent::DoubleClick), 0);
}

#[test]
fn bounce_in_gap_keeps_pending_click() {
    let mut sim = Sim::new();
    sim.release(100)
        .press(50)
        .release(100)
        .press(3)
        .release(400);

    assert_eq!(
        sim.events,
        [ButtonEvent::Press, ButtonEvent::Release, ButtonEvent::Click]
    );
}

#[test]
fn triple_click_only_in_triple_mode() {
    let mut sim = Sim::new();
    sim.release(100);
    for _ in 0..3 {
        sim.press(50).release(100);
    }
    sim.release(400);
    // 关闭三击时，前两次组成双击，第三次是单击
    assert_eq!(sim.count(ButtonEvent::DoubleClick), 1);
    assert_eq!(sim.count(ButtonEvent::Click), 1);
    assert_eq!(sim.count(ButtonEvent::TripleClick), 0);

    let mut sim = Sim::new();
    sim.button.set_triple_mode(true);
    sim.release(100);
    for _ in 0..3 {
        sim.press(50).release(100);
    }
    sim.release(400);
    assert_eq!(
        sim.events,
        [ButtonEvent::Press, ButtonEvent::Release, ButtonEvent::TripleClick]
    );
}

#[test]
fn triple_mode_double_click_resolves_after_window() {
    let mut sim = Sim::new();
    sim.button.set_triple_mode(true);
    sim.release(100)
        .press(50)
        .release(100)
        .press(50)
        .release(200);
    assert_eq!(sim.count(ButtonEvent::DoubleClick), 0);

    sim.release(200);
    assert_eq!(
        sim.events,
        [ButtonEvent::Press, ButtonEvent::Release, ButtonEvent::DoubleClick]
    );
}

#[test]
fn long_press_fires_once_and_records_duration() {
    let mut sim = Sim::new();
    assert_eq!(sim.button.pressed_duration(), Duration::from_millis(0));

    sim.release(100).press(1_200).release(100);

    assert_eq!(
        sim.events,
        [
            ButtonEvent::Press,
            ButtonEvent::ShortPressStart,
            ButtonEvent::LongPressStart,
            ButtonEvent::Release,
            ButtonEvent::LongPressStop,
        ]
    );
    // 按下 1100，消抖完成 1110，进入长按窗口 1610，松开 2300
    assert_eq!(sim.button.pressed_duration(), Duration::from_millis(690));
}

#[test]
fn long_press_repeat_fires_every_poll() {
    let mut sim = Sim::new();
    sim.button.set_long_press_repeat(true);
    sim.release(100).press(1_200).release(100);

    // 长按从 2110 开始，每毫秒一次，直到 2299
    assert_eq!(sim.count(ButtonEvent::LongPressStart), 190);
    assert_eq!(sim.count(ButtonEvent::LongPressStop), 1);
}

#[test]
fn short_press_released_before_long_threshold() {
    let mut sim = Sim::new();
    sim.release(100).press(700).release(400);

    assert_eq!(
        sim.events,
        [
            ButtonEvent::Press,
            ButtonEvent::ShortPressStart,
            ButtonEvent::Release,
            ButtonEvent::LongPressStop,
        ]
    );
    assert_eq!(sim.count(ButtonEvent::Click), 0);
}

#[test]
fn double_long_press() {
    let mut sim = Sim::new();
    sim.release(100)
        .press(50)
        .release(100)
        .press(1_200)
        .release(400);

    assert_eq!(
        sim.events,
        [
            ButtonEvent::Press,
            ButtonEvent::Release,
            ButtonEvent::ShortDoubleStart,
            ButtonEvent::LongDoubleStart,
            ButtonEvent::LongDoubleStop,
        ]
    );
    // 第二次按下 1250，消抖完成 1260，进入长按窗口 1760，松开 2450
    assert_eq!(sim.button.pressed_duration(), Duration::from_millis(690));
}

#[test]
fn triple_long_press() {
    let mut sim = Sim::new();
    sim.button.set_triple_mode(true);
    sim.release(100)
        .press(50)
        .release(100)
        .press(50)
        .release(100)
        .press(1_200)
        .release(400);

    assert_eq!(
        sim.events,
        [
            ButtonEvent::Press,
            ButtonEvent::Release,
            ButtonEvent::ShortTripleStart,
            ButtonEvent::LongTripleStart,
            ButtonEvent::LongTripleStop,
        ]
    );
}

#[test]
fn count_mode_completes_and_restarts() {
    let mut sim = Sim::new();
    sim.button.set_count_mode(true);
    sim.button.set_count_click_target(3);
    sim.button.set_count_click_timeout(Duration::from_millis(2_000));

    sim.release(100);
    for _ in 0..3 {
        sim.press(50).release(100);
    }
    assert_eq!(sim.count(ButtonEvent::Click), 3);
    assert_eq!(sim.count(ButtonEvent::CountComplete), 1);
    assert_eq!(sim.count(ButtonEvent::CountTimeout), 0);
    assert_eq!(sim.button.click_count(), 0);
    assert_eq!(sim.count(ButtonEvent::DoubleClick), 0);

    // 第四次点击开始一个新的序列
    sim.press(50).release(100);
    assert_eq!(sim.button.click_count(), 1);
    assert_eq!(sim.count(ButtonEvent::CountComplete), 1);
}

#[test]
fn count_mode_times_out_once_when_idle() {
    let mut sim = Sim::new();
    sim.button.set_count_mode(true);
    sim.button.set_count_click_target(3);
    sim.button.set_count_click_timeout(Duration::from_millis(2_000));

    sim.release(100).press(50).release(100).press(50).release(100);
    assert_eq!(sim.button.click_count(), 2);

    sim.release(3_000);
    assert_eq!(sim.count(ButtonEvent::CountTimeout), 1);
    assert_eq!(sim.count(ButtonEvent::CountComplete), 0);
    assert_eq!(sim.button.click_count(), 0);
}

#[test]
fn count_mode_times_out_while_held() {
    let mut sim = Sim::new();
    sim.button.set_count_mode(true);
    sim.button.set_count_click_timeout(Duration::from_millis(2_000));

    sim.release(100).press(2_500).release(100);

    assert_eq!(
        sim.events,
        [
            ButtonEvent::Press,
            ButtonEvent::CountTimeout,
            ButtonEvent::Release,
        ]
    );
    assert_eq!(sim.count(ButtonEvent::Click), 0);
}

#[test]
fn count_mode_ignores_long_press_classification() {
    let mut sim = Sim::new();
    sim.button.set_count_mode(true);
    sim.release(100).press(1_500).release(100);

    assert_eq!(sim.count(ButtonEvent::ShortPressStart), 0);
    assert_eq!(sim.count(ButtonEvent::LongPressStart), 0);
    assert_eq!(sim.count(ButtonEvent::Click), 1);
    assert_eq!(sim.button.click_count(), 1);
}

#[test]
fn reset_discards_sequence_without_events() {
    let mut sim = Sim::new();
    sim.release(100).press(50).release(50);
    assert!(matches!(
        sim.button.state(),
        DetectorState::InterClickGap { .. }
    ));
    let before = sim.events.len();

    sim.button.reset();
    sim.button.reset();
    assert!(sim.button.state().is_idle());
    assert_eq!(sim.button.click_count(), 0);

    sim.release(500);
    assert_eq!(sim.events.len(), before);
    assert_eq!(sim.count(ButtonEvent::Click), 0);
}

#[test]
fn reset_keeps_configuration() {
    let mut sim = Sim::new();
    sim.button.set_count_mode(true);
    sim.button.set_time_debounce(Duration::from_millis(25));
    sim.release(100).press(50).release(100);
    assert_eq!(sim.button.click_count(), 1);

    sim.button.reset();
    assert_eq!(sim.button.click_count(), 0);
    assert!(sim.button.config().count_mode);
    assert_eq!(sim.button.config().debounce, Duration::from_millis(25));
}

#[test]
fn unbound_poll_never_samples() {
    let mut button = Button::unbound();
    for _ in 0..100 {
        assert!(button.poll().is_empty());
    }
    assert!(button.state().is_idle());
}

#[test]
fn zero_debounce_is_accepted() {
    let mut sim = Sim::new();
    sim.button.set_time_debounce(Duration::from_millis(0));
    sim.release(10).press(2).release(400);

    assert_eq!(
        sim.events,
        [ButtonEvent::Press, ButtonEvent::Release, ButtonEvent::Click]
    );
}

#[test]
fn clock_going_backwards_does_not_panic() {
    let mut button = Button::unbound();
    button.poll_level_at(true, Instant::from_millis(5_000));
    button.poll_level_at(true, Instant::from_millis(1_000));
    button.poll_level_at(false, Instant::from_millis(900));
    assert!(button.state().is_idle());
}
