use crate::event::ButtonEvent;

/// 事件回调。
///
/// 可以是无参数的回调，也可以是带一个不透明参数的回调（例如 LED 编号、
/// 通道号）。两种形式共享同一个槽位，后注册的覆盖先注册的。
#[derive(Clone, Copy)]
pub enum Handler<'a> {
    Plain(&'a dyn Fn()),
    WithParam(&'a dyn Fn(usize), usize),
}

impl Handler<'_> {
    pub fn invoke(&self) {
        match *self {
            Handler::Plain(callback) => callback(),
            Handler::WithParam(callback, param) => callback(param),
        }
    }
}

impl<'a> From<&'a dyn Fn()> for Handler<'a> {
    fn from(callback: &'a dyn Fn()) -> Self {
        Handler::Plain(callback)
    }
}

/// 以事件种类为下标的固定大小回调表。
///
/// 未注册回调的事件在分发时被静默跳过。
#[derive(Clone, Copy)]
pub struct EventSinks<'a> {
    handlers: [Option<Handler<'a>>; ButtonEvent::COUNT],
}

impl<'a> EventSinks<'a> {
    pub const fn new() -> Self {
        Self {
            handlers: [None; ButtonEvent::COUNT],
        }
    }

    /// 注册回调，返回被替换掉的旧回调。
    pub fn set(&mut self, event: ButtonEvent, handler: Handler<'a>) -> Option<Handler<'a>> {
        self.handlers[event.index()].replace(handler)
    }

    pub fn clear(&mut self, event: ButtonEvent) -> Option<Handler<'a>> {
        self.handlers[event.index()].take()
    }

    pub fn get(&self, event: ButtonEvent) -> Option<&Handler<'a>> {
        self.handlers[event.index()].as_ref()
    }

    pub fn is_registered(&self, event: ButtonEvent) -> bool {
        self.handlers[event.index()].is_some()
    }

    /// 调用事件对应的回调。没有注册时返回 `false`。
    pub fn dispatch(&self, event: ButtonEvent) -> bool {
        match &self.handlers[event.index()] {
            Some(handler) => {
                handler.invoke();
                true
            }
            None => false,
        }
    }
}

impl Default for EventSinks<'_> {
    fn default() -> Self {
        Self::new()
    }
}
