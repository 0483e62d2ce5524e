//! 消息提示模块
//!
//! 以信号实现核心库的 `Notifier`，由 `ToastHost` 渲染，每条消息 3 秒后自动消失。

use leptos::prelude::*;
use pureadmin::{MessageKind, Notifier};
use std::time::Duration;

const DISMISS_AFTER: Duration = Duration::from_secs(3);

type Toast = (u64, String, MessageKind);

/// 只有仍在显示的是序号为 `id` 的消息时才清除
fn clear_if_current(slot: &mut Option<Toast>, id: u64) {
    if slot.as_ref().is_some_and(|(shown, _, _)| *shown == id) {
        *slot = None;
    }
}

/// 当前显示的消息
///
/// 每条消息带一个递增的序号，定时器只清除仍是自己那一条的消息。
#[derive(Clone, Copy)]
pub struct Toaster {
    current: RwSignal<Option<Toast>>,
    next_id: StoredValue<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
        }
    }

    fn dismiss(&self, id: u64) {
        self.current.update(|slot| clear_if_current(slot, id));
    }
}

impl Notifier for Toaster {
    fn message(&self, text: &str, kind: MessageKind) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.current.set(Some((id, text.to_string(), kind)));

        let toaster = *self;
        set_timeout(move || toaster.dismiss(id), DISMISS_AFTER);
    }
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

fn alert_class(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Success => "alert alert-success shadow-lg",
        MessageKind::Info => "alert alert-info shadow-lg",
        MessageKind::Warning => "alert alert-warning shadow-lg",
        MessageKind::Error => "alert alert-error shadow-lg",
    }
}

/// 通知提示框
#[component]
pub fn ToastHost() -> impl IntoView {
    let current = use_toaster().current;

    move || {
        current.get().map(|(_, text, kind)| {
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=alert_class(kind)>
                        <span>{text}</span>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_timer_keeps_newer_message() {
        let mut slot = Some((2, "第二条".to_string(), MessageKind::Error));
        clear_if_current(&mut slot, 1);
        assert_eq!(slot.map(|(id, _, _)| id), Some(2));
    }

    #[test]
    fn own_timer_clears_message() {
        let mut slot = Some((1, "已删除所有日志数据".to_string(), MessageKind::Success));
        clear_if_current(&mut slot, 1);
        assert!(slot.is_none());
    }
}
