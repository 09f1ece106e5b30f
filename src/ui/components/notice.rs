use std::time::Duration;

use dioxus::prelude::*;

use crate::util::generate_id;

const NOTICE_AUTO_DISMISS: Duration = Duration::from_secs(6);
const MAX_NOTICES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Info => "border-sky-500/40 bg-sky-500/10 text-sky-100",
            NoticeKind::Success => "border-emerald-500/40 bg-emerald-500/10 text-emerald-100",
            NoticeKind::Warning => "border-amber-500/40 bg-amber-500/10 text-amber-100",
            NoticeKind::Error => "border-rose-500/40 bg-rose-500/10 text-rose-100",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NoticeMessage {
    pub id: String,
    pub kind: NoticeKind,
    pub text: String,
}

/// Queues a notice, dropping the oldest once the queue is full.
pub fn push_notice(mut notices: Signal<Vec<NoticeMessage>>, kind: NoticeKind, text: impl Into<String>) {
    let message = NoticeMessage {
        id: generate_id("notice"),
        kind,
        text: text.into(),
    };
    notices.with_mut(|queue| {
        if queue.len() >= MAX_NOTICES {
            queue.remove(0);
        }
        queue.push(message);
    });
}

#[component]
pub fn NoticeList() -> Element {
    let notices = use_context::<Signal<Vec<NoticeMessage>>>();
    let current = notices();

    if current.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        ul { class: "pointer-events-none fixed inset-x-0 bottom-4 flex flex-col items-center gap-3",
            for message in current {
                NoticeCard { key: "{message.id}", message: message.clone(), notices }
            }
        }
    }
}

#[component]
fn NoticeCard(message: NoticeMessage, notices: Signal<Vec<NoticeMessage>>) -> Element {
    let id = message.id.clone();
    use_future(move || {
        let id = id.clone();
        let mut notices = notices;
        async move {
            tokio::time::sleep(NOTICE_AUTO_DISMISS).await;
            notices.with_mut(|queue| queue.retain(|notice| notice.id != id));
        }
    });

    let dismiss_id = message.id.clone();
    rsx! {
        li { class: "pointer-events-auto flex items-start gap-3 rounded-xl border px-4 py-3 shadow-lg {message.kind.class()}",
            p { class: "text-sm font-medium", "{message.text}" }
            button {
                class: "ml-3 text-xs uppercase tracking-wide text-slate-300 hover:text-white",
                onclick: move |_| {
                    let target = dismiss_id.clone();
                    let mut notices = notices;
                    notices.with_mut(|queue| queue.retain(|notice| notice.id != target));
                },
                "Dismiss"
            }
        }
    }
}
