use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Notifications dismiss themselves after this many milliseconds.
const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    fn class(&self) -> &'static str {
        match self {
            Self::Success => "notification notification--success",
            Self::Error => "notification notification--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub text: String,
}

/// Sink for user-facing messages.
pub trait Notifier {
    fn notify(&self, kind: NotificationKind, text: &str);

    fn success(&self, text: &str) {
        self.notify(NotificationKind::Success, text);
    }

    fn error(&self, text: &str) {
        self.notify(NotificationKind::Error, text);
    }
}

/// Transient toasts shown in the corner of the shell.
#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    next_id: StoredValue<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn items(&self) -> Vec<Notification> {
        self.items.get()
    }

    pub fn dismiss(&self, id: u64) {
        self.items.try_update(|items| items.retain(|n| n.id != id));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotificationService {
    fn notify(&self, kind: NotificationKind, text: &str) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.items.try_update(|items| {
            items.push(Notification {
                id,
                kind,
                text: text.to_string(),
            })
        });

        let service = *self;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            service.dismiss(id);
        });
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not found in component tree")
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="notifications" role="status">
            <For
                each=move || service.items()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class()>
                            <span class="notification__text">{n.text}</span>
                            <button
                                class="notification__close"
                                title="إغلاق"
                                on:click=move |_| service.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
