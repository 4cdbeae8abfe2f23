use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;
use crate::system::auth::context::use_session;

#[component]
pub fn TopHeader() -> impl IntoView {
    let session = use_session();

    let display_name = {
        let session = session.clone();
        move || {
            session
                .user()
                .map(|u| u.full_name.unwrap_or(u.username))
                .unwrap_or_default()
        }
    };

    let sign_out = move |_| {
        let session = session.clone();
        spawn_local(async move {
            session.sign_out().await;
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                {icon("layers")}
                <span class="top-header__title">"مستودع البنية المؤسسية"</span>
            </div>
            <div class="top-header__actions">
                <div class="top-header__user">
                    {icon("users")}
                    <span>{display_name}</span>
                </div>
                <button class="top-header__icon-btn" on:click=sign_out title="تسجيل الخروج">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
