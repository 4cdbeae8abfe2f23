use contracts::system::auth::SignUpRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::messages;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::api::AuthApiError;
use crate::system::auth::context::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

fn failure_message(mode: AuthMode, error: &AuthApiError) -> &'static str {
    match (mode, error.status) {
        (AuthMode::SignUp, Some(409)) => messages::USERNAME_TAKEN,
        (AuthMode::SignUp, _) => messages::SIGNUP_FAILED,
        (AuthMode::SignIn, _) => messages::SIGNIN_FAILED,
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Sign-in and sign-up forms. Navigation after success is left to the route guard.
#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session();

    let mode = RwSignal::new(AuthMode::SignIn);
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<&'static str>::None);
    let is_loading = RwSignal::new(false);

    let switch_to = move |next: AuthMode| {
        mode.set(next);
        error_message.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }
        let current = mode.get_untracked();
        let session = session.clone();
        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            let username = username.get_untracked().trim().to_string();
            let password = password.get_untracked();
            let result = match current {
                AuthMode::SignIn => session.sign_in(username, password).await,
                AuthMode::SignUp => {
                    session
                        .sign_up(SignUpRequest {
                            username,
                            password,
                            full_name: optional(full_name.get_untracked()),
                            email: optional(email.get_untracked()),
                        })
                        .await
                }
            };
            if let Err(e) = result {
                log::warn!("{:?} failed: {}", current, e);
                error_message.try_set(Some(failure_message(current, &e)));
            }
            is_loading.try_set(false);
        });
    };

    let is_sign_up = move || mode.get() == AuthMode::SignUp;

    view! {
        <PageFrame page_id="auth--system" category=PAGE_CAT_SYSTEM>
            <div class="login-container" dir="rtl">
                <div class="login-box">
                    <h1>"مستودع البنية المؤسسية"</h1>
                    <div class="login-tabs">
                        <button
                            type="button"
                            class="login-tab"
                            class:login-tab--active=move || !is_sign_up()
                            on:click=move |_| switch_to(AuthMode::SignIn)
                        >
                            "تسجيل الدخول"
                        </button>
                        <button
                            type="button"
                            class="login-tab"
                            class:login-tab--active=is_sign_up
                            on:click=move |_| switch_to(AuthMode::SignUp)
                        >
                            "إنشاء حساب"
                        </button>
                    </div>

                    <Show when=move || error_message.get().is_some()>
                        <div class="error-message">
                            {move || error_message.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=on_submit>
                        <div class="form-group">
                            <label for="username">"اسم المستخدم"</label>
                            <input
                                type="text"
                                id="username"
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <div class="form-group">
                            <label for="password">"كلمة المرور"</label>
                            <input
                                type="password"
                                id="password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                                required
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <Show when=is_sign_up>
                            <div class="form-group">
                                <label for="full_name">"الاسم الكامل"</label>
                                <input
                                    type="text"
                                    id="full_name"
                                    prop:value=move || full_name.get()
                                    on:input=move |ev| full_name.set(event_target_value(&ev))
                                    disabled=move || is_loading.get()
                                />
                            </div>
                            <div class="form-group">
                                <label for="email">"البريد الإلكتروني"</label>
                                <input
                                    type="email"
                                    id="email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                    disabled=move || is_loading.get()
                                />
                            </div>
                        </Show>

                        <button type="submit" class="btn-primary" disabled=move || is_loading.get()>
                            {move || match (is_loading.get(), mode.get()) {
                                (true, _) => "جارٍ التنفيذ...",
                                (false, AuthMode::SignIn) => "دخول",
                                (false, AuthMode::SignUp) => "إنشاء الحساب",
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(status: Option<u16>) -> AuthApiError {
        AuthApiError {
            status,
            message: "x".to_string(),
        }
    }

    #[test]
    fn duplicate_username_is_reported_on_sign_up_only() {
        assert_eq!(failure_message(AuthMode::SignUp, &error(Some(409))), messages::USERNAME_TAKEN);
        assert_eq!(failure_message(AuthMode::SignUp, &error(Some(400))), messages::SIGNUP_FAILED);
        assert_eq!(failure_message(AuthMode::SignUp, &error(None)), messages::SIGNUP_FAILED);
        assert_eq!(failure_message(AuthMode::SignIn, &error(Some(401))), messages::SIGNIN_FAILED);
    }

    #[test]
    fn blank_optional_fields_are_omitted() {
        assert_eq!(optional("  ".to_string()), None);
        assert_eq!(optional(" Sara ".to_string()), Some("Sara".to_string()));
    }
}
