use crate::routes::routes::AppRoutes;
use crate::shared::notifications::NotificationService;
use crate::system::auth::context::SessionProvider;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Toasts raised by any page, rendered by the shell.
    provide_context(NotificationService::new());

    view! {
        <SessionProvider>
            <AppRoutes />
        </SessionProvider>
    }
}
