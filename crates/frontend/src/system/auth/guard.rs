use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use super::context::use_session;
use crate::routes::table::redirect_for;

/// Keeps the browser on routes the current session may see.
///
/// Renders nothing; must sit inside the `Router`.
#[component]
pub fn RouteGuard() -> impl IntoView {
    let session = use_session();
    let location = use_location();
    let navigate = use_navigate();

    Effect::new(move |_| {
        let path = location.pathname.get();
        let signed_in = session.is_signed_in();
        if let Some(target) = redirect_for(&path, signed_in) {
            if target != path {
                log::debug!("redirect {} -> {}", path, target);
                navigate(
                    target,
                    NavigateOptions {
                        replace: true,
                        ..Default::default()
                    },
                );
            }
        }
    });
}
