use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_location;
use leptos_router::path;

use super::table::{find_route, RouteKind};
use crate::dashboards::home::HomeDashboard;
use crate::domain::layers::ui::{EntityTablePage, LayerIndexPage};
use crate::domain::references::ui::{ReferenceIndexPage, ReferenceTablePage};
use crate::layout::Shell;
use crate::system::auth::guard::RouteGuard;
use crate::system::pages::auth_page::AuthPage;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page__placeholder">"الصفحة غير موجودة"</div>
    }
}

/// Renders the page registered for the current path.
#[component]
fn RoutedPage() -> impl IntoView {
    let location = use_location();

    move || {
        let path = location.pathname.get();
        match find_route(&path).map(|r| r.kind) {
            Some(RouteKind::Home) => view! { <HomeDashboard /> }.into_any(),
            Some(RouteKind::LayerIndex(layer)) => view! { <LayerIndexPage layer=layer /> }.into_any(),
            Some(RouteKind::EntityTable(table)) => view! { <EntityTablePage table=table /> }.into_any(),
            Some(RouteKind::ReferenceIndex) => view! { <ReferenceIndexPage /> }.into_any(),
            Some(RouteKind::ReferenceTable(table)) => {
                view! { <ReferenceTablePage table=table /> }.into_any()
            }
            Some(RouteKind::Auth) | None => view! { <NotFound /> }.into_any(),
        }
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Shell>
            <RoutedPage />
        </Shell>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <RouteGuard />
            <Routes fallback=|| view! { <MainLayout /> }>
                <Route path=path!("/auth") view=AuthPage />
                <Route path=path!("/") view=MainLayout />
            </Routes>
        </Router>
    }
}
