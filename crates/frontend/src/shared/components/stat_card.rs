use crate::shared::icons::icon;
use crate::shared::layer_stats::CountState;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn StatCard(
    /// Label displayed above the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    /// Accent color of the icon badge
    color: &'static str,
    #[prop(into)]
    value: Signal<CountState>,
    /// Page the card links to
    #[prop(optional, into)]
    href: Option<String>,
) -> impl IntoView {
    let status_class = move || match value.get() {
        CountState::Failed => "stat-card stat-card--error",
        CountState::Loading => "stat-card stat-card--loading",
        CountState::Ready(_) => "stat-card",
    };

    let body = move || {
        view! {
            <div class="stat-card__icon" style=format!("color: {color}; background: {color}1a;")>
                {icon(icon_name)}
            </div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get().display()}</div>
            </div>
        }
    };

    match href {
        Some(href) => view! {
            <A href=href>
                <div class=status_class>{body()}</div>
            </A>
        }
        .into_any(),
        None => view! { <div class=status_class>{body()}</div> }.into_any(),
    }
}
