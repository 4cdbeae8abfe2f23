use contracts::domain::layers::Layer;
use contracts::shared::registry::{dashboard_layers, dashboard_sources};
use leptos::prelude::*;

use crate::shared::layer_stats::{CountCard, LayerStats};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

fn layer_cards() -> Vec<CountCard> {
    dashboard_layers()
        .into_iter()
        .filter_map(|descriptor| {
            let layer = Layer::from_slug(descriptor.key)?;
            Some(CountCard {
                descriptor,
                icon: layer.icon(),
                href: layer.route_path(),
            })
        })
        .collect()
}

/// Asset counts of every architecture layer.
#[component]
pub fn HomeDashboard() -> impl IntoView {
    view! {
        <PageFrame page_id="home--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"لوحة المعلومات"</h1>
                    <div class="page__subtitle">"عدد الأصول المسجلة في كل طبقة معمارية"</div>
                </div>
            </div>
            <div class="page__content">
                <LayerStats
                    cards=layer_cards()
                    sources=dashboard_sources()
                    total_label="إجمالي الأصول"
                />
            </div>
        </PageFrame>
    }
}
