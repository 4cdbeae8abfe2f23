use contracts::domain::layers::{find_entity, Layer};
use contracts::shared::registry::layer_descriptors;
use leptos::prelude::*;

use crate::shared::layer_stats::{CountCard, LayerStats};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

/// One count card per entity table of `layer`.
#[component]
pub fn LayerIndexPage(layer: Layer) -> impl IntoView {
    let cards: Vec<CountCard> = layer_descriptors(layer)
        .into_iter()
        .filter_map(|descriptor| {
            let table = find_entity(layer, descriptor.key)?;
            Some(CountCard {
                descriptor,
                icon: "list",
                href: table.route_path(),
            })
        })
        .collect();

    view! {
        <PageFrame page_id=format!("{}--dashboard", layer.slug()) category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title" style=format!("border-inline-start: 4px solid {};", layer.color())>
                        {layer.label()}
                    </h1>
                    <div class="page__subtitle">{layer.label_en()}" Architecture"</div>
                </div>
            </div>
            <div class="page__content">
                <LayerStats cards=cards />
            </div>
        </PageFrame>
    }
}
