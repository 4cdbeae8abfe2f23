use contracts::shared::reference::find_reference;
use contracts::shared::registry::reference_descriptors;
use leptos::prelude::*;

use crate::shared::layer_stats::{CountCard, LayerStats};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;

/// Every reference table with its row count.
#[component]
pub fn ReferenceIndexPage() -> impl IntoView {
    let cards: Vec<CountCard> = reference_descriptors()
        .into_iter()
        .filter_map(|descriptor| {
            let table = find_reference(descriptor.key)?;
            Some(CountCard {
                descriptor,
                icon: "list",
                href: table.route_path(),
            })
        })
        .collect();

    view! {
        <PageFrame page_id="references--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"الجداول المرجعية"</h1>
                    <div class="page__subtitle">"قوائم القيم المستخدمة في تصنيف الأصول"</div>
                </div>
            </div>
            <div class="page__content">
                <LayerStats cards=cards />
            </div>
        </PageFrame>
    }
}
