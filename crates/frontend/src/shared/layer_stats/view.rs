use contracts::shared::descriptor::LayerDescriptor;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::aggregator::{fetch_all_counts, CountState, LayerCounts};
use crate::shared::components::stat_card::StatCard;
use crate::shared::table_api::HttpTableStore;
use crate::system::auth::context::use_session;

/// A card to render for one descriptor.
#[derive(Debug, Clone)]
pub struct CountCard {
    pub descriptor: LayerDescriptor,
    pub icon: &'static str,
    pub href: String,
}

/// Grid of count cards, filled by one concurrent round of count requests.
#[component]
pub fn LayerStats(
    cards: Vec<CountCard>,
    /// Tables to count, keyed like the cards. Defaults to each card's own table.
    #[prop(optional)]
    sources: Option<Vec<LayerDescriptor>>,
    /// Adds a leading card with the sum of all counts.
    #[prop(optional)]
    total_label: Option<&'static str>,
) -> impl IntoView {
    let session = use_session();
    let descriptors: Vec<LayerDescriptor> =
        sources.unwrap_or_else(|| cards.iter().map(|c| c.descriptor).collect());
    let counts = RwSignal::new(LayerCounts::loading(&descriptors));
    let descriptors = StoredValue::new(descriptors);

    Effect::new(move |_| {
        let descriptors = descriptors.get_value();
        let session = session.clone();
        spawn_local(async move {
            let result =
                fetch_all_counts(&HttpTableStore::new(), &session, &descriptors).await;
            log::debug!("counts settled: total {}", result.total());
            counts.try_set(result);
        });
    });

    let total = Signal::derive(move || {
        counts.with(|c| {
            if c.is_settled() {
                CountState::Ready(c.total())
            } else {
                CountState::Loading
            }
        })
    });

    view! {
        <div class="stat-grid">
            {total_label.map(|label| view! {
                <StatCard label=label icon_name="layers" color="#0f766e" value=total />
            })}
            {cards
                .into_iter()
                .map(|card| {
                    let key = card.descriptor.key;
                    view! {
                        <StatCard
                            label=card.descriptor.label
                            icon_name=card.icon
                            color=card.descriptor.color
                            value=Signal::derive(move || counts.with(|c| c.get(key)))
                            href=card.href
                        />
                    }
                })
                .collect_view()}
        </div>
    }
}
