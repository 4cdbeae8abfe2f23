use contracts::shared::descriptor::TableDescriptor;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::reference_table::ReferenceTable;

#[component]
pub fn EntityTablePage(table: &'static TableDescriptor) -> impl IntoView {
    let back = table.layer().map(|layer| {
        view! {
            <nav class="breadcrumb">
                <A href=layer.route_path()>{layer.label()}</A>
                <span class="breadcrumb__separator">"/"</span>
                <span>{table.display_name}</span>
            </nav>
        }
    });

    view! {
        {back}
        <ReferenceTable table=table />
    }
}
