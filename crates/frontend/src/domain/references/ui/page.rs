use contracts::shared::descriptor::TableDescriptor;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::routes::table::REFERENCES_PATH;
use crate::shared::reference_table::ReferenceTable;

#[component]
pub fn ReferenceTablePage(table: &'static TableDescriptor) -> impl IntoView {
    view! {
        <nav class="breadcrumb">
            <A href=REFERENCES_PATH>"الجداول المرجعية"</A>
            <span class="breadcrumb__separator">"/"</span>
            <span>{table.display_name}</span>
        </nav>
        <ReferenceTable table=table />
    }
}
