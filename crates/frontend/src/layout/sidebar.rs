//! Navigation built from the route table.

use contracts::domain::layers::Layer;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::routes::table::{route_table, RouteEntry, RouteKind, HOME_PATH};
use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(String, &'static str)>, // (path, label)
}

fn group_of(entry: &RouteEntry) -> Option<&'static str> {
    match entry.kind {
        RouteKind::LayerIndex(layer) => Some(layer.slug()),
        RouteKind::EntityTable(table) => table.layer().map(|l| l.slug()),
        RouteKind::ReferenceIndex | RouteKind::ReferenceTable(_) => Some("references"),
        RouteKind::Auth | RouteKind::Home => None,
    }
}

fn menu_groups() -> Vec<MenuGroup> {
    let mut groups: Vec<MenuGroup> = Layer::ALL
        .into_iter()
        .map(|layer| MenuGroup {
            id: layer.slug(),
            label: layer.label(),
            icon: layer.icon(),
            items: Vec::new(),
        })
        .collect();
    groups.push(MenuGroup {
        id: "references",
        label: "الجداول المرجعية",
        icon: "list",
        items: Vec::new(),
    });

    for entry in route_table() {
        let Some(id) = group_of(entry) else { continue };
        if let Some(group) = groups.iter_mut().find(|g| g.id == id) {
            group.items.push((entry.path.clone(), entry.title));
        }
    }
    groups
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let pathname = use_location().pathname;
    let expanded_groups = RwSignal::new(Vec::<&'static str>::new());

    let is_active = move |path: &str| pathname.with(|p| p.trim_end_matches('/') == path);

    view! {
        <nav class="app-sidebar__content">
            <A href=HOME_PATH attr:class="app-sidebar__item">
                <div class="app-sidebar__item-content">
                    {icon("home")}
                    <span>"الرئيسية"</span>
                </div>
            </A>
            {menu_groups().into_iter().map(|group| {
                let id = group.id;
                let items = StoredValue::new(group.items);
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            on:click=move |_| {
                                expanded_groups.update(|open| {
                                    if let Some(pos) = open.iter().position(|g| *g == id) {
                                        open.remove(pos);
                                    } else {
                                        open.push(id);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&id)
                            >
                                {icon("chevron-down")}
                            </div>
                        </div>
                        <Show when=move || expanded_groups.get().contains(&id)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(path, label)| {
                                    let active_path = path.clone();
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || is_active(&active_path)
                                        >
                                            <A href=path>{label}</A>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::registry::all_tables;

    #[test]
    fn every_table_appears_in_exactly_one_group() {
        let groups = menu_groups();
        assert_eq!(groups.len(), Layer::ALL.len() + 1);
        for table in all_tables() {
            let path = table.route_path();
            let holders = groups
                .iter()
                .filter(|g| g.items.iter().any(|(p, _)| *p == path))
                .count();
            assert_eq!(holders, 1, "{}", table.table_name);
        }
    }

    #[test]
    fn layer_group_starts_with_its_overview() {
        let groups = menu_groups();
        let security = groups.iter().find(|g| g.id == "security").unwrap();
        assert_eq!(security.items[0].0, Layer::Security.route_path());
    }
}
