use contracts::shared::descriptor::{ColumnDef, ColumnKind, TableDescriptor};
use contracts::shared::row::ReferenceRow;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{
    Button, ButtonAppearance, ButtonSize, Input, Table, TableBody, TableCell, TableCellLayout,
    TableHeader, TableHeaderCell, TableRow,
};

use super::controller::{DeleteOutcome, ReferenceTableManager};
use super::state::{ListView, LoadTracker, ManagerState};
use crate::shared::messages;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::notifications::{use_notifications, NotificationService};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::table_api::HttpTableStore;
use crate::system::auth::context::{use_session, SessionContext};

type Manager = ReferenceTableManager<HttpTableStore, NotificationService, SessionContext>;

fn confirm_in_browser(code: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(&messages::confirm_delete(code)).ok())
        .unwrap_or(false)
}

/// List, search, create, edit and delete rows of one table.
#[component]
pub fn ReferenceTable(table: &'static TableDescriptor) -> impl IntoView {
    let manager: StoredValue<Manager> = StoredValue::new(ReferenceTableManager::new(
        table,
        HttpTableStore::new(),
        use_notifications(),
        use_session(),
    ));

    let rows = RwSignal::new(Vec::<ReferenceRow>::new());
    let state = RwSignal::new(ManagerState::Loading);
    let busy = RwSignal::new(false);
    let search = RwSignal::new(String::new());
    let loads = StoredValue::new(LoadTracker::default());

    let begin_load = move || {
        let mut tracker = loads.get_value();
        let id = tracker.start();
        loads.set_value(tracker);
        id
    };
    let is_current = move |id: u64| loads.try_get_value().is_some_and(|t| t.is_current(id));

    let reload = move || {
        let mgr = manager.get_value();
        let load = begin_load();
        spawn_local(async move {
            if let Some(loaded) = mgr.list().await {
                if is_current(load) {
                    rows.try_set(loaded);
                }
            }
            state.try_update(|s| *s = std::mem::take(s).loaded());
        });
    };

    Effect::new(move |_| reload());

    let open_create = move |_| {
        state.update(|s| {
            if matches!(s, ManagerState::Idle) {
                *s = ManagerState::create(table);
            }
        })
    };

    let close_editor = Callback::new(move |_: ()| {
        if !busy.get_untracked() {
            state.update(|s| *s = std::mem::take(s).close());
        }
    });

    let submit = move |_| {
        let Some((mode, form)) =
            state.with_untracked(|s| s.editor().map(|(m, f)| (m.clone(), f.clone())))
        else {
            return;
        };
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let mgr = manager.get_value();
        let load = begin_load();
        spawn_local(async move {
            match mgr.submit(&mode, &form).await {
                Ok(reloaded) => {
                    if let Some(loaded) = reloaded.filter(|_| is_current(load)) {
                        rows.try_set(loaded);
                    }
                    state.try_update(|s| *s = std::mem::take(s).close());
                }
                Err(e) => {
                    state.try_update(|s| *s = std::mem::take(s).rejected(e.user_message()));
                }
            }
            busy.try_set(false);
        });
    };

    let delete = move |code: String| {
        if busy.get_untracked() || !state.with_untracked(|s| matches!(s, ManagerState::Idle)) {
            return;
        }
        state.update(|s| *s = std::mem::take(s).confirm_delete(&code));
        busy.set(true);
        let mgr = manager.get_value();
        let load = begin_load();
        spawn_local(async move {
            if let DeleteOutcome::Deleted(Some(loaded)) = mgr.delete(&code, confirm_in_browser).await {
                if is_current(load) {
                    rows.try_set(loaded);
                }
            }
            state.try_update(|s| *s = std::mem::take(s).close());
            busy.try_set(false);
        });
    };

    let open_edit = move |row: ReferenceRow| {
        state.update(|s| {
            if matches!(s, ManagerState::Idle) {
                *s = ManagerState::edit(table, &row);
            }
        })
    };

    let is_loading = move || state.with(|s| matches!(s, ManagerState::Loading));

    view! {
        <PageFrame page_id=format!("{}--list", table.table_name) category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{table.display_name}</h1>
                    <div class="page__subtitle">{table.description}</div>
                </div>
                <div class="page__header-right">
                    <div style="width: 280px;">
                        <Input value=search placeholder="بحث في جميع الأعمدة..." />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| reload()
                        disabled=Signal::derive(move || busy.get())
                    >
                        "تحديث"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=open_create
                        disabled=Signal::derive(move || busy.get() || is_loading())
                    >
                        "إضافة سجل"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Show
                    when=move || !is_loading()
                    fallback=|| view! { <div class="page__placeholder">"جارٍ التحميل..."</div> }
                >
                    {move || match rows.with(|r| ListView::build(r, &search.get())) {
                        ListView::Empty => view! {
                            <div class="page__placeholder">{messages::EMPTY_TABLE}</div>
                        }
                        .into_any(),
                        ListView::NoMatches => view! {
                            <div class="page__placeholder">{messages::NO_MATCHES}</div>
                        }
                        .into_any(),
                        ListView::Rows(visible) => view! {
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        {table
                                            .columns
                                            .iter()
                                            .map(|c| view! { <TableHeaderCell>{c.label}</TableHeaderCell> })
                                            .collect_view()}
                                        <TableHeaderCell min_width=160.0>"إجراءات"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {visible
                                        .into_iter()
                                        .map(|row| {
                                            let code = row.code();
                                            let for_edit = row.clone();
                                            view! {
                                                <TableRow>
                                                    {table
                                                        .columns
                                                        .iter()
                                                        .map(|c| {
                                                            let text = row.text(c.name);
                                                            view! {
                                                                <TableCell>
                                                                    <TableCellLayout>{text}</TableCellLayout>
                                                                </TableCell>
                                                            }
                                                        })
                                                        .collect_view()}
                                                    <TableCell>
                                                        <div class="table__actions">
                                                            <Button
                                                                size=ButtonSize::Small
                                                                on_click=move |_| open_edit(for_edit.clone())
                                                            >
                                                                "تعديل"
                                                            </Button>
                                                            <Button
                                                                size=ButtonSize::Small
                                                                on_click=move |_| delete(code.clone())
                                                                disabled=Signal::derive(move || busy.get())
                                                            >
                                                                "حذف"
                                                            </Button>
                                                        </div>
                                                    </TableCell>
                                                </TableRow>
                                            }
                                        })
                                        .collect_view()}
                                </TableBody>
                            </Table>
                        }
                        .into_any(),
                    }}
                </Show>
            </div>

            <Show when=move || state.with(ManagerState::is_editor_open)>
                <ModalFrame on_close=close_editor modal_class="modal--editor".to_string()>
                    <div class="modal__header">
                        <h2 class="modal__title">
                            {move || {
                                let editing = state.with(|s| {
                                    s.editor().map(|(m, _)| m.is_edit()).unwrap_or(false)
                                });
                                if editing { "تعديل السجل" } else { "إضافة سجل" }
                            }}
                        </h2>
                    </div>
                    <form
                        class="form"
                        on:submit=move |ev| {
                            ev.prevent_default();
                            submit(());
                        }
                    >
                        {table
                            .columns
                            .iter()
                            .map(|column| view! { <EditorField column=column state=state /> })
                            .collect_view()}
                        {move || {
                            state
                                .with(ManagerState::editor_error)
                                .map(|e| view! { <div class="form__error">{e}</div> })
                        }}
                        <div class="form__actions">
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| submit(())
                                disabled=Signal::derive(move || busy.get())
                            >
                                {move || if busy.get() { "جارٍ الحفظ..." } else { "حفظ" }}
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| close_editor.run(())
                                disabled=Signal::derive(move || busy.get())
                            >
                                "إلغاء"
                            </Button>
                        </div>
                    </form>
                </ModalFrame>
            </Show>
        </PageFrame>
    }
}

/// One labelled input bound to a column of the open editor.
#[component]
fn EditorField(column: &'static ColumnDef, state: RwSignal<ManagerState>) -> impl IntoView {
    let name = column.name;
    let value = move || {
        state.with(|s| {
            s.editor()
                .map(|(_, form)| form.get(name).to_string())
                .unwrap_or_default()
        })
    };
    let on_input = move |ev: leptos::ev::Event| state.update(|s| s.set_field(name, event_target_value(&ev)));
    let required = column.is_required();

    let input = match column.kind {
        ColumnKind::LongText => view! {
            <textarea
                id=name
                class="form__input"
                rows=3
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
        ColumnKind::Integer => view! {
            <input
                id=name
                class="form__input"
                type="number"
                step="1"
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
        ColumnKind::Text => view! {
            <input
                id=name
                class="form__input"
                type="text"
                required=required
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group">
            <label class="form__label" for=name>
                {column.label}
                {required.then_some(" *")}
            </label>
            {input}
        </div>
    }
}
