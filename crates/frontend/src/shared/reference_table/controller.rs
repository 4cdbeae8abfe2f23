use contracts::shared::descriptor::{TableDescriptor, KEY_COLUMN};
use contracts::shared::row::ReferenceRow;
use contracts::shared::table_api::{KeyFilter, SortOrder};

use super::state::{EditorForm, EditorMode, SubmitError};
use crate::shared::messages;
use crate::shared::notifications::Notifier;
use crate::shared::table_api::{TableApiError, TableStore};
use crate::system::auth::context::SessionExpiry;

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The user declined; nothing was sent.
    Cancelled,
    /// Deleted. Carries the reloaded rows unless the reload failed.
    Deleted(Option<Vec<ReferenceRow>>),
    Failed,
}

/// CRUD operations of one table, reporting through a [`Notifier`].
///
/// Failures are logged and notified here and never returned as panics or
/// bubbled past the caller. A rejected access token is also handed to the
/// session.
#[derive(Clone)]
pub struct ReferenceTableManager<S, N, E> {
    table: &'static TableDescriptor,
    store: S,
    notifier: N,
    session: E,
}

impl<S: TableStore, N: Notifier, E: SessionExpiry> ReferenceTableManager<S, N, E> {
    pub fn new(table: &'static TableDescriptor, store: S, notifier: N, session: E) -> Self {
        Self {
            table,
            store,
            notifier,
            session,
        }
    }

    pub fn table(&self) -> &'static TableDescriptor {
        self.table
    }

    fn report(&self, error: &TableApiError, fallback: &'static str) {
        self.notifier.error(messages::for_error(error, fallback));
        if *error == TableApiError::Unauthenticated {
            self.session.session_expired();
        }
    }

    /// All rows ordered by name. `None` after a failure, so the caller keeps
    /// what it showed before.
    pub async fn list(&self) -> Option<Vec<ReferenceRow>> {
        match self
            .store
            .list(self.table.table_name, &SortOrder::default())
            .await
        {
            Ok(rows) => {
                log::debug!("{}: loaded {} rows", self.table.table_name, rows.len());
                Some(rows)
            }
            Err(e) => {
                log::error!("{}: list failed: {}", self.table.table_name, e);
                self.report(&e, messages::LOAD_FAILED);
                None
            }
        }
    }

    /// Validates, writes and reloads.
    ///
    /// `Ok` means the editor can close; it carries the reloaded rows unless the
    /// reload failed. On `Err` the editor stays open with its values.
    pub async fn submit(
        &self,
        mode: &EditorMode,
        form: &EditorForm,
    ) -> Result<Option<Vec<ReferenceRow>>, SubmitError> {
        if let Err(e) = form.validate() {
            log::warn!("{}: submit blocked: {:?}", self.table.table_name, e);
            self.notifier.error(messages::REQUIRED_FIELDS);
            return Err(e);
        }

        let row = form.to_row();
        let result = match mode {
            EditorMode::Create => {
                self.store
                    .insert(self.table.table_name, std::slice::from_ref(&row))
                    .await
            }
            EditorMode::Edit { original_code } => {
                self.store
                    .update(
                        self.table.table_name,
                        &row,
                        &KeyFilter::eq(KEY_COLUMN, original_code.as_str()),
                    )
                    .await
            }
        };

        match result {
            Ok(affected) => {
                log::info!(
                    "{}: saved '{}' ({} row(s))",
                    self.table.table_name,
                    row.code(),
                    affected
                );
                self.notifier.success(messages::SAVE_SUCCEEDED);
                Ok(self.list().await)
            }
            Err(e) => {
                log::error!("{}: save failed: {}", self.table.table_name, e);
                self.report(&e, messages::SAVE_FAILED);
                Err(SubmitError::Store(e))
            }
        }
    }

    /// Deletes the row with `code` once `confirm` agrees.
    pub async fn delete(&self, code: &str, confirm: impl FnOnce(&str) -> bool) -> DeleteOutcome {
        if !confirm(code) {
            log::debug!("{}: delete of '{}' cancelled", self.table.table_name, code);
            return DeleteOutcome::Cancelled;
        }

        match self
            .store
            .delete(self.table.table_name, &KeyFilter::eq(KEY_COLUMN, code))
            .await
        {
            Ok(_) => {
                log::info!("{}: deleted '{}'", self.table.table_name, code);
                self.notifier.success(messages::DELETE_SUCCEEDED);
                DeleteOutcome::Deleted(self.list().await)
            }
            Err(e) => {
                log::error!("{}: delete of '{}' failed: {}", self.table.table_name, code, e);
                self.report(&e, messages::DELETE_FAILED);
                DeleteOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::notifications::NotificationKind;
    use crate::shared::reference_table::state::ManagerState;
    use crate::shared::table_api::memory::{Call, MemoryStore};
    use contracts::shared::reference::REF_DEPARTMENTS;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const TABLE: &str = "ref_departments";

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(NotificationKind, String)>>>);

    impl Recorder {
        fn kinds(&self) -> Vec<NotificationKind> {
            self.0.borrow().iter().map(|(k, _)| *k).collect()
        }

        fn last(&self) -> Option<String> {
            self.0.borrow().last().map(|(_, t)| t.clone())
        }
    }

    impl Notifier for Recorder {
        fn notify(&self, kind: NotificationKind, text: &str) {
            self.0.borrow_mut().push((kind, text.to_string()));
        }
    }

    #[derive(Clone, Default)]
    struct Expiries(Rc<Cell<usize>>);

    impl SessionExpiry for Expiries {
        fn session_expired(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    type TestManager = ReferenceTableManager<MemoryStore, Recorder, Expiries>;

    fn manager_with_session(store: &MemoryStore) -> (TestManager, Recorder, Expiries) {
        let recorder = Recorder::default();
        let expiries = Expiries::default();
        (
            ReferenceTableManager::new(
                &REF_DEPARTMENTS,
                store.clone(),
                recorder.clone(),
                expiries.clone(),
            ),
            recorder,
            expiries,
        )
    }

    fn manager(store: &MemoryStore) -> (TestManager, Recorder) {
        let (mgr, recorder, _) = manager_with_session(store);
        (mgr, recorder)
    }

    fn row(code: &str, name: &str) -> ReferenceRow {
        ReferenceRow::new().with("code", code).with("name", name)
    }

    fn form(code: &str, name: &str) -> EditorForm {
        let mut form = EditorForm::blank(&REF_DEPARTMENTS);
        form.set("code", code);
        form.set("name", name);
        form
    }

    fn codes(rows: &[ReferenceRow]) -> Vec<String> {
        rows.iter().map(ReferenceRow::code).collect()
    }

    #[test]
    fn list_orders_by_name_and_reports_empty() {
        let store = MemoryStore::new();
        let (mgr, _) = manager(&store);
        assert_eq!(block_on(mgr.list()), Some(vec![]));

        let store = MemoryStore::new().with_rows(TABLE, vec![row("IT", "تقنية"), row("FIN", "المالية")]);
        let (mgr, _) = manager(&store);
        let rows = block_on(mgr.list()).unwrap();
        assert_eq!(codes(&rows), ["FIN", "IT"]);
    }

    #[test]
    fn failed_list_notifies_and_returns_none() {
        let store = MemoryStore::new();
        store.fail_table(TABLE);
        let (mgr, notes) = manager(&store);
        assert_eq!(block_on(mgr.list()), None);
        assert_eq!(notes.kinds(), [NotificationKind::Error]);
        assert_eq!(notes.last().as_deref(), Some(messages::LOAD_FAILED));
    }

    #[test]
    fn create_then_list_contains_submitted_row() {
        let store = MemoryStore::new();
        let (mgr, notes) = manager(&store);

        let rows = block_on(mgr.submit(&EditorMode::Create, &form("HR", "الموارد البشرية")))
            .unwrap()
            .unwrap();
        assert_eq!(codes(&rows), ["HR"]);
        assert_eq!(rows[0].name(), "الموارد البشرية");
        assert_eq!(notes.kinds(), [NotificationKind::Success]);
        assert_eq!(
            store.calls(),
            [Call::Insert(TABLE.into()), Call::List(TABLE.into())]
        );
    }

    #[test]
    fn repeated_edit_leaves_the_same_state() {
        let store = MemoryStore::new().with_rows(TABLE, vec![row("HR", "Human Resources")]);
        let (mgr, _) = manager(&store);
        let mode = EditorMode::Edit {
            original_code: "HR".to_string(),
        };
        let mut edit = EditorForm::from_row(&REF_DEPARTMENTS, &row("HR", "Human Resources"));
        edit.set("name", "People");

        let first = block_on(mgr.submit(&mode, &edit)).unwrap();
        let second = block_on(mgr.submit(&mode, &edit)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.unwrap()[0].name(), "People");
        assert!(store
            .calls()
            .contains(&Call::Update(TABLE.into(), "HR".into())));
    }

    #[test]
    fn blank_required_fields_make_no_store_call() {
        let store = MemoryStore::new();
        let (mgr, notes) = manager(&store);
        let state = ManagerState::create(&REF_DEPARTMENTS);

        for (code, name) in [("", "Human Resources"), ("HR", "  ")] {
            let err = block_on(mgr.submit(&EditorMode::Create, &form(code, name))).unwrap_err();
            assert!(matches!(err, SubmitError::Validation { .. }));
        }
        assert!(store.calls().is_empty());
        assert_eq!(notes.last().as_deref(), Some(messages::REQUIRED_FIELDS));

        // The caller keeps the editor open with the typed values.
        let state = state.rejected(messages::REQUIRED_FIELDS);
        assert!(state.is_editor_open());
    }

    #[test]
    fn rejected_token_hands_over_to_the_session() {
        let store = MemoryStore::new().with_rows(TABLE, vec![row("HR", "Human Resources")]);
        store.expire_session();
        let (mgr, notes, expiries) = manager_with_session(&store);

        assert_eq!(block_on(mgr.list()), None);
        assert_eq!(notes.last().as_deref(), Some(messages::SESSION_EXPIRED));
        assert_eq!(expiries.0.get(), 1);

        let err = block_on(mgr.submit(&EditorMode::Create, &form("IT", "تقنية"))).unwrap_err();
        assert!(matches!(err, SubmitError::Store(TableApiError::Unauthenticated)));
        assert_eq!(block_on(mgr.delete("HR", |_| true)), DeleteOutcome::Failed);
        assert_eq!(expiries.0.get(), 3);
        assert_eq!(codes(&store.rows(TABLE)), ["HR"]);
    }

    #[test]
    fn other_failures_leave_the_session_alone() {
        let store = MemoryStore::new();
        store.fail_table(TABLE);
        let (mgr, _, expiries) = manager_with_session(&store);
        assert_eq!(block_on(mgr.list()), None);
        assert_eq!(block_on(mgr.delete("HR", |_| true)), DeleteOutcome::Failed);
        assert_eq!(expiries.0.get(), 0);
    }

    #[test]
    fn duplicate_code_is_reported_as_taken() {
        let store = MemoryStore::new().with_rows(TABLE, vec![row("HR", "Human Resources")]);
        let (mgr, notes) = manager(&store);
        let err = block_on(mgr.submit(&EditorMode::Create, &form("HR", "Other"))).unwrap_err();
        assert!(matches!(err, SubmitError::Store(ref e) if e.is_conflict()));
        assert_eq!(notes.last().as_deref(), Some(messages::CODE_TAKEN));
        assert_eq!(store.rows(TABLE).len(), 1);
    }

    #[test]
    fn cancelled_delete_makes_no_store_call() {
        let store = MemoryStore::new().with_rows(TABLE, vec![row("HR", "Human Resources")]);
        let (mgr, notes) = manager(&store);
        let mut asked = None;
        let outcome = block_on(mgr.delete("HR", |code| {
            asked = Some(code.to_string());
            false
        }));
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(asked.as_deref(), Some("HR"));
        assert!(store.calls().is_empty());
        assert!(notes.kinds().is_empty());
        assert_eq!(codes(&store.rows(TABLE)), ["HR"]);
    }

    #[test]
    fn failed_delete_keeps_rows() {
        let store = MemoryStore::new().with_rows(TABLE, vec![row("HR", "Human Resources")]);
        store.fail_table(TABLE);
        let (mgr, notes) = manager(&store);
        assert_eq!(block_on(mgr.delete("HR", |_| true)), DeleteOutcome::Failed);
        assert_eq!(notes.last().as_deref(), Some(messages::DELETE_FAILED));
        store.heal_table(TABLE);
        assert_eq!(codes(&store.rows(TABLE)), ["HR"]);
    }

    #[test]
    fn departments_create_list_delete_cycle() {
        let store = MemoryStore::new();
        let (mgr, notes) = manager(&store);

        let mut hr = form("HR", "الموارد البشرية");
        hr.set("description", "شؤون الموظفين");
        block_on(mgr.submit(&EditorMode::Create, &hr)).unwrap();
        block_on(mgr.submit(&EditorMode::Create, &form("IT", "تقنية المعلومات"))).unwrap();

        let rows = block_on(mgr.list()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|r| r.text("description") == "شؤون الموظفين"));

        let rows = match block_on(mgr.delete("HR", |_| true)) {
            DeleteOutcome::Deleted(Some(rows)) => rows,
            other => panic!("expected reloaded rows, got {:?}", other),
        };
        assert_eq!(codes(&rows), ["IT"]);
        assert_eq!(
            store.calls().last(),
            Some(&Call::List(TABLE.into()))
        );
        assert_eq!(
            notes.kinds(),
            [
                NotificationKind::Success,
                NotificationKind::Success,
                NotificationKind::Success
            ]
        );
    }
}
