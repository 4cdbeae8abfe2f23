use contracts::shared::descriptor::{ColumnDef, TableDescriptor, KEY_COLUMN, NAME_COLUMN};
use contracts::shared::row::{CellValue, ReferenceRow};

use crate::shared::messages;
use crate::shared::table_api::TableApiError;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    Create,
    /// Edits are addressed by the code the row had when the editor opened.
    Edit { original_code: String },
}

impl EditorMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }
}

/// Raw input of the editor dialog, one string per configured column.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorForm {
    fields: Vec<(&'static ColumnDef, String)>,
}

impl EditorForm {
    pub fn blank(table: &TableDescriptor) -> Self {
        Self {
            fields: table.columns.iter().map(|c| (c, String::new())).collect(),
        }
    }

    /// Missing columns and nulls become empty strings.
    pub fn from_row(table: &TableDescriptor, row: &ReferenceRow) -> Self {
        Self {
            fields: table
                .columns
                .iter()
                .map(|c| (c, row.text(c.name)))
                .collect(),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static ColumnDef, &str)> + '_ {
        self.fields.iter().map(|(c, v)| (*c, v.as_str()))
    }

    pub fn get(&self, column: &str) -> &str {
        self.fields
            .iter()
            .find(|(c, _)| c.name == column)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    /// Ignored for columns the table does not have.
    pub fn set(&mut self, column: &str, value: impl Into<String>) {
        if let Some((_, v)) = self.fields.iter_mut().find(|(c, _)| c.name == column) {
            *v = value.into();
        }
    }

    pub fn validate(&self) -> Result<(), SubmitError> {
        for column in [KEY_COLUMN, NAME_COLUMN] {
            if self.get(column).trim().is_empty() {
                return Err(SubmitError::Validation { column });
            }
        }
        Ok(())
    }

    pub fn to_row(&self) -> ReferenceRow {
        ReferenceRow::from_pairs(
            self.fields
                .iter()
                .map(|(c, v)| (c.name, CellValue::from_input(c.kind, v))),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// A required column is blank; nothing was sent.
    Validation { column: &'static str },
    Store(TableApiError),
}

impl SubmitError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation { .. } => messages::REQUIRED_FIELDS,
            Self::Store(e) => messages::for_error(e, messages::SAVE_FAILED),
        }
    }
}

/// Lifecycle of one manager instance.
///
/// `Loading → Idle ⇄ EditorOpen → Idle` and `Idle → ConfirmingDelete → Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ManagerState {
    #[default]
    Loading,
    Idle,
    EditorOpen {
        mode: EditorMode,
        form: EditorForm,
        error: Option<String>,
    },
    ConfirmingDelete {
        code: String,
    },
}

impl ManagerState {
    pub fn create(table: &TableDescriptor) -> Self {
        Self::EditorOpen {
            mode: EditorMode::Create,
            form: EditorForm::blank(table),
            error: None,
        }
    }

    pub fn edit(table: &TableDescriptor, row: &ReferenceRow) -> Self {
        Self::EditorOpen {
            mode: EditorMode::Edit {
                original_code: row.code(),
            },
            form: EditorForm::from_row(table, row),
            error: None,
        }
    }

    /// First load finished; other states are left alone.
    pub fn loaded(self) -> Self {
        match self {
            Self::Loading => Self::Idle,
            other => other,
        }
    }

    pub fn close(self) -> Self {
        Self::Idle
    }

    /// Only an idle manager may start a delete.
    pub fn confirm_delete(self, code: &str) -> Self {
        match self {
            Self::Idle => Self::ConfirmingDelete {
                code: code.to_string(),
            },
            other => other,
        }
    }

    /// Keeps the editor open with its values and shows `message`.
    pub fn rejected(self, message: &str) -> Self {
        match self {
            Self::EditorOpen { mode, form, .. } => Self::EditorOpen {
                mode,
                form,
                error: Some(message.to_string()),
            },
            other => other,
        }
    }

    pub fn set_field(&mut self, column: &str, value: String) {
        if let Self::EditorOpen { form, error, .. } = self {
            form.set(column, value);
            *error = None;
        }
    }

    pub fn is_editor_open(&self) -> bool {
        matches!(self, Self::EditorOpen { .. })
    }

    pub fn editor(&self) -> Option<(&EditorMode, &EditorForm)> {
        match self {
            Self::EditorOpen { mode, form, .. } => Some((mode, form)),
            _ => None,
        }
    }

    pub fn editor_error(&self) -> Option<String> {
        match self {
            Self::EditorOpen { error, .. } => error.clone(),
            _ => None,
        }
    }
}

/// What the table area renders.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    /// The table has no rows at all.
    Empty,
    /// Rows exist but the search hides all of them.
    NoMatches,
    Rows(Vec<ReferenceRow>),
}

impl ListView {
    pub fn build(rows: &[ReferenceRow], search: &str) -> Self {
        if rows.is_empty() {
            return Self::Empty;
        }
        let visible: Vec<ReferenceRow> = rows
            .iter()
            .filter(|r| r.matches_filter(search))
            .cloned()
            .collect();
        if visible.is_empty() {
            Self::NoMatches
        } else {
            Self::Rows(visible)
        }
    }
}

/// Orders overlapping list loads: only rows of the most recently started load
/// may replace the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadTracker {
    started: u64,
}

impl LoadTracker {
    pub fn start(&mut self) -> u64 {
        self.started += 1;
        self.started
    }

    pub fn is_current(&self, load: u64) -> bool {
        load == self.started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::reference::{REF_CRITICALITY_LEVELS, REF_DEPARTMENTS};

    fn hr() -> ReferenceRow {
        ReferenceRow::new()
            .with("code", "HR")
            .with("name", "الموارد البشرية")
            .with("parent_code", CellValue::Null)
    }

    #[test]
    fn create_opens_blank_form_for_every_column() {
        let state = ManagerState::create(&REF_DEPARTMENTS);
        let (mode, form) = state.editor().unwrap();
        assert_eq!(mode, &EditorMode::Create);
        let cols: Vec<_> = form.fields().map(|(c, v)| (c.name, v.to_string())).collect();
        assert_eq!(
            cols,
            [
                ("code", String::new()),
                ("name", String::new()),
                ("description", String::new()),
                ("parent_code", String::new()),
            ]
        );
    }

    #[test]
    fn edit_remembers_original_code_and_blanks_nulls() {
        let state = ManagerState::edit(&REF_DEPARTMENTS, &hr());
        let (mode, form) = state.editor().unwrap();
        assert_eq!(
            mode,
            &EditorMode::Edit {
                original_code: "HR".to_string()
            }
        );
        assert_eq!(form.get("parent_code"), "");
        assert_eq!(form.get("description"), "");
        assert_eq!(form.get("name"), "الموارد البشرية");
    }

    #[test]
    fn validation_requires_code_then_name() {
        let mut form = EditorForm::blank(&REF_DEPARTMENTS);
        assert_eq!(
            form.validate(),
            Err(SubmitError::Validation { column: "code" })
        );
        form.set("code", "HR");
        form.set("name", "   ");
        assert_eq!(
            form.validate(),
            Err(SubmitError::Validation { column: "name" })
        );
        form.set("name", "HR");
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn form_converts_integer_columns() {
        let mut form = EditorForm::blank(&REF_CRITICALITY_LEVELS);
        form.set("code", "HIGH");
        form.set("name", "عالية");
        form.set("level", "3");
        let row = form.to_row();
        assert_eq!(row.get("level"), Some(&CellValue::Integer(3)));
        assert_eq!(row.get("description"), Some(&CellValue::text("")));

        form.set("level", "");
        assert_eq!(form.to_row().get("level"), Some(&CellValue::Null));
    }

    #[test]
    fn unknown_columns_are_ignored_by_set() {
        let mut form = EditorForm::blank(&REF_DEPARTMENTS);
        form.set("salary", "1");
        assert!(!form.to_row().0.contains_key("salary"));
    }

    #[test]
    fn transitions() {
        let state = ManagerState::default();
        assert_eq!(state, ManagerState::Loading);
        let state = state.loaded();
        assert_eq!(state, ManagerState::Idle);

        let state = state.confirm_delete("HR");
        assert_eq!(
            state,
            ManagerState::ConfirmingDelete {
                code: "HR".to_string()
            }
        );
        assert_eq!(state.close(), ManagerState::Idle);

        let mut editing = ManagerState::create(&REF_DEPARTMENTS).rejected("boom");
        assert_eq!(editing.editor_error().as_deref(), Some("boom"));
        editing.set_field("code", "HR".to_string());
        assert_eq!(editing.editor_error(), None);
        assert_eq!(editing.editor().unwrap().1.get("code"), "HR");

        // A delete cannot start while the editor is open.
        assert!(editing.clone().confirm_delete("HR").is_editor_open());
        assert!(editing.loaded().is_editor_open());
    }

    #[test]
    fn list_view_distinguishes_empty_from_filtered_out() {
        assert_eq!(ListView::build(&[], ""), ListView::Empty);
        assert_eq!(ListView::build(&[hr()], "finance"), ListView::NoMatches);
        assert_eq!(ListView::build(&[hr()], "hr"), ListView::Rows(vec![hr()]));
    }

    #[test]
    fn only_the_latest_load_is_current() {
        let mut loads = LoadTracker::default();
        let refresh = loads.start();
        let after_save = loads.start();
        assert!(loads.is_current(after_save));
        // The refresh started first and finishes last; its rows are stale.
        assert!(!loads.is_current(refresh));
        let next = loads.start();
        assert!(!loads.is_current(after_save));
        assert!(loads.is_current(next));
    }
}
