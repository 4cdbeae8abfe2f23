//! Static descriptors that drive the generic table components.
//!
//! All descriptors are `'static` constants built at compile time; nothing here is
//! ever persisted.

use crate::domain::layers::Layer;

/// Business key used by update/delete lookups.
pub const KEY_COLUMN: &str = "code";
/// Display column; lists are ordered by it.
pub const NAME_COLUMN: &str = "name";

/// Storage and input kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    #[default]
    Text,
    LongText,
    Integer,
}

impl ColumnKind {
    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Text | Self::LongText => "TEXT",
            Self::Integer => "INTEGER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: ColumnKind,
}

impl ColumnDef {
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: ColumnKind::Text,
        }
    }

    pub const fn long_text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: ColumnKind::LongText,
        }
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: ColumnKind::Integer,
        }
    }

    /// `code` and `name` must be non-blank on every row.
    pub fn is_required(&self) -> bool {
        self.name == KEY_COLUMN || self.name == NAME_COLUMN
    }
}

pub const CODE: ColumnDef = ColumnDef::text(KEY_COLUMN, "الرمز");
pub const NAME: ColumnDef = ColumnDef::text(NAME_COLUMN, "الاسم");
pub const DESCRIPTION: ColumnDef = ColumnDef::long_text("description", "الوصف");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Reference,
    Entity(Layer),
}

/// Identity and display metadata of one backing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDescriptor {
    /// URL segment, unique within its kind.
    pub slug: &'static str,
    pub table_name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub kind: TableKind,
    /// Ordered; always starts with `code`, `name`.
    pub columns: &'static [ColumnDef],
}

impl TableDescriptor {
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.columns.iter().map(|c| c.name)
    }

    pub fn layer(&self) -> Option<Layer> {
        match self.kind {
            TableKind::Entity(layer) => Some(layer),
            TableKind::Reference => None,
        }
    }

    /// Client route of the page managing this table.
    pub fn route_path(&self) -> String {
        match self.kind {
            TableKind::Reference => format!("/admin/references/{}", self.slug),
            TableKind::Entity(layer) => format!("/architecture/{}/{}", layer.slug(), self.slug),
        }
    }
}

/// Maps a dashboard card to the table whose rows it counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub table: &'static str,
}
