//! The six architecture layers (TOGAF / NORA style) and their entity tables.

mod tables;

pub use tables::{entity_tables, find_entity, ENTITY_TABLES};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Business,
    Applications,
    Data,
    Technology,
    Security,
    Ux,
}

impl Layer {
    pub const ALL: [Layer; 6] = [
        Layer::Business,
        Layer::Applications,
        Layer::Data,
        Layer::Technology,
        Layer::Security,
        Layer::Ux,
    ];

    /// URL segment under `/architecture/`.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Business => "business",
            Self::Applications => "applications",
            Self::Data => "data",
            Self::Technology => "technology",
            Self::Security => "security",
            Self::Ux => "ux",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.slug() == slug)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Business => "طبقة الأعمال",
            Self::Applications => "طبقة التطبيقات",
            Self::Data => "طبقة البيانات",
            Self::Technology => "طبقة التقنية",
            Self::Security => "طبقة الأمن",
            Self::Ux => "طبقة تجربة المستخدم",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            Self::Business => "Business",
            Self::Applications => "Applications",
            Self::Data => "Data",
            Self::Technology => "Technology",
            Self::Security => "Security",
            Self::Ux => "UX",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Business => "#f59e0b",
            Self::Applications => "#3b82f6",
            Self::Data => "#10b981",
            Self::Technology => "#8b5cf6",
            Self::Security => "#ef4444",
            Self::Ux => "#ec4899",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Business => "briefcase",
            Self::Applications => "layout-dashboard",
            Self::Data => "database",
            Self::Technology => "server",
            Self::Security => "shield",
            Self::Ux => "users",
        }
    }

    pub fn route_path(&self) -> String {
        format!("/architecture/{}", self.slug())
    }
}
