use contracts::shared::descriptor::TableDescriptor;
use contracts::shared::reference::{
    REF_CRITICALITY_LEVELS, REF_DEPARTMENTS, REF_HOSTING_TYPES, REF_LIFECYCLE_STATUSES,
};
use contracts::shared::row::ReferenceRow;
use sea_orm::DatabaseConnection;

use super::error::StoreError;
use super::repository;

fn row(code: &str, name: &str, description: &str) -> ReferenceRow {
    ReferenceRow::new()
        .with("code", code)
        .with("name", name)
        .with("description", description)
}

fn sample_rows() -> Vec<(&'static TableDescriptor, Vec<ReferenceRow>)> {
    vec![
        (
            &REF_DEPARTMENTS,
            vec![
                row("IT", "إدارة تقنية المعلومات", "تشغيل وتطوير الأنظمة"),
                row("HR", "إدارة الموارد البشرية", ""),
                row("FIN", "الإدارة المالية", ""),
                row("IT-INFRA", "قسم البنية التحتية", "").with("parent_code", "IT"),
            ],
        ),
        (
            &REF_LIFECYCLE_STATUSES,
            vec![
                row("PLANNED", "مخطط", "").with("sort_order", 1i64),
                row("ACTIVE", "قيد التشغيل", "").with("sort_order", 2i64),
                row("RETIRING", "قيد الإيقاف", "").with("sort_order", 3i64),
                row("RETIRED", "متوقف", "").with("sort_order", 4i64),
            ],
        ),
        (
            &REF_CRITICALITY_LEVELS,
            vec![
                row("CRITICAL", "حرج", "").with("level", 1i64),
                row("HIGH", "عالٍ", "").with("level", 2i64),
                row("MEDIUM", "متوسط", "").with("level", 3i64),
                row("LOW", "منخفض", "").with("level", 4i64),
            ],
        ),
        (
            &REF_HOSTING_TYPES,
            vec![
                row("ONPREM", "مركز البيانات الداخلي", ""),
                row("CLOUD", "سحابة عامة", ""),
                row("HYBRID", "هجين", ""),
            ],
        ),
    ]
}

/// Fills empty reference tables with a starter set of rows.
///
/// Tables that already hold data are left untouched.
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<usize, StoreError> {
    let mut seeded = 0;
    for (table, rows) in sample_rows() {
        if repository::count(db, table).await? > 0 {
            continue;
        }
        repository::insert(db, table, &rows).await?;
        tracing::info!("Seeded {} sample rows into {}", rows.len(), table.table_name);
        seeded += 1;
    }
    Ok(seeded)
}
