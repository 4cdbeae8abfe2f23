//! Reference (lookup) tables managed through `/admin/references/{slug}`.

use super::descriptor::{ColumnDef, TableDescriptor, TableKind, CODE, DESCRIPTION, NAME};

const BASIC_COLUMNS: &[ColumnDef] = &[CODE, NAME, DESCRIPTION];

pub const REF_DEPARTMENTS: TableDescriptor = TableDescriptor {
    slug: "departments",
    table_name: "ref_departments",
    display_name: "الإدارات",
    description: "الهيكل التنظيمي للإدارات والأقسام المالكة للأصول",
    kind: TableKind::Reference,
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("parent_code", "رمز الإدارة الأم"),
    ],
};

pub const REF_BUSINESS_DOMAINS: TableDescriptor = TableDescriptor {
    slug: "business-domains",
    table_name: "ref_business_domains",
    display_name: "مجالات الأعمال",
    description: "تصنيف الخدمات حسب مجال الأعمال",
    kind: TableKind::Reference,
    columns: BASIC_COLUMNS,
};

pub const REF_APPLICATION_TYPES: TableDescriptor = TableDescriptor {
    slug: "application-types",
    table_name: "ref_application_types",
    display_name: "أنواع التطبيقات",
    description: "تصنيف التطبيقات (مخصص، جاهز، سحابي ...)",
    kind: TableKind::Reference,
    columns: BASIC_COLUMNS,
};

pub const REF_LIFECYCLE_STATUSES: TableDescriptor = TableDescriptor {
    slug: "lifecycle-statuses",
    table_name: "ref_lifecycle_statuses",
    display_name: "حالات دورة الحياة",
    description: "مراحل دورة حياة الأصول (مخطط، تشغيلي، متقاعد ...)",
    kind: TableKind::Reference,
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::integer("sort_order", "ترتيب العرض"),
    ],
};

pub const REF_CRITICALITY_LEVELS: TableDescriptor = TableDescriptor {
    slug: "criticality-levels",
    table_name: "ref_criticality_levels",
    display_name: "مستويات الأهمية",
    description: "درجة أهمية الأصل لاستمرارية الأعمال",
    kind: TableKind::Reference,
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::integer("level", "المستوى"),
    ],
};

pub const REF_HOSTING_TYPES: TableDescriptor = TableDescriptor {
    slug: "hosting-types",
    table_name: "ref_hosting_types",
    display_name: "أنواع الاستضافة",
    description: "مكان الاستضافة (محلي، سحابة حكومية، سحابة عامة ...)",
    kind: TableKind::Reference,
    columns: BASIC_COLUMNS,
};

pub const REF_DATA_CLASSIFICATIONS: TableDescriptor = TableDescriptor {
    slug: "data-classifications",
    table_name: "ref_data_classifications",
    display_name: "تصنيفات البيانات",
    description: "مستويات سرية البيانات ومدة الاحتفاظ بها",
    kind: TableKind::Reference,
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::integer("retention_years", "مدة الاحتفاظ (سنوات)"),
    ],
};

pub const REF_TECHNOLOGY_CATEGORIES: TableDescriptor = TableDescriptor {
    slug: "technology-categories",
    table_name: "ref_technology_categories",
    display_name: "فئات التقنية",
    description: "تصنيف الأصول التقنية (خوادم، شبكات، تخزين ...)",
    kind: TableKind::Reference,
    columns: BASIC_COLUMNS,
};

pub const REF_SECURITY_DEVICE_TYPES: TableDescriptor = TableDescriptor {
    slug: "security-device-types",
    table_name: "ref_security_device_types",
    display_name: "أنواع الأجهزة الأمنية",
    description: "جدران الحماية، أنظمة كشف التسلل، بوابات الويب ...",
    kind: TableKind::Reference,
    columns: BASIC_COLUMNS,
};

pub const REF_VENDORS: TableDescriptor = TableDescriptor {
    slug: "vendors",
    table_name: "ref_vendors",
    display_name: "الموردون",
    description: "الموردون والمصنعون للتطبيقات والأصول التقنية",
    kind: TableKind::Reference,
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("country", "الدولة"),
        ColumnDef::text("website", "الموقع الإلكتروني"),
    ],
};

pub const REF_LINK_PROTOCOLS: TableDescriptor = TableDescriptor {
    slug: "link-protocols",
    table_name: "ref_link_protocols",
    display_name: "بروتوكولات الربط",
    description: "بروتوكولات الروابط التقنية بين الأنظمة",
    kind: TableKind::Reference,
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::integer("default_port", "المنفذ الافتراضي"),
    ],
};

pub const REF_UX_CHANNELS: TableDescriptor = TableDescriptor {
    slug: "ux-channels",
    table_name: "ref_ux_channels",
    display_name: "قنوات تجربة المستخدم",
    description: "قنوات تقديم الخدمة (بوابة، تطبيق جوال، مركز اتصال ...)",
    kind: TableKind::Reference,
    columns: BASIC_COLUMNS,
};

/// All reference tables, in menu order.
pub const REFERENCE_TABLES: &[TableDescriptor] = &[
    REF_DEPARTMENTS,
    REF_BUSINESS_DOMAINS,
    REF_APPLICATION_TYPES,
    REF_LIFECYCLE_STATUSES,
    REF_CRITICALITY_LEVELS,
    REF_HOSTING_TYPES,
    REF_DATA_CLASSIFICATIONS,
    REF_TECHNOLOGY_CATEGORIES,
    REF_SECURITY_DEVICE_TYPES,
    REF_VENDORS,
    REF_LINK_PROTOCOLS,
    REF_UX_CHANNELS,
];

pub fn find_reference(slug: &str) -> Option<&'static TableDescriptor> {
    REFERENCE_TABLES.iter().find(|t| t.slug == slug)
}
