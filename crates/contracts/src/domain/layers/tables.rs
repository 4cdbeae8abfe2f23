use super::Layer;
use crate::shared::descriptor::{ColumnDef, TableDescriptor, TableKind, CODE, DESCRIPTION, NAME};

const OWNER_DEPARTMENT: ColumnDef = ColumnDef::text("owner_department", "الإدارة المالكة");
const STATUS_CODE: ColumnDef = ColumnDef::text("status_code", "حالة دورة الحياة");
const CRITICALITY_CODE: ColumnDef = ColumnDef::text("criticality_code", "مستوى الأهمية");
const VENDOR_CODE: ColumnDef = ColumnDef::text("vendor_code", "المورد");
const APPLICATION_CODE: ColumnDef = ColumnDef::text("application_code", "التطبيق");
const HOSTING_TYPE: ColumnDef = ColumnDef::text("hosting_type", "نوع الاستضافة");
const LOCATION: ColumnDef = ColumnDef::text("location", "الموقع");

// ---------------------------------------------------------------------------
// Business
// ---------------------------------------------------------------------------

pub const BUSINESS_SERVICES: TableDescriptor = TableDescriptor {
    slug: "services",
    table_name: "business_services",
    display_name: "خدمات الأعمال",
    description: "الخدمات التي تقدمها الجهة للمستفيدين",
    kind: TableKind::Entity(Layer::Business),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        OWNER_DEPARTMENT,
        ColumnDef::text("domain_code", "مجال الأعمال"),
        CRITICALITY_CODE,
        STATUS_CODE,
    ],
};

pub const BUSINESS_CAPABILITIES: TableDescriptor = TableDescriptor {
    slug: "capabilities",
    table_name: "business_capabilities",
    display_name: "قدرات الأعمال",
    description: "خريطة القدرات المؤسسية",
    kind: TableKind::Entity(Layer::Business),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("parent_code", "القدرة الأم"),
        ColumnDef::integer("level", "المستوى"),
    ],
};

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

pub const APPLICATIONS: TableDescriptor = TableDescriptor {
    slug: "applications",
    table_name: "applications",
    display_name: "التطبيقات",
    description: "الأنظمة والتطبيقات المستخدمة في الجهة",
    kind: TableKind::Entity(Layer::Applications),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("application_type", "نوع التطبيق"),
        VENDOR_CODE,
        OWNER_DEPARTMENT,
        HOSTING_TYPE,
        STATUS_CODE,
        CRITICALITY_CODE,
    ],
};

pub const APPLICATION_COMPONENTS: TableDescriptor = TableDescriptor {
    slug: "components",
    table_name: "application_components",
    display_name: "مكونات التطبيقات",
    description: "الوحدات والمكونات الداخلية للتطبيقات",
    kind: TableKind::Entity(Layer::Applications),
    columns: &[CODE, NAME, DESCRIPTION, APPLICATION_CODE],
};

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

pub const DATABASES: TableDescriptor = TableDescriptor {
    slug: "databases",
    table_name: "databases",
    display_name: "قواعد البيانات",
    description: "قواعد البيانات ومحركاتها",
    kind: TableKind::Entity(Layer::Data),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("engine", "المحرك"),
        ColumnDef::text("version", "الإصدار"),
        HOSTING_TYPE,
        APPLICATION_CODE,
    ],
};

pub const DATA_ENTITIES: TableDescriptor = TableDescriptor {
    slug: "entities",
    table_name: "data_entities",
    display_name: "كيانات البيانات",
    description: "الكيانات المنطقية للبيانات وتصنيفها",
    kind: TableKind::Entity(Layer::Data),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("database_code", "قاعدة البيانات"),
        ColumnDef::text("classification_code", "التصنيف"),
        OWNER_DEPARTMENT,
    ],
};

// ---------------------------------------------------------------------------
// Technology
// ---------------------------------------------------------------------------

pub const TECHNOLOGY_ASSETS: TableDescriptor = TableDescriptor {
    slug: "assets",
    table_name: "technology_assets",
    display_name: "الأصول التقنية",
    description: "الخوادم والأجهزة الشبكية ووحدات التخزين",
    kind: TableKind::Entity(Layer::Technology),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("category_code", "الفئة"),
        VENDOR_CODE,
        ColumnDef::text("version", "الإصدار"),
        LOCATION,
        STATUS_CODE,
    ],
};

pub const TECHNICAL_LINKS: TableDescriptor = TableDescriptor {
    slug: "links",
    table_name: "technical_links",
    display_name: "الروابط التقنية",
    description: "التكاملات والروابط بين الأنظمة",
    kind: TableKind::Entity(Layer::Technology),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("source_code", "النظام المصدر"),
        ColumnDef::text("target_code", "النظام الهدف"),
        ColumnDef::text("protocol_code", "البروتوكول"),
        ColumnDef::integer("port", "المنفذ"),
    ],
};

// ---------------------------------------------------------------------------
// Security
// ---------------------------------------------------------------------------

pub const SECURITY_DEVICES: TableDescriptor = TableDescriptor {
    slug: "devices",
    table_name: "security_devices",
    display_name: "الأجهزة الأمنية",
    description: "أجهزة الحماية والمراقبة الأمنية",
    kind: TableKind::Entity(Layer::Security),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("device_type", "نوع الجهاز"),
        VENDOR_CODE,
        ColumnDef::text("ip_address", "عنوان IP"),
        LOCATION,
        STATUS_CODE,
    ],
};

pub const SECURITY_POLICIES: TableDescriptor = TableDescriptor {
    slug: "policies",
    table_name: "security_policies",
    display_name: "السياسات الأمنية",
    description: "سياسات وضوابط أمن المعلومات",
    kind: TableKind::Entity(Layer::Security),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("classification_code", "التصنيف"),
        ColumnDef::text("review_date", "تاريخ المراجعة"),
    ],
};

// ---------------------------------------------------------------------------
// UX
// ---------------------------------------------------------------------------

pub const UX_ARTIFACTS: TableDescriptor = TableDescriptor {
    slug: "artifacts",
    table_name: "ux_artifacts",
    display_name: "عناصر تجربة المستخدم",
    description: "الشاشات والنماذج والواجهات المقدمة للمستخدم",
    kind: TableKind::Entity(Layer::Ux),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("channel_code", "القناة"),
        APPLICATION_CODE,
        ColumnDef::text("url", "الرابط"),
    ],
};

pub const USER_JOURNEYS: TableDescriptor = TableDescriptor {
    slug: "journeys",
    table_name: "user_journeys",
    display_name: "رحلات المستخدم",
    description: "رحلات المستفيد عبر الخدمات والقنوات",
    kind: TableKind::Entity(Layer::Ux),
    columns: &[
        CODE,
        NAME,
        DESCRIPTION,
        ColumnDef::text("service_code", "الخدمة"),
        ColumnDef::text("channel_code", "القناة"),
    ],
};

/// All entity tables, grouped by layer; the first table of each layer is its
/// primary table on the home dashboard.
pub const ENTITY_TABLES: &[TableDescriptor] = &[
    BUSINESS_SERVICES,
    BUSINESS_CAPABILITIES,
    APPLICATIONS,
    APPLICATION_COMPONENTS,
    DATABASES,
    DATA_ENTITIES,
    TECHNOLOGY_ASSETS,
    TECHNICAL_LINKS,
    SECURITY_DEVICES,
    SECURITY_POLICIES,
    UX_ARTIFACTS,
    USER_JOURNEYS,
];

pub fn entity_tables(layer: Layer) -> impl Iterator<Item = &'static TableDescriptor> {
    ENTITY_TABLES
        .iter()
        .filter(move |t| t.kind == TableKind::Entity(layer))
}

pub fn find_entity(layer: Layer, slug: &str) -> Option<&'static TableDescriptor> {
    entity_tables(layer).find(|t| t.slug == slug)
}
