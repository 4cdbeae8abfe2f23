//! Static route table of the console, derived from the table registries.

use contracts::domain::layers::{entity_tables, Layer};
use contracts::shared::descriptor::TableDescriptor;
use contracts::shared::reference::REFERENCE_TABLES;
use once_cell::sync::Lazy;

pub const AUTH_PATH: &str = "/auth";
pub const HOME_PATH: &str = "/";
pub const REFERENCES_PATH: &str = "/admin/references";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Auth,
    Home,
    LayerIndex(Layer),
    EntityTable(&'static TableDescriptor),
    ReferenceIndex,
    ReferenceTable(&'static TableDescriptor),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: String,
    pub title: &'static str,
    pub kind: RouteKind,
    /// Reachable without a session.
    pub public: bool,
}

impl RouteEntry {
    fn private(path: String, title: &'static str, kind: RouteKind) -> Self {
        Self {
            path,
            title,
            kind,
            public: false,
        }
    }
}

static ROUTES: Lazy<Vec<RouteEntry>> = Lazy::new(build_routes);

fn build_routes() -> Vec<RouteEntry> {
    let mut routes = vec![
        RouteEntry {
            path: AUTH_PATH.to_string(),
            title: "تسجيل الدخول",
            kind: RouteKind::Auth,
            public: true,
        },
        RouteEntry::private(HOME_PATH.to_string(), "الرئيسية", RouteKind::Home),
    ];

    for layer in Layer::ALL {
        routes.push(RouteEntry::private(
            layer.route_path(),
            layer.label(),
            RouteKind::LayerIndex(layer),
        ));
        for table in entity_tables(layer) {
            routes.push(RouteEntry::private(
                table.route_path(),
                table.display_name,
                RouteKind::EntityTable(table),
            ));
        }
    }

    routes.push(RouteEntry::private(
        REFERENCES_PATH.to_string(),
        "الجداول المرجعية",
        RouteKind::ReferenceIndex,
    ));
    for table in REFERENCE_TABLES {
        routes.push(RouteEntry::private(
            table.route_path(),
            table.display_name,
            RouteKind::ReferenceTable(table),
        ));
    }
    routes
}

/// Every route, built once.
pub fn route_table() -> &'static [RouteEntry] {
    &ROUTES
}

/// Exact lookup; a trailing slash is ignored.
pub fn find_route(path: &str) -> Option<&'static RouteEntry> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { HOME_PATH } else { trimmed };
    route_table().iter().find(|r| r.path == normalized)
}

fn is_public(path: &str) -> bool {
    find_route(path).map(|r| r.public).unwrap_or(false)
}

/// Where to send the browser instead of `path`, if anywhere.
///
/// Without a session everything except public routes goes to `/auth`; with a
/// session `/auth` goes home.
pub fn redirect_for(path: &str, signed_in: bool) -> Option<&'static str> {
    match (signed_in, is_public(path)) {
        (false, false) => Some(AUTH_PATH),
        (true, true) => Some(HOME_PATH),
        _ => None,
    }
}
