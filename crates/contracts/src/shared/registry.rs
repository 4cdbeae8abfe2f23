//! Lookup over every table the console and the store know about.
//!
//! The backend uses this as its whitelist: a table or column not present here
//! is never addressable over the table API.

use super::descriptor::{LayerDescriptor, TableDescriptor};
use super::reference::REFERENCE_TABLES;
use crate::domain::layers::{entity_tables, Layer, ENTITY_TABLES};

pub fn all_tables() -> impl Iterator<Item = &'static TableDescriptor> {
    REFERENCE_TABLES.iter().chain(ENTITY_TABLES.iter())
}

pub fn find_table(table_name: &str) -> Option<&'static TableDescriptor> {
    all_tables().find(|t| t.table_name == table_name)
}

/// One card per layer. `table` is the layer's primary entity table; the home
/// dashboard counts the whole layer through [`dashboard_sources`].
pub fn dashboard_layers() -> Vec<LayerDescriptor> {
    Layer::ALL
        .into_iter()
        .filter_map(|layer| {
            entity_tables(layer).next().map(|t| LayerDescriptor {
                key: layer.slug(),
                label: layer.label(),
                color: layer.color(),
                table: t.table_name,
            })
        })
        .collect()
}

/// Every entity table, keyed by its layer's slug so counts add up per layer.
pub fn dashboard_sources() -> Vec<LayerDescriptor> {
    Layer::ALL
        .into_iter()
        .flat_map(|layer| {
            entity_tables(layer).map(move |t| LayerDescriptor {
                key: layer.slug(),
                label: layer.label(),
                color: layer.color(),
                table: t.table_name,
            })
        })
        .collect()
}

/// One card per entity table of `layer`.
pub fn layer_descriptors(layer: Layer) -> Vec<LayerDescriptor> {
    entity_tables(layer)
        .map(|t| LayerDescriptor {
            key: t.slug,
            label: t.display_name,
            color: layer.color(),
            table: t.table_name,
        })
        .collect()
}

/// One card per reference table.
pub fn reference_descriptors() -> Vec<LayerDescriptor> {
    REFERENCE_TABLES
        .iter()
        .map(|t| LayerDescriptor {
            key: t.slug,
            label: t.display_name,
            color: "#64748b",
            table: t.table_name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::descriptor::{KEY_COLUMN, NAME_COLUMN};
    use crate::shared::reference::find_reference;
    use std::collections::HashSet;

    #[test]
    fn every_table_starts_with_code_and_name() {
        for table in all_tables() {
            let names: Vec<_> = table.column_names().collect();
            assert_eq!(names[0], KEY_COLUMN, "{}", table.table_name);
            assert_eq!(names[1], NAME_COLUMN, "{}", table.table_name);
        }
    }

    #[test]
    fn table_names_are_unique_and_columns_are_unique_per_table() {
        let mut seen = HashSet::new();
        for table in all_tables() {
            assert!(seen.insert(table.table_name), "duplicate {}", table.table_name);
            let cols: HashSet<_> = table.column_names().collect();
            assert_eq!(cols.len(), table.columns.len(), "{}", table.table_name);
        }
    }

    #[test]
    fn identifiers_are_plain_snake_case() {
        let ok = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        };
        for table in all_tables() {
            assert!(ok(table.table_name), "{}", table.table_name);
            for col in table.column_names() {
                assert!(ok(col), "{}.{}", table.table_name, col);
            }
        }
    }

    #[test]
    fn departments_table_matches_expected_shape() {
        let t = find_reference("departments").unwrap();
        assert_eq!(t.table_name, "ref_departments");
        let cols: Vec<_> = t.column_names().collect();
        assert_eq!(cols, ["code", "name", "description", "parent_code"]);
        assert_eq!(find_table("ref_departments"), Some(t));
    }

    #[test]
    fn every_layer_has_tables_and_a_dashboard_card() {
        let cards = dashboard_layers();
        assert_eq!(cards.len(), Layer::ALL.len());
        for layer in Layer::ALL {
            assert!(!layer_descriptors(layer).is_empty(), "{:?}", layer);
            assert_eq!(Layer::from_slug(layer.slug()), Some(layer));
        }
    }

    #[test]
    fn dashboard_sources_cover_every_entity_table_once() {
        let sources = dashboard_sources();
        assert_eq!(sources.len(), ENTITY_TABLES.len());
        let tables: HashSet<_> = sources.iter().map(|d| d.table).collect();
        assert_eq!(tables.len(), ENTITY_TABLES.len());

        let card_keys: HashSet<_> = dashboard_layers().iter().map(|d| d.key).collect();
        for source in &sources {
            assert!(card_keys.contains(source.key), "{}", source.table);
            let table = find_table(source.table).unwrap();
            assert_eq!(table.layer().map(|l| l.slug()), Some(source.key));
        }
    }

    #[test]
    fn routes_are_derived_from_kind() {
        let t = find_table("ref_departments").unwrap();
        assert_eq!(t.route_path(), "/admin/references/departments");
        let t = find_table("security_devices").unwrap();
        assert_eq!(t.route_path(), "/architecture/security/devices");
    }
}
