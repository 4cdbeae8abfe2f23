mod entity_page;
mod index;

pub use entity_page::EntityTablePage;
pub use index::LayerIndexPage;
