mod index;
mod page;

pub use index::ReferenceIndexPage;
pub use page::ReferenceTablePage;
