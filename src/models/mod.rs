//! Core data models: queries, flattened records and result tables.

mod query;
mod record;
mod table;

pub use query::{
    EditionQuery, OrderBy, Params, SearchQuery, SectionQuery, TagQuery, DEFAULT_LANG,
    DEFAULT_PAGES, DEFAULT_PAGE_SIZE,
};
pub use record::{
    ContentRecord, EditionRecord, ItemLink, PillarRecord, Record, SectionRecord, TagRecord,
};
pub use table::{PageInfo, ResultTable};
