//! List endpoints and their fixed field projections.
//!
//! Adding an endpoint means naming its path, the query it takes, the wire
//! item it returns and how that item flattens into a [`Record`].

use serde::de::DeserializeOwned;

use super::wire::{ContentItem, LinkItem, NamedItem, PillarItem, TagItem};
use crate::models::{
    ContentRecord, EditionQuery, EditionRecord, ItemLink, Params, PillarRecord, Record,
    SearchQuery, SectionQuery, SectionRecord, TagQuery, TagRecord,
};

pub(crate) trait Endpoint {
    /// Path below the base URL
    const PATH: &'static str;

    type Query;
    type Item: DeserializeOwned;
    type Record: Record;

    /// Query parameters, without the credential
    fn params(query: &Self::Query) -> Params;

    fn project(item: Self::Item) -> Self::Record;
}

/// Content search: title, section, date, type
pub(crate) struct Search;

impl Endpoint for Search {
    const PATH: &'static str = "search";
    type Query = SearchQuery;
    type Item = ContentItem;
    type Record = ContentRecord;

    fn params(query: &SearchQuery) -> Params {
        query.params()
    }

    fn project(item: ContentItem) -> ContentRecord {
        content_record(item)
    }
}

/// Content search including the pillar of each item
pub(crate) struct PillarSearch;

impl Endpoint for PillarSearch {
    const PATH: &'static str = "search";
    type Query = SearchQuery;
    type Item = PillarItem;
    type Record = PillarRecord;

    fn params(query: &SearchQuery) -> Params {
        query.params()
    }

    fn project(item: PillarItem) -> PillarRecord {
        PillarRecord {
            title: item.web_title,
            section: item.section_name,
            date: item.web_publication_date,
            kind: item.kind,
            pillar: item.pillar_name,
        }
    }
}

/// Content search keeping only title and API URL
pub(crate) struct LinkSearch;

impl Endpoint for LinkSearch {
    const PATH: &'static str = "search";
    type Query = SearchQuery;
    type Item = LinkItem;
    type Record = ItemLink;

    fn params(query: &SearchQuery) -> Params {
        query.params()
    }

    fn project(item: LinkItem) -> ItemLink {
        ItemLink {
            title: item.web_title,
            api_url: item.api_url,
        }
    }
}

pub(crate) struct Tags;

impl Endpoint for Tags {
    const PATH: &'static str = "tags";
    type Query = TagQuery;
    type Item = TagItem;
    type Record = TagRecord;

    fn params(query: &TagQuery) -> Params {
        query.params()
    }

    fn project(item: TagItem) -> TagRecord {
        TagRecord {
            tag: item.web_title,
            kind: item.kind,
        }
    }
}

pub(crate) struct Sections;

impl Endpoint for Sections {
    const PATH: &'static str = "sections";
    type Query = SectionQuery;
    type Item = NamedItem;
    type Record = SectionRecord;

    fn params(query: &SectionQuery) -> Params {
        query.params()
    }

    fn project(item: NamedItem) -> SectionRecord {
        SectionRecord {
            section: item.web_title,
        }
    }
}

pub(crate) struct Editions;

impl Endpoint for Editions {
    const PATH: &'static str = "editions";
    type Query = EditionQuery;
    type Item = NamedItem;
    type Record = EditionRecord;

    fn params(query: &EditionQuery) -> Params {
        query.params()
    }

    fn project(item: NamedItem) -> EditionRecord {
        EditionRecord {
            edition: item.web_title,
        }
    }
}

pub(crate) fn content_record(item: ContentItem) -> ContentRecord {
    ContentRecord {
        title: item.web_title,
        section: item.section_name,
        date: item.web_publication_date,
        kind: item.kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_projection() {
        let item: ContentItem = serde_json::from_str(
            r#"{"id": "film/2022/dec/15/x", "webTitle": "T", "sectionName": "Film",
                "webPublicationDate": "2022-12-15T06:00:14Z", "type": "article",
                "pillarName": "Arts"}"#,
        )
        .unwrap();
        let record = Search::project(item);
        assert_eq!(record.title, "T");
        assert_eq!(record.kind, "article");
    }

    #[test]
    fn test_paths() {
        assert_eq!(Search::PATH, "search");
        assert_eq!(PillarSearch::PATH, "search");
        assert_eq!(Tags::PATH, "tags");
        assert_eq!(Sections::PATH, "sections");
        assert_eq!(Editions::PATH, "editions");
    }
}
