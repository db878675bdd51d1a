// Canonical page shape for list endpoints
//
// The backend answers list requests in two different envelopes depending on
// the controller:
//
//   {"list": [...], "total": 57}            restaurants, reservations, ...
//   {"content": [...], "totalPages": 8}     membership (Spring Data style)
//
// Both are normalized into `Page<T>` here so nothing downstream ever
// branches on response shape.

use serde::Deserialize;

/// One page of rows plus the total row count across all pages
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

/// Wire envelopes for paged responses
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawPage<T> {
    /// `{list, total}` with an exact row count
    Counted { list: Vec<T>, total: u64 },

    /// `{content, totalPages}` which only reports the page count. A row
    /// total is synthesized as `totalPages * page_size`; under ceiling
    /// division that recomputes to the same number of pages.
    Paged {
        content: Vec<T>,
        #[serde(rename = "totalPages")]
        total_pages: u64,
    },
}

impl<T> RawPage<T> {
    /// Normalize to the canonical shape. `page_size` is the size this
    /// request asked for and is only used for the synthesized total.
    pub(crate) fn normalize(self, page_size: u32) -> Page<T> {
        match self {
            RawPage::Counted { list, total } => Page { items: list, total },
            RawPage::Paged {
                content,
                total_pages,
            } => Page {
                items: content,
                total: total_pages * page_size as u64,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::pagination::Pagination;

    fn decode(json: &str) -> RawPage<u32> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_counted_envelope() {
        let page = decode(r#"{"list": [1, 2, 3], "total": 57}"#).normalize(8);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, 57);
    }

    #[test]
    fn test_paged_envelope_synthesizes_total() {
        let page = decode(r#"{"content": [9], "totalPages": 8}"#).normalize(8);
        assert_eq!(page.items, vec![9]);
        assert_eq!(page.total, 64);
    }

    #[test]
    fn test_both_envelopes_yield_same_page_count() {
        // 57 rows at size 8 is 8 pages; the paged envelope reports 8 directly
        let counted = decode(r#"{"list": [], "total": 57}"#).normalize(8);
        let paged = decode(r#"{"content": [], "totalPages": 8}"#).normalize(8);

        let mut a = Pagination::new();
        a.set_total_pages_from(counted.total, 8);
        let mut b = Pagination::new();
        b.set_total_pages_from(paged.total, 8);
        assert_eq!(a.total_pages(), b.total_pages());
        assert_eq!(a.total_pages(), 8);
    }

    #[test]
    fn test_empty_counted() {
        let page = decode(r#"{"list": [], "total": 0}"#).normalize(8);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
    }
}
