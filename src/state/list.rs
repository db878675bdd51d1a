// Shared state for one paginated list screen
//
// Every fetch a screen issues is stamped with a sequence number from a
// per-screen counter. Responses come back over a channel in whatever order
// the network produces; only the outcome matching the latest stamp is
// applied, so a slow page 2 can never overwrite an already-displayed
// page 3. The counter survives row clears, which keeps stamps from
// abandoned visits unambiguously stale.

use super::pagination::Pagination;
use crate::api::Page;

#[derive(Debug)]
pub struct ListScreen<T> {
    pub rows: Vec<T>,
    pub pagination: Pagination,
    /// Highlighted row index
    pub cursor: usize,
    /// A fetch for the latest stamp is in flight
    pub loading: bool,
    last_seq: u64,
}

impl<T> Default for ListScreen<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListScreen<T> {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            pagination: Pagination::new(),
            cursor: 0,
            loading: false,
            last_seq: 0,
        }
    }

    /// Stamp a new fetch. Returns the sequence number to attach to the
    /// command; any outcome carrying an older stamp is now stale.
    pub fn begin_fetch(&mut self) -> u64 {
        self.last_seq += 1;
        self.loading = true;
        self.last_seq
    }

    /// Whether an outcome stamp matches the most recent fetch
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.last_seq
    }

    /// Apply a fetched page. Stale stamps are discarded and leave every
    /// field untouched, including the loading flag.
    pub fn apply_page(&mut self, seq: u64, page: Page<T>, page_size: u32) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.rows = page.items;
        self.pagination.set_total_pages_from(page.total, page_size);
        self.loading = false;
        self.clamp_cursor();
        true
    }

    /// A failed fetch for the current stamp stops the loading indicator but
    /// keeps whatever rows were already on screen
    pub fn apply_failure(&mut self, seq: u64) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.loading = false;
        true
    }

    /// Drop the rows without touching the sequence counter
    pub fn clear_rows(&mut self) {
        self.rows.clear();
        self.pagination = Pagination::new();
        self.cursor = 0;
        self.loading = false;
    }

    pub fn selected(&self) -> Option<&T> {
        self.rows.get(self.cursor)
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    /// Remove one row in place, e.g. after the server confirmed a delete
    pub fn remove_row(&mut self, index: usize) -> Option<T> {
        if index >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(index);
        self.clamp_cursor();
        Some(removed)
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.rows.len() {
            self.cursor = self.rows.len().saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: Vec<u32>, total: u64) -> Page<u32> {
        Page { items, total }
    }

    #[test]
    fn test_begin_fetch_stamps_and_sets_loading() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        assert!(!screen.loading);
        let seq = screen.begin_fetch();
        assert_eq!(seq, 1);
        assert!(screen.loading);
        assert_eq!(screen.begin_fetch(), 2);
    }

    #[test]
    fn test_stale_page_is_discarded() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        let first = screen.begin_fetch();
        let second = screen.begin_fetch();

        // newest answer lands first
        assert!(screen.apply_page(second, page(vec![30, 31], 20), 8));
        assert_eq!(screen.rows, vec![30, 31]);
        assert!(!screen.loading);

        // the slow older answer must change nothing
        assert!(!screen.apply_page(first, page(vec![20, 21], 20), 8));
        assert_eq!(screen.rows, vec![30, 31]);
    }

    #[test]
    fn test_failed_fetch_keeps_rows() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        let seq = screen.begin_fetch();
        assert!(screen.apply_page(seq, page(vec![1, 2, 3], 3), 8));

        let seq = screen.begin_fetch();
        assert!(screen.loading);
        assert!(screen.apply_failure(seq));
        assert!(!screen.loading);
        assert_eq!(screen.rows, vec![1, 2, 3]);
    }

    #[test]
    fn test_stale_failure_does_not_stop_loading() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        let old = screen.begin_fetch();
        let _newer = screen.begin_fetch();
        assert!(!screen.apply_failure(old));
        assert!(screen.loading);
    }

    #[test]
    fn test_apply_page_clamps_cursor() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        let seq = screen.begin_fetch();
        assert!(screen.apply_page(seq, page(vec![1, 2, 3, 4, 5], 5), 8));
        screen.cursor = 4;

        let seq = screen.begin_fetch();
        assert!(screen.apply_page(seq, page(vec![1, 2], 2), 8));
        assert_eq!(screen.cursor, 1);
    }

    #[test]
    fn test_remove_row_returns_the_exact_row() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        let seq = screen.begin_fetch();
        assert!(screen.apply_page(seq, page(vec![10, 11, 12], 3), 8));

        assert_eq!(screen.remove_row(1), Some(11));
        assert_eq!(screen.rows, vec![10, 12]);
        assert_eq!(screen.remove_row(9), None);
    }

    #[test]
    fn test_remove_last_row_pulls_cursor_back() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        let seq = screen.begin_fetch();
        assert!(screen.apply_page(seq, page(vec![10, 11], 2), 8));
        screen.cursor = 1;

        assert_eq!(screen.remove_row(1), Some(11));
        assert_eq!(screen.cursor, 0);
        assert_eq!(screen.selected(), Some(&10));
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        screen.cursor_up();
        screen.cursor_down();
        assert_eq!(screen.cursor, 0);
        assert!(screen.selected().is_none());

        let seq = screen.begin_fetch();
        assert!(screen.apply_page(seq, page(vec![1, 2], 2), 8));
        screen.cursor_down();
        screen.cursor_down();
        assert_eq!(screen.cursor, 1);
    }

    #[test]
    fn test_clear_rows_keeps_counter_monotonic() {
        let mut screen: ListScreen<u32> = ListScreen::new();
        let before = screen.begin_fetch();
        screen.clear_rows();
        let after = screen.begin_fetch();
        assert!(after > before);
        assert!(!screen.is_current(before));
    }
}
