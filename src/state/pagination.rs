// Client-side pagination state
//
// Page numbers are grouped into fixed windows of ten; the pagination bar
// renders one window at a time with jump arrows at the edges. The server
// only ever reports row totals (or page counts), so the page count here is
// always derived from the most recent fetch.
//
// Invariants kept by every mutation:
//   - current_page >= 1, even with zero pages
//   - page_group is the window containing current_page
//   - current_page <= total_pages whenever total_pages > 0

/// Pages shown per pagination window
pub const GROUP_SIZE: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    total_pages: u32,
    page_group: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            page_group: 0,
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page_group(&self) -> u32 {
        self.page_group
    }

    /// First page number of the current window
    pub fn group_start(&self) -> u32 {
        self.page_group * GROUP_SIZE + 1
    }

    /// Last page number of the current window, capped by the page count
    pub fn group_end(&self) -> u32 {
        (self.group_start() + GROUP_SIZE - 1).min(self.total_pages)
    }

    /// Page numbers the bar shows. Empty while there are no pages, since
    /// group_end is then below group_start.
    pub fn window(&self) -> std::ops::RangeInclusive<u32> {
        self.group_start()..=self.group_end()
    }

    /// The bar is only worth drawing with at least two pages
    pub fn needs_bar(&self) -> bool {
        self.total_pages > 1
    }

    /// Derive the page count from a fetched row total. If the count shrank
    /// below the current page, the current page and its window move back to
    /// the last page that still exists.
    pub fn set_total_pages_from(&mut self, total: u64, page_size: u32) {
        let size = page_size.max(1) as u64;
        self.total_pages = total.div_ceil(size).min(u32::MAX as u64) as u32;

        if self.total_pages == 0 {
            self.current_page = 1;
            self.page_group = 0;
        } else if self.current_page > self.total_pages {
            self.current_page = self.total_pages;
            self.page_group = (self.current_page - 1) / GROUP_SIZE;
        }
    }

    /// Jump to a page. Out-of-range targets are rejected, never clamped;
    /// returns whether the move happened.
    pub fn set_current_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.current_page = page;
        self.page_group = (page - 1) / GROUP_SIZE;
        true
    }

    pub fn has_prev_group(&self) -> bool {
        self.page_group > 0
    }

    pub fn has_next_group(&self) -> bool {
        self.total_pages > 0 && self.group_end() < self.total_pages
    }

    /// Advance to the next window, landing on its first page. Blocked once
    /// the window already reaches the last page.
    pub fn next_group(&mut self) -> bool {
        if !self.has_next_group() {
            return false;
        }
        self.page_group += 1;
        self.current_page = self.group_start();
        true
    }

    /// Step back one window, landing on its first page
    pub fn prev_group(&mut self) -> bool {
        if !self.has_prev_group() {
            return false;
        }
        self.page_group -= 1;
        self.current_page = self.group_start();
        true
    }

    /// Back to page one, keeping the page count until the next fetch lands
    pub fn reset_to_first_page(&mut self) {
        self.current_page = 1;
        self.page_group = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_pages(total_pages: u32) -> Pagination {
        let mut p = Pagination::new();
        // total rows that produce exactly `total_pages` at size 1
        p.set_total_pages_from(total_pages as u64, 1);
        p
    }

    #[test]
    fn test_page_count_is_ceiling_division() {
        let mut p = Pagination::new();
        p.set_total_pages_from(0, 8);
        assert_eq!(p.total_pages(), 0);
        p.set_total_pages_from(1, 8);
        assert_eq!(p.total_pages(), 1);
        p.set_total_pages_from(8, 8);
        assert_eq!(p.total_pages(), 1);
        p.set_total_pages_from(9, 8);
        assert_eq!(p.total_pages(), 2);
        p.set_total_pages_from(57, 8);
        assert_eq!(p.total_pages(), 8);
    }

    #[test]
    fn test_two_rows_make_one_page_and_no_bar() {
        let mut p = Pagination::new();
        p.set_total_pages_from(2, 8);
        assert_eq!(p.total_pages(), 1);
        assert!(!p.needs_bar());
        assert_eq!(p.window().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_window_is_empty_with_no_pages() {
        let p = Pagination::new();
        assert_eq!(p.window().count(), 0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_window_spans_ten_pages() {
        let mut p = with_pages(23);
        assert_eq!(p.window().collect::<Vec<_>>(), (1..=10).collect::<Vec<_>>());

        assert!(p.next_group());
        assert_eq!(
            p.window().collect::<Vec<_>>(),
            (11..=20).collect::<Vec<_>>()
        );

        assert!(p.next_group());
        assert_eq!(
            p.window().collect::<Vec<_>>(),
            (21..=23).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_out_of_range_pages_are_rejected_not_clamped() {
        let mut p = with_pages(5);
        assert!(!p.set_current_page(0));
        assert!(!p.set_current_page(6));
        assert_eq!(p.current_page(), 1);

        assert!(p.set_current_page(5));
        assert_eq!(p.current_page(), 5);
    }

    #[test]
    fn test_moving_inside_window_keeps_group() {
        let mut p = with_pages(23);
        assert!(p.next_group());
        assert_eq!(p.page_group(), 1);

        assert!(p.set_current_page(17));
        assert_eq!(p.page_group(), 1);
    }

    #[test]
    fn test_jump_across_windows_realigns_group() {
        let mut p = with_pages(23);
        assert!(p.set_current_page(21));
        assert_eq!(p.page_group(), 2);
        assert!(p.set_current_page(3));
        assert_eq!(p.page_group(), 0);
    }

    #[test]
    fn test_next_group_blocked_when_window_reaches_last_page() {
        let mut p = with_pages(10);
        assert!(!p.next_group());

        let mut p = with_pages(23);
        assert!(p.next_group());
        assert!(p.next_group());
        assert!(!p.next_group());
        assert_eq!(p.current_page(), 21);
    }

    #[test]
    fn test_prev_group_blocked_at_first_window() {
        let mut p = with_pages(23);
        assert!(!p.prev_group());

        assert!(p.next_group());
        assert!(p.prev_group());
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.page_group(), 0);
    }

    #[test]
    fn test_group_jumps_land_on_window_start() {
        let mut p = with_pages(40);
        assert!(p.set_current_page(7));
        assert!(p.next_group());
        assert_eq!(p.current_page(), 11);
        assert!(p.next_group());
        assert_eq!(p.current_page(), 21);
        assert!(p.prev_group());
        assert_eq!(p.current_page(), 11);
    }

    #[test]
    fn test_shrinking_total_realigns_current_page() {
        let mut p = with_pages(23);
        assert!(p.set_current_page(15));

        // next fetch reports far fewer rows
        p.set_total_pages_from(7, 1);
        assert_eq!(p.total_pages(), 7);
        assert_eq!(p.current_page(), 7);
        assert_eq!(p.page_group(), 0);
        assert_eq!(p.window().collect::<Vec<_>>(), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_shrink_to_zero_resets_to_page_one() {
        let mut p = with_pages(23);
        assert!(p.set_current_page(15));
        p.set_total_pages_from(0, 8);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.page_group(), 0);
        assert_eq!(p.window().count(), 0);
    }

    #[test]
    fn test_reset_keeps_total_until_next_fetch() {
        let mut p = with_pages(23);
        assert!(p.set_current_page(15));
        p.reset_to_first_page();
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.page_group(), 0);
        assert_eq!(p.total_pages(), 23);
    }
}
