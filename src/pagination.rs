use std::ops::Range;

// ---------------------------------------------------------------------------
// Rows-per-page choice
// ---------------------------------------------------------------------------

/// Page size offered by the table footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowsPerPage(usize);

impl RowsPerPage {
    pub const OPTIONS: [RowsPerPage; 3] = [RowsPerPage(10), RowsPerPage(20), RowsPerPage(50)];

    /// Accept only one of [`RowsPerPage::OPTIONS`].
    pub fn new(rows: usize) -> Option<Self> {
        Self::OPTIONS.into_iter().find(|o| o.0 == rows)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for RowsPerPage {
    fn default() -> Self {
        RowsPerPage(10)
    }
}

// ---------------------------------------------------------------------------
// Pager – current page over a filtered list
// ---------------------------------------------------------------------------

/// 1-based page cursor. The item count is passed in on every call because
/// the filtered list changes underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current_page: usize,
    rows_per_page: RowsPerPage,
}

impl Default for Pager {
    fn default() -> Self {
        Pager::new(RowsPerPage::default())
    }
}

impl Pager {
    pub fn new(rows_per_page: RowsPerPage) -> Self {
        Pager {
            current_page: 1,
            rows_per_page,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> RowsPerPage {
        self.rows_per_page
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Change the page size; always returns to page 1.
    pub fn set_rows_per_page(&mut self, rows: RowsPerPage) {
        self.rows_per_page = rows;
        self.reset();
    }

    /// `ceil(total / rows_per_page)`; zero for an empty list.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page.get())
    }

    /// Index range of the current page within a list of `total` items.
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let rows = self.rows_per_page.get();
        let start = ((self.current_page - 1) * rows).min(total);
        let end = (start + rows).min(total);
        start..end
    }

    /// The current page of `items`.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.page_range(items.len())]
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    /// False on the last page, and always false when there are no pages.
    pub fn can_next(&self, total: usize) -> bool {
        self.current_page < self.total_pages(total)
    }

    pub fn prev(&mut self) {
        if self.can_prev() {
            self.current_page -= 1;
        }
    }

    pub fn next(&mut self, total: usize) {
        if self.can_next(total) {
            self.current_page += 1;
        }
    }

    /// `(first, last, total)` for a "Showing X to Y of Z" label, 1-based and
    /// inclusive. `first` is 0 when the current page is empty.
    pub fn showing(&self, total: usize) -> (usize, usize, usize) {
        let range = self.page_range(total);
        if range.is_empty() {
            (0, 0, total)
        } else {
            (range.start + 1, range.end, total)
        }
    }
}
