use serde::Serialize;

/// Number of rows shown per list page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 7;

/// Number of numbered page buttons shown at once.
pub const VISIBLE_PAGE_WINDOW: usize = 5;

/// Number of pages needed to show `total_count` items.
pub fn total_pages(total_count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_count.div_ceil(per_page)
}

/// Clamps a requested page into `1..=max(total_pages, 1)`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Zero-based offset of the first item on `page`.
pub fn page_offset(page: usize, per_page: usize) -> usize {
    page.max(1).saturating_sub(1) * per_page
}

/// Numbered pages shown around `current_page`.
///
/// The window is centred on the current page where possible and slides
/// against either end so it always holds `min(visible, total_pages)` pages.
pub fn page_window(current_page: usize, total_pages: usize, visible: usize) -> Vec<usize> {
    if total_pages == 0 || visible == 0 {
        return vec![];
    }

    let mut start = current_page
        .saturating_sub(visible / 2)
        .clamp(1, total_pages);
    let end = total_pages.min(start + visible - 1);
    if end + 1 - start < visible {
        start = (end + 1).saturating_sub(visible).max(1);
    }

    (start..=end).collect()
}

/// Enabled/disabled state of the pager controls.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageControls {
    pub first_disabled: bool,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub last_disabled: bool,
    /// Numbered buttons are disabled while a fetch is outstanding.
    pub pages_disabled: bool,
}

impl PageControls {
    pub fn new(current_page: usize, total_pages: usize, loading: bool) -> Self {
        let last = total_pages.max(1);
        let at_start = current_page <= 1;
        let at_end = current_page >= last;
        Self {
            first_disabled: at_start || loading,
            prev_disabled: at_start || loading,
            next_disabled: at_end || loading,
            last_disabled: at_end || loading,
            pages_disabled: loading,
        }
    }
}

#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<usize>,
    pub page: usize,
    pub total_pages: usize,
    pub controls: PageControls,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize, loading: bool) -> Self {
        let current_page = clamp_page(current_page, total_pages);

        let pages = page_window(current_page, total_pages, VISIBLE_PAGE_WINDOW);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            controls: PageControls::new(current_page, total_pages, loading),
        }
    }
}
