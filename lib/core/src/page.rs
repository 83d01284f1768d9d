use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a listing
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number as requested
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice `items` into 1-based pages.
///
/// Pages past the end, and page 0, come back empty rather than failing.
/// A `per_page` of 0 is treated as [`DEFAULT_PAGE_SIZE`].
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = if per_page == 0 { DEFAULT_PAGE_SIZE } else { per_page };
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let slice: &[T] = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(per_page).min(total_items);
            let end = start.saturating_add(per_page).min(total_items);
            &items[start..end]
        }
        None => &[],
    };

    Page {
        items: slice.to_vec(),
        page,
        per_page,
        total_items,
        total_pages,
    }
}
