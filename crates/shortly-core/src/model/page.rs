use serde::Serialize;

/// One page of a server-paginated collection.
///
/// Items keep the server's order. `total_pages` and `current_page` are at
/// least 1, even for an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
}

/// `ceil(total_items / page_size)`, never less than 1.
pub fn expected_total_pages(total_items: u64, page_size: u32) -> u32 {
    let pages = total_items.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}
