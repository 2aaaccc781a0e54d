//! Fixed-size pages over an ordered listing.

/// Number of items on one page.
pub const PAGE_SIZE: usize = 10;

/// Returns the slice of `items` shown on the 1-based `page`.
///
/// Pages past the end of `items` are empty. Page numbers below 1 are treated as page 1.
pub fn paginate<T>(page: i64, items: &[T]) -> &[T] {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let start = (page - 1).saturating_mul(PAGE_SIZE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}
