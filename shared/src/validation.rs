use std::ops::Range;

pub const STRIPS_PER_PAGE: usize = 10;
pub const MIN_PAGE: usize = 1;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Page {page} is out of range (1-{num_pages})")]
    PageOutOfRange { page: usize, num_pages: usize },
    #[error("Page size must be at least 1")]
    ZeroPageSize,
}

pub fn num_pages(total: usize, per_page: usize) -> Result<usize, ValidationError> {
    if per_page == 0 { return Err(ValidationError::ZeroPageSize); }
    Ok(total.div_ceil(per_page))
}

pub fn validate_page(page: usize, num_pages: usize) -> Result<(), ValidationError> {
    if page < MIN_PAGE || page > num_pages {
        return Err(ValidationError::PageOutOfRange { page, num_pages });
    }
    Ok(())
}

/// Index range of `page` (1-based) within `total` items, clamped to `total`.
pub fn page_range(page: usize, per_page: usize, total: usize) -> Result<Range<usize>, ValidationError> {
    let pages = num_pages(total, per_page)?;
    validate_page(page, pages)?;

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);
    Ok(start..end)
}
