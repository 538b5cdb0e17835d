use domain::DomainError;

pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated, 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Result<Self, DomainError> {
        if page < 1 {
            return Err(DomainError::ValidationError(
                "Page must be >= 1".to_string(),
            ));
        }

        if page_size < 1 || page_size > MAX_PAGE_SIZE {
            return Err(DomainError::ValidationError(format!(
                "Page size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// Number of pages needed to show `total_items`; an empty collection has no pages
pub fn total_pages(total_items: i64, page_size: u32) -> i64 {
    if total_items <= 0 || page_size == 0 {
        return 0;
    }

    let page_size = page_size as i64;
    (total_items + page_size - 1) / page_size
}

/// Row offset of the first item on a 1-based page
pub fn page_offset(page: u32, page_size: u32) -> i64 {
    (page.max(1) as i64 - 1) * page_size as i64
}
