use serde::Deserialize;

use crate::config::QUESTIONS_PER_PAGE;

/// `?page=N`, 1-indexed, defaulting to the first page.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct PageRequest {
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: first_page() }
    }
}

impl PageRequest {
    pub fn new(page: u32) -> Self {
        Self { page }
    }

    /// Rows per page; page 0 addresses nothing.
    pub fn limit(&self) -> i64 {
        if self.page == 0 {
            0
        } else {
            i64::from(QUESTIONS_PER_PAGE)
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(QUESTIONS_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_first_page() {
        let req: PageRequest = serde_json::from_str("{}").expect("empty query");
        assert_eq!(req, PageRequest::default());
        assert_eq!(req.offset(), 0);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn offsets_advance_by_page_size() {
        assert_eq!(PageRequest::new(2).offset(), 10);
        assert_eq!(PageRequest::new(5).offset(), 40);
        assert_eq!(PageRequest::new(u32::MAX).offset(), i64::from(u32::MAX - 1) * 10);
    }

    #[test]
    fn page_zero_is_empty() {
        let req = PageRequest::new(0);
        assert_eq!(req.limit(), 0);
        assert_eq!(req.offset(), 0);
    }
}
