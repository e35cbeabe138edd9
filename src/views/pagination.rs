//! Pagination control

/// One numbered page button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    /// Zero-based page index
    pub index: u32,
    /// One-based label shown to the user
    pub label: String,
    pub current: bool,
}

/// Buttons for a zero-based `page` out of `total_pages`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// Target of "previous"; absent on the first page
    pub previous: Option<u32>,
    pub pages: Vec<PageButton>,
    /// Target of "next"; absent on the last page
    pub next: Option<u32>,
}

impl Pagination {
    pub fn new(page: u32, total_pages: u32) -> Self {
        let pages = (0..total_pages)
            .map(|index| PageButton {
                index,
                label: (index + 1).to_string(),
                current: index == page,
            })
            .collect();

        Self {
            previous: page.checked_sub(1),
            pages,
            next: (page + 1 < total_pages).then_some(page + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_has_no_previous() {
        let p = Pagination::new(0, 3);
        assert_eq!(p.previous, None);
        assert_eq!(p.next, Some(1));
        let labels: Vec<_> = p.pages.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
        assert!(p.pages[0].current);
    }

    #[test]
    fn test_last_page_has_no_next() {
        let p = Pagination::new(2, 3);
        assert_eq!(p.previous, Some(1));
        assert_eq!(p.next, None);
        assert!(p.pages[2].current);
    }

    #[test]
    fn test_button_count_matches_total_pages() {
        for total in 1..12 {
            for page in 0..total {
                let p = Pagination::new(page, total);
                assert_eq!(p.pages.len() as u32, total);
                assert_eq!(p.previous.is_none(), page == 0);
                assert_eq!(p.next.is_none(), page == total - 1);
                assert_eq!(p.pages.iter().filter(|b| b.current).count(), 1);
            }
        }
    }

    #[test]
    fn test_single_page() {
        let p = Pagination::new(0, 1);
        assert_eq!(p.previous, None);
        assert_eq!(p.next, None);
        assert_eq!(p.pages.len(), 1);
    }
}
