use tracing::debug;

use crate::models::Page;

/// A validated, 1-indexed page request.
///
/// Construction clamps both values to at least 1, so bad client input never
/// yields an inverted or negative slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        if page < 1 || limit < 1 {
            debug!(page, limit, "clamping pagination parameters");
        }
        PageRequest {
            page: clamp_positive(page),
            limit: clamp_positive(limit),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Inclusive start index: `(page - 1) * limit`.
    pub fn start(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Exclusive end index: `page * limit`.
    pub fn end(&self) -> usize {
        self.page.saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::new(
            crate::config::DEFAULT_PAGE,
            crate::config::DEFAULT_PAGE_LIMIT,
        )
    }
}

fn clamp_positive(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}

/// Slice `[start, end)` out of an ordered collection.
pub fn paginate<T: Clone>(items: &[T], req: PageRequest) -> Page<T> {
    let total = items.len();
    let start = req.start().min(total);
    let end = req.end().min(total);

    Page {
        items: items[start..end].to_vec(),
        has_more: req.end() < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTS: [&str; 4] = ["P1", "P2", "P3", "P4"];

    #[test]
    fn first_page_larger_than_collection() {
        let page = paginate(&POSTS, PageRequest::new(1, 10));
        assert_eq!(page.items, POSTS.to_vec());
        assert!(!page.has_more);
    }

    #[test]
    fn second_page_of_two() {
        let page = paginate(&POSTS, PageRequest::new(2, 2));
        assert_eq!(page.items, vec!["P3", "P4"]);
        assert!(!page.has_more);

        let page = paginate(&POSTS, PageRequest::new(1, 3));
        assert_eq!(page.items, vec!["P1", "P2", "P3"]);
        assert!(page.has_more);
    }

    #[test]
    fn invalid_input_behaves_as_one() {
        assert_eq!(
            paginate(&POSTS, PageRequest::new(0, -3)),
            paginate(&POSTS, PageRequest::new(1, 1))
        );
        let page = paginate(&POSTS, PageRequest::new(-7, 2));
        assert_eq!(page.items, vec!["P1", "P2"]);
        assert!(page.has_more);
    }

    #[test]
    fn past_the_end_is_empty() {
        let page = paginate(&POSTS, PageRequest::new(5, 2));
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let page = paginate(&POSTS, PageRequest::new(i64::MAX, i64::MAX));
        assert!(page.items.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn page_size_never_exceeds_limit() {
        for page in 1..6 {
            for limit in 1..6 {
                let req = PageRequest::new(page, limit);
                let result = paginate(&POSTS, req);
                assert!(result.items.len() <= req.limit());
                assert_eq!(result.has_more, req.end() < POSTS.len());
            }
        }
    }
}
