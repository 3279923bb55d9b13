use serde::Serialize;

/// Page buttons to render plus the previous/next control flags.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<usize>,
    pub show_previous: bool,
    pub show_next: bool,
}

/// Computes the run of page buttons for a listing.
///
/// The window starts at the current page and shifts back to
/// `total_page - show_item` once the remaining pages no longer exceed the
/// window width, so near the end the current page may sit just past the
/// window. A start shifted to zero or below is clamped to page 1 and the
/// window then covers the first `min(show_item, total_page)` pages.
pub fn page_window(
    page_number: usize,
    total_item: usize,
    par_page: usize,
    show_item: usize,
) -> PageWindow {
    let par_page = par_page.max(1);
    let show_item = show_item.max(1);
    let page_number = page_number.max(1);

    let total_page = total_item.div_ceil(par_page);
    if total_page == 0 {
        return PageWindow::default();
    }

    let mut start_page = page_number as i64;
    if total_page as i64 - page_number as i64 <= show_item as i64 {
        start_page = total_page as i64 - show_item as i64;
    }

    let (start_page, end_page) = if start_page < 1 {
        (1, show_item.min(total_page) + 1)
    } else {
        let start_page = start_page as usize;
        (start_page, start_page + show_item)
    };

    PageWindow {
        pages: (start_page..end_page).collect(),
        show_previous: page_number > 1,
        show_next: page_number < total_page,
    }
}

/// Pagination state of one listing view.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageState {
    pub page_number: usize,
    pub par_page: usize,
    pub total_item: usize,
    pub show_item: usize,
}

impl PageState {
    pub fn new(par_page: usize, show_item: usize) -> Self {
        Self {
            page_number: 1,
            par_page: par_page.max(1),
            total_item: 0,
            show_item: show_item.max(1),
        }
    }

    pub fn total_page(&self) -> usize {
        self.total_item.div_ceil(self.par_page.max(1))
    }

    /// Callers render no pagination at all when everything fits on one page.
    pub fn needs_pagination(&self) -> bool {
        self.total_item > self.par_page
    }

    /// Replaces the total and re-clamps the current page into
    /// `[1, total_page]`. Returns `true` when the page number moved.
    pub fn set_total_item(&mut self, total_item: usize) -> bool {
        self.total_item = total_item;
        self.clamp_page()
    }

    pub fn clamp_page(&mut self) -> bool {
        let clamped = self.page_number.clamp(1, self.total_page().max(1));
        let moved = clamped != self.page_number;
        self.page_number = clamped;
        moved
    }

    pub fn window(&self) -> PageWindow {
        page_window(
            self.page_number,
            self.total_item,
            self.par_page,
            self.show_item,
        )
    }
}

/// Page of items with the button window ready for templates.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<usize>,
    pub page: usize,
    pub total_item: usize,
    pub show_previous: bool,
    pub show_next: bool,
    pub show_pagination: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, state: &PageState) -> Self {
        let PageWindow {
            pages,
            show_previous,
            show_next,
        } = state.window();

        Self {
            items,
            pages,
            page: state.page_number.max(1),
            total_item: state.total_item,
            show_previous,
            show_next,
            show_pagination: state.needs_pagination(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_ten() {
        let window = page_window(1, 50, 5, 3);
        assert_eq!(window.pages, vec![1, 2, 3]);
        assert!(window.show_next);
        assert!(!window.show_previous);
    }

    #[test]
    fn last_page_shifts_window_back() {
        let window = page_window(10, 50, 5, 3);
        assert_eq!(window.pages, vec![7, 8, 9]);
        assert!(!window.show_next);
        assert!(window.show_previous);
    }

    #[test]
    fn empty_listing_has_no_buttons() {
        let window = page_window(1, 0, 5, 3);
        assert!(window.pages.is_empty());
        assert!(!window.show_previous);
        assert!(!window.show_next);
    }

    #[test]
    fn middle_page_starts_at_current_page() {
        assert_eq!(page_window(3, 50, 5, 3).pages, vec![3, 4, 5]);
        // 10 - 7 = 3 remaining pages, so the window shifts back.
        assert_eq!(page_window(7, 50, 5, 3).pages, vec![7, 8, 9]);
        assert_eq!(page_window(8, 50, 5, 3).pages, vec![7, 8, 9]);
    }

    #[test]
    fn short_listing_is_clamped_to_first_page() {
        assert_eq!(page_window(1, 15, 5, 3).pages, vec![1, 2, 3]);
        assert_eq!(page_window(2, 10, 5, 3).pages, vec![1, 2]);
        assert_eq!(page_window(1, 5, 5, 3).pages, vec![1]);
    }

    #[test]
    fn window_stays_within_bounds() {
        for par_page in 1..=6 {
            for show_item in 1..=6 {
                for total_item in 0..=60usize {
                    let total_page = total_item.div_ceil(par_page);
                    for page_number in 1..=total_page.max(1) {
                        let window = page_window(page_number, total_item, par_page, show_item);
                        let context = format!(
                            "page={page_number} total={total_item} par={par_page} show={show_item}"
                        );

                        assert_eq!(window.pages.len(), show_item.min(total_page), "{context}");
                        if let (Some(first), Some(last)) =
                            (window.pages.first(), window.pages.last())
                        {
                            assert!(*first >= 1, "{context}");
                            assert!(*last <= total_page, "{context}");
                        }
                        assert!(
                            window.pages.windows(2).all(|pair| pair[1] == pair[0] + 1),
                            "{context}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn page_state_reclamps_when_total_shrinks() {
        let mut state = PageState::new(5, 3);
        state.page_number = 9;

        assert!(state.set_total_item(12));
        assert_eq!(state.page_number, 3);

        assert!(state.set_total_item(0));
        assert_eq!(state.page_number, 1);
        assert!(!state.set_total_item(0));
    }

    #[test]
    fn pagination_is_suppressed_for_single_page() {
        let mut state = PageState::new(5, 3);
        state.set_total_item(5);
        assert!(!state.needs_pagination());
        state.set_total_item(6);
        assert!(state.needs_pagination());
    }

    #[test]
    fn paginated_carries_window() {
        let mut state = PageState::new(5, 3);
        state.set_total_item(50);
        state.page_number = 10;

        let page = Paginated::new(vec!["a", "b"], &state);
        assert_eq!(page.pages, vec![7, 8, 9]);
        assert_eq!(page.page, 10);
        assert!(page.show_previous);
        assert!(!page.show_next);
        assert!(page.show_pagination);
    }
}
