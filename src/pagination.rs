//! Page-number buttons for a paged list view.

/// Number of page buttons shown at once once there are more pages than fit.
pub const WINDOW: usize = 4;

/// Buttons for `current_page` (1-based) out of `total_pages`.
///
/// `None` marks an ellipsis. Up to [`WINDOW`] pages every page is shown;
/// otherwise a window of [`WINDOW`] pages is placed around the current one and
/// an ellipsis stands in for each hidden side.
pub fn page_buttons(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }
    if total_pages <= WINDOW {
        return (1..=total_pages).map(Some).collect();
    }

    let current_page = current_page.clamp(1, total_pages);
    let first = if current_page <= 2 {
        1
    } else if current_page >= total_pages - 1 {
        total_pages - WINDOW + 1
    } else {
        current_page - 1
    };
    let last = first + WINDOW - 1;

    let mut pages = Vec::with_capacity(WINDOW + 2);
    if first != 1 {
        pages.push(None);
    }
    pages.extend((first..=last).map(Some));
    if last != total_pages {
        pages.push(None);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(list: &[usize]) -> Vec<Option<usize>> {
        list.iter().copied().map(Some).collect()
    }

    #[test]
    fn few_pages_are_all_shown() {
        assert_eq!(page_buttons(1, 1), pages(&[1]));
        assert_eq!(page_buttons(4, 3), pages(&[1, 2, 3, 4]));
        assert!(page_buttons(0, 1).is_empty());
    }

    #[test]
    fn window_starts_at_first_page_near_the_start() {
        assert_eq!(page_buttons(10, 1), vec![Some(1), Some(2), Some(3), Some(4), None]);
        assert_eq!(page_buttons(10, 2), vec![Some(1), Some(2), Some(3), Some(4), None]);
    }

    #[test]
    fn window_ends_at_last_page_near_the_end() {
        assert_eq!(page_buttons(10, 9), vec![None, Some(7), Some(8), Some(9), Some(10)]);
        assert_eq!(page_buttons(10, 10), vec![None, Some(7), Some(8), Some(9), Some(10)]);
    }

    #[test]
    fn window_follows_current_page_in_the_middle() {
        assert_eq!(
            page_buttons(10, 5),
            vec![None, Some(4), Some(5), Some(6), Some(7), None]
        );
        assert_eq!(page_buttons(10, 3), vec![None, Some(2), Some(3), Some(4), Some(5), None]);
        assert_eq!(page_buttons(5, 3), vec![None, Some(2), Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn out_of_range_current_page_is_clamped() {
        assert_eq!(page_buttons(6, 0), vec![Some(1), Some(2), Some(3), Some(4), None]);
        assert_eq!(page_buttons(6, 40), vec![None, Some(3), Some(4), Some(5), Some(6)]);
    }
}
