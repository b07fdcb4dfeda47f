//! Client-side driver for a paged, sorted and searchable list view.
//!
//! [`PagedListController`] owns the view state and is mutated synchronously by
//! user actions and fetch completions. Actions that need new data return a
//! [`FetchRequest`]; the caller runs it with [`dispatch`] and feeds the
//! resulting [`Completion`] back through [`PagedListController::complete`].
//! Issuing a request cancels the previous one, so at most one fetch is ever in
//! flight and a superseded response can never overwrite newer state.

use crate::pagination::page_buttons;
use crate::paging::{PagingSpec, Sort};

pub mod cancel;
pub mod fetch;
pub mod sort;

pub use cancel::{CancelToken, RequestId};
pub use fetch::{
    Completion, FetchError, FetchRequest, HttpPageFetcher, PageFetcher, dispatch,
};
pub use sort::SortState;

/// Page sizes offered to the user unless configured otherwise.
pub const DEFAULT_PAGE_SIZES: [usize; 3] = [10, 20, 50];

/// Lifecycle of the displayed data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing requested yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The items are the result of the latest applied fetch.
    Settled,
    /// The latest fetch failed; the list is shown empty.
    Error,
}

/// Initial settings of a [`PagedListController`].
#[derive(Clone, Debug)]
pub struct ListOptions {
    /// Initial page size; `None` starts in show-all mode.
    pub page_size: Option<usize>,
    /// Order shown before the user picks a column.
    pub default_sort: Option<Sort>,
    /// Fields searched by the search box.
    pub search_fields: Vec<String>,
    pub page_sizes: Vec<usize>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZES[0]),
            default_sort: None,
            search_fields: Vec::new(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
        }
    }
}

#[derive(Debug)]
struct InFlight {
    id: RequestId,
    cancel: CancelToken,
}

/// State of one list view between mount and unmount.
#[derive(Debug)]
pub struct PagedListController<T> {
    page_size: Option<usize>,
    page_index: usize,
    search_text: String,
    search_fields: Vec<String>,
    default_sort: Option<Sort>,
    sort: SortState,
    page_sizes: Vec<usize>,

    phase: Phase,
    items: Vec<T>,
    total_count: usize,
    total_pages: usize,

    next_id: RequestId,
    in_flight: Option<InFlight>,
}

impl<T> PagedListController<T> {
    pub fn new(options: ListOptions) -> Self {
        Self {
            page_size: options.page_size.filter(|size| *size > 0),
            page_index: 0,
            search_text: String::new(),
            search_fields: options.search_fields,
            default_sort: options.default_sort,
            sort: SortState::Default,
            page_sizes: options.page_sizes,
            phase: Phase::Idle,
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            next_id: RequestId::first(),
            in_flight: None,
        }
    }

    /// Issues the initial fetch.
    pub fn mount(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Column header click; see [`SortState::toggle`].
    pub fn toggle_sort(&mut self, field: &str) -> Option<FetchRequest> {
        if self.sort.toggle(field, self.default_sort.as_ref()) {
            Some(self.issue())
        } else {
            None
        }
    }

    /// Moves to the zero-based `page_index`. Ignored when unpaged, when already
    /// on that page, or when the page is past the last known page.
    pub fn set_page(&mut self, page_index: usize) -> Option<FetchRequest> {
        self.page_size?;
        if page_index == self.page_index {
            return None;
        }
        if self.phase == Phase::Settled && page_index >= self.total_pages {
            return None;
        }
        self.page_index = page_index;
        Some(self.issue())
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        self.set_page(self.page_index + 1)
    }

    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        let previous = self.page_index.checked_sub(1)?;
        self.set_page(previous)
    }

    /// Changes the page size and returns to the first page. `None` (or 0)
    /// shows every row.
    pub fn set_page_size(&mut self, page_size: Option<usize>) -> Option<FetchRequest> {
        let page_size = page_size.filter(|size| *size > 0);
        if page_size == self.page_size && self.page_index == 0 {
            return None;
        }
        self.page_size = page_size;
        self.page_index = 0;
        Some(self.issue())
    }

    pub fn show_all(&mut self) -> Option<FetchRequest> {
        self.set_page_size(None)
    }

    /// Replaces the search text and returns to the first page. The in-flight
    /// fetch is aborted before the new one is issued.
    pub fn set_search_text(&mut self, text: &str) -> Option<FetchRequest> {
        if text == self.search_text {
            return None;
        }
        self.search_text = text.to_string();
        self.page_index = 0;
        Some(self.issue())
    }

    /// Fetches the current page again.
    pub fn refresh(&mut self) -> FetchRequest {
        self.issue()
    }

    /// Applies a finished fetch. Returns `false` when the completion was
    /// superseded or cancelled and therefore discarded.
    pub fn complete(&mut self, completion: Completion<T>) -> bool {
        let current = self.in_flight.as_ref().map(|in_flight| in_flight.id);
        if current != Some(completion.id) {
            log::debug!("Discarding stale fetch {}", completion.id);
            return false;
        }

        match completion.outcome {
            Ok(page) => {
                self.items = page.result_list;
                self.total_count = page.total_count;
                self.total_pages = page.total_pages;
                self.phase = Phase::Settled;
            }
            Err(FetchError::Cancelled) => {
                log::debug!("Fetch {} was cancelled", completion.id);
                return false;
            }
            Err(err) => {
                log::warn!("Fetch {} failed: {err}", completion.id);
                self.items.clear();
                self.total_count = 0;
                self.total_pages = 0;
                self.phase = Phase::Error;
            }
        }
        self.in_flight = None;
        true
    }

    /// Cancels the in-flight fetch. No further completion will be applied.
    pub fn unmount(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            log::debug!("Cancelling fetch {} on unmount", in_flight.id);
            in_flight.cancel.cancel();
        }
        if self.phase == Phase::Loading {
            self.phase = Phase::Idle;
        }
    }

    /// The paging request the current state corresponds to.
    pub fn paging_spec(&self) -> PagingSpec {
        let search_text = Some(self.search_text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        PagingSpec {
            page_size: self.page_size,
            page_index: self.page_size.map(|_| self.page_index),
            sorts: self
                .sort
                .effective(self.default_sort.as_ref())
                .into_iter()
                .collect(),
            search_fields: if search_text.is_some() {
                self.search_fields.clone()
            } else {
                Vec::new()
            },
            search_text,
        }
    }

    fn issue(&mut self) -> FetchRequest {
        if let Some(previous) = self.in_flight.take() {
            log::debug!("Cancelling superseded fetch {}", previous.id);
            previous.cancel.cancel();
        }

        let id = self.next_id;
        self.next_id = id.next();
        let cancel = CancelToken::new();
        self.in_flight = Some(InFlight {
            id,
            cancel: cancel.clone(),
        });
        self.phase = Phase::Loading;

        FetchRequest {
            id,
            spec: self.paging_spec(),
            cancel,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Sort currently shown, whether implicit or chosen by the user.
    pub fn current_sort(&self) -> Option<Sort> {
        self.sort.effective(self.default_sort.as_ref())
    }

    /// 1-based page-number buttons; `None` is an ellipsis.
    pub fn page_buttons(&self) -> Vec<Option<usize>> {
        if self.page_size.is_none() {
            return Vec::new();
        }
        page_buttons(self.total_pages, self.page_index + 1)
    }

    /// Hidden filler rows that keep the table height stable.
    pub fn placeholder_rows(&self) -> usize {
        let Some(page_size) = self.page_size else {
            return 0;
        };
        match self.phase {
            Phase::Loading => page_size.saturating_sub(self.items.len()),
            Phase::Settled if self.total_pages > 1 => page_size.saturating_sub(self.items.len()),
            _ => 0,
        }
    }

    /// Rows the view renders: the items followed by the placeholders.
    pub fn display_count(&self) -> usize {
        self.items.len() + self.placeholder_rows()
    }

    /// Page sizes worth offering for the current total; `None` is "show all".
    ///
    /// Sizes below the total are kept along with the first size that fits the
    /// whole result. When no size fits, "show all" is appended.
    pub fn page_size_options(&self) -> Vec<Option<usize>> {
        if self.total_count == 0 {
            return self.page_sizes.iter().copied().map(Some).collect();
        }

        let mut options = Vec::with_capacity(self.page_sizes.len() + 1);
        let mut fits = false;
        for &size in &self.page_sizes {
            if size < self.total_count {
                options.push(Some(size));
            } else {
                options.push(Some(size));
                fits = true;
                break;
            }
        }
        if !fits {
            options.push(None);
        }
        options
    }
}

impl<T> Drop for PagedListController<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}
