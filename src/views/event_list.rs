//! Filtered, paginated event list

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::{
    error::AppResult,
    models::{EventPage, EventSummary, FilterRequest},
    services::EventsApi,
};

use super::pagination::Pagination;

/// Anchor at the top of the list, scrolled to on page changes
pub const EVENTS_ANCHOR: &str = "events-top";

/// Shown for every failed query, whatever the cause
pub const FETCH_EVENTS_FAILED: &str =
    "Error fetching events. If the problem persists, please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded {
        events: Vec<EventSummary>,
        total_pages: u32,
    },
    Error(String),
}

/// Request to scroll the viewport to an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTo(pub &'static str);

/// One query invocation. Only the most recently issued ticket may update
/// the view; completions for older tickets are dropped.
#[derive(Debug, Clone)]
pub struct QueryTicket {
    seq: u64,
    pub filter: FilterRequest,
    pub page: u32,
}

pub struct EventListView {
    api: Arc<dyn EventsApi>,
    filter: FilterRequest,
    page: u32,
    filter_active: bool,
    total_pages: u32,
    state: ListState,
    latest: u64,
}

impl EventListView {
    pub fn new(api: Arc<dyn EventsApi>) -> Self {
        Self::with_initial_filter(api, None)
    }

    /// A filter handed over by navigation is layered over the cleared
    /// filter and counts as an active filter.
    pub fn with_initial_filter(api: Arc<dyn EventsApi>, initial: Option<FilterRequest>) -> Self {
        let filter_active = initial.is_some();
        let filter = match initial {
            Some(initial) => {
                let defaults = FilterRequest::default();
                FilterRequest {
                    name: initial.name.or(defaults.name),
                    date: initial.date.or(defaults.date),
                    category_name: initial.category_name,
                }
            }
            None => FilterRequest::default(),
        };

        Self {
            api,
            filter,
            page: 0,
            filter_active,
            total_pages: 0,
            state: ListState::Idle,
            latest: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn filter(&self) -> &FilterRequest {
        &self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_filter_active(&self) -> bool {
        self.filter_active
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading)
    }

    pub fn events(&self) -> &[EventSummary] {
        match &self.state {
            ListState::Loaded { events, .. } => events,
            _ => &[],
        }
    }

    /// Page control, shown only when there is more than one page
    pub fn pagination(&self) -> Option<Pagination> {
        match self.state {
            ListState::Loaded { total_pages, .. } if total_pages > 1 => {
                Some(Pagination::new(self.page, total_pages))
            }
            _ => None,
        }
    }

    /// Enter `Loading` and issue a ticket for the current filter and page
    pub fn begin_query(&mut self) -> QueryTicket {
        self.latest += 1;
        self.state = ListState::Loading;
        QueryTicket {
            seq: self.latest,
            filter: self.filter.clone(),
            page: self.page,
        }
    }

    /// Apply a query result. Returns false if the ticket was superseded.
    /// A page past the reported end is pulled back to the last page.
    pub fn complete(&mut self, ticket: QueryTicket, result: AppResult<EventPage>) -> bool {
        if ticket.seq != self.latest {
            debug!(seq = ticket.seq, latest = self.latest, "Discarding stale events response");
            return false;
        }

        self.state = match result {
            Ok(EventPage {
                events,
                total_pages,
            }) => {
                self.total_pages = total_pages;
                if total_pages > 0 && self.page >= total_pages {
                    warn!(page = self.page, total_pages, "Page past the end, moving to last page");
                    self.page = total_pages - 1;
                }
                ListState::Loaded {
                    events,
                    total_pages,
                }
            }
            Err(e) => {
                error!(page = ticket.page, error = %e, "Failed to load events");
                ListState::Error(FETCH_EVENTS_FAILED.to_string())
            }
        };
        true
    }

    /// Query the current filter and page, again if the page had to be
    /// pulled back into range
    pub async fn refresh(&mut self) {
        let api = Arc::clone(&self.api);
        loop {
            let ticket = self.begin_query();
            let requested = ticket.page;
            let result = api.fetch_filtered(&ticket.filter, ticket.page).await;
            if !self.complete(ticket, result) || self.page == requested {
                break;
            }
        }
    }

    pub async fn mount(&mut self) {
        self.refresh().await;
    }

    /// Replace the filter and re-query from the first page
    pub async fn apply_filter(&mut self, filter: FilterRequest) {
        self.filter = filter;
        self.filter_active = true;
        self.page = 0;
        self.refresh().await;
    }

    /// Back to the cleared filter, first page
    pub async fn clear_filter(&mut self) {
        self.filter = FilterRequest::default();
        self.filter_active = false;
        self.page = 0;
        self.refresh().await;
    }

    /// Move to another zero-based page. Pages outside the last known range
    /// and the current page are ignored.
    pub async fn change_page(&mut self, page: u32) -> Option<ScrollTo> {
        if page == self.page {
            return None;
        }
        if page >= self.total_pages {
            warn!(page, total_pages = self.total_pages, "Ignoring out-of-range page");
            return None;
        }

        self.page = page;
        self.refresh().await;
        Some(ScrollTo(EVENTS_ANCHOR))
    }

    /// Open a zero-based page directly, without a scroll request. Fails with
    /// the known page count when the page does not exist.
    pub async fn open_page(&mut self, page: u32) -> Result<(), u32> {
        if page == self.page && page < self.total_pages.max(1) {
            return Ok(());
        }
        match self.change_page(page).await {
            Some(_) => Ok(()),
            None => Err(self.total_pages),
        }
    }
}
