/// Launch list view state
// The visible page is never stored; `visible_page` recomputes it on every
// read, in filter → sort → paginate order.
use crate::domain::{Launch, LaunchSummary};
use crate::utils::contains_ignore_case;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriteria {
    #[default]
    Asc,
    Desc,
}

impl SortCriteria {
    pub fn reversed(self) -> Self {
        match self {
            SortCriteria::Asc => SortCriteria::Desc,
            SortCriteria::Desc => SortCriteria::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterSuccess {
    #[default]
    All,
    Successful,
    Failed,
}

impl FilterSuccess {
    /// `Failed` takes every launch that is not an explicit success
    pub fn matches(self, launch: &Launch) -> bool {
        match self {
            FilterSuccess::All => true,
            FilterSuccess::Successful => launch.success.is_success(),
            FilterSuccess::Failed => !launch.success.is_success(),
        }
    }
}

/// Fetch status of the launch collection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

/// The refinements applied to the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    pub search_term: String,
    pub sort_criteria: SortCriteria,
    pub filter_success: FilterSuccess,
    pub page: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort_criteria: SortCriteria::Asc,
            filter_success: FilterSuccess::All,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListViewState {
    pub launches: Vec<Launch>,
    pub query: ListQuery,
    pub status: LoadStatus,
}

/// One page of the refined collection
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a> {
    pub items: Vec<&'a Launch>,
    pub total_filtered: usize,
    pub total_pages: usize,
}

/// Filter, stable-sort by date, then cut out the requested page.
pub fn visible_page<'a>(launches: &'a [Launch], query: &ListQuery) -> PageSlice<'a> {
    let mut filtered: Vec<&Launch> = launches
        .iter()
        .filter(|launch| contains_ignore_case(&launch.name, &query.search_term))
        .filter(|launch| query.filter_success.matches(launch))
        .collect();

    // sort_by is stable: equal dates keep their received order in both directions
    match query.sort_criteria {
        SortCriteria::Asc => filtered.sort_by(|a, b| a.date_utc.cmp(&b.date_utc)),
        SortCriteria::Desc => filtered.sort_by(|a, b| b.date_utc.cmp(&a.date_utc)),
    }

    let total_filtered = filtered.len();
    let start = query.page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE);
    let items = filtered.into_iter().skip(start).take(PAGE_SIZE).collect();

    PageSlice {
        items,
        total_filtered,
        total_pages: total_filtered.div_ceil(PAGE_SIZE),
    }
}

/// Partial update of the view state; absent fields stay untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListViewUpdate {
    pub search_term: Option<String>,
    pub sort_criteria: Option<SortCriteria>,
    pub filter_success: Option<FilterSuccess>,
    pub page: Option<usize>,
}

/// Projection handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListView {
    pub items: Vec<LaunchSummary>,
    #[serde(flatten)]
    pub query: ListQuery,
    pub page_size: usize,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub total_launches: usize,
    pub status: LoadStatus,
}

/// Shared list view state
#[derive(Default)]
pub struct ListStore {
    state: RwLock<ListViewState>,
}

impl ListStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write<R>(&self, f: impl FnOnce(&mut ListViewState) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn read<R>(&self, f: impl FnOnce(&ListViewState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        let term = term.into();
        self.write(|state| {
            state.query.search_term = term;
            state.query.page = 1;
        });
    }

    pub fn set_sort_criteria(&self, criteria: SortCriteria) {
        self.write(|state| {
            state.query.sort_criteria = criteria;
            state.query.page = 1;
        });
    }

    pub fn set_filter_success(&self, filter: FilterSuccess) {
        self.write(|state| {
            state.query.filter_success = filter;
            state.query.page = 1;
        });
    }

    /// Pages are 1-based; zero is clamped to the first page
    pub fn set_page(&self, page: usize) {
        self.write(|state| state.query.page = page.max(1));
    }

    /// Replace the base collection; the current page is kept
    pub fn set_launches(&self, launches: Vec<Launch>) {
        debug!("List store received {} launches", launches.len());
        self.write(|state| {
            state.launches = launches;
            state.status = LoadStatus::Success;
        });
    }

    pub fn mark_loading(&self) {
        self.write(|state| state.status = LoadStatus::Loading);
    }

    pub fn mark_failed(&self, message: impl Into<String>) {
        let message = message.into();
        self.write(|state| state.status = LoadStatus::Error(message));
    }

    /// Back to `Idle` when a load was dropped before it settled
    pub fn abandon_loading(&self) {
        self.write(|state| {
            if state.status == LoadStatus::Loading {
                debug!("List load abandoned");
                state.status = LoadStatus::Idle;
            }
        });
    }

    pub fn clear_filters(&self) {
        self.write(|state| state.query = ListQuery::default());
    }

    /// Setter semantics per field; an explicit page wins over the resets
    pub fn apply(&self, update: ListViewUpdate) {
        if let Some(term) = update.search_term {
            self.set_search_term(term);
        }
        if let Some(criteria) = update.sort_criteria {
            self.set_sort_criteria(criteria);
        }
        if let Some(filter) = update.filter_success {
            self.set_filter_success(filter);
        }
        if let Some(page) = update.page {
            self.set_page(page);
        }
    }

    pub fn query(&self) -> ListQuery {
        self.read(|state| state.query.clone())
    }

    pub fn status(&self) -> LoadStatus {
        self.read(|state| state.status.clone())
    }

    /// Launches currently visible
    pub fn visible_page(&self) -> Vec<Launch> {
        self.read(|state| {
            visible_page(&state.launches, &state.query)
                .items
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn view(&self) -> ListView {
        self.read(|state| {
            let page = visible_page(&state.launches, &state.query);
            ListView {
                items: page.items.into_iter().map(LaunchSummary::from).collect(),
                query: state.query.clone(),
                page_size: PAGE_SIZE,
                total_filtered: page.total_filtered,
                total_pages: page.total_pages,
                total_launches: state.launches.len(),
                status: state.status.clone(),
            }
        })
    }
}
