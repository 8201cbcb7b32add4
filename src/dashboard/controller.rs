use std::sync::Arc;

use super::notice::{
    Notice, NoticeReceiver, NoticeSender, PLAYER_CREATED, PLAYER_DELETED, PLAYER_UPDATED,
};
use super::results::{LoadState, RequestTicket, ResultStream};
use crate::external::players::{CsvUploadReport, FetchResult, PlayerApi};
use crate::filters::{FilterCriteria, FilterEdit, FilterInputError, FilterStateManager};
use crate::models::{Player, SortBy, SortDirection, UpdatePlayer};
use crate::pagination::PageResult;

/// Connects filter state to the player service.
///
/// Every committed snapshot (debounced edits, explicit paging and sorting,
/// resets) starts a listing request whose result lands in the shared
/// [`ResultStream`]. Failures become error notices and leave the filters as
/// they are.
#[derive(Clone)]
pub struct DashboardController {
    api: Arc<dyn PlayerApi>,
    filters: FilterStateManager,
    results: ResultStream<Player>,
    notices: NoticeSender,
}

impl DashboardController {
    /// Wire `api` to `filters`. Must be called within a tokio runtime.
    pub fn new(api: Arc<dyn PlayerApi>, filters: FilterStateManager) -> (Self, NoticeReceiver) {
        let (notices, receiver) = NoticeSender::channel();
        let controller = Self {
            api,
            filters,
            results: ResultStream::new(),
            notices,
        };

        let wired = controller.clone_parts();
        controller.filters.observe_committed(move |criteria| {
            let ticket = wired.results.begin();
            let wired = wired.clone();
            let criteria = criteria.clone();
            tokio::spawn(async move {
                wired.load(ticket, &criteria).await;
            });
        });

        (controller, receiver)
    }

    pub fn filters(&self) -> &FilterStateManager {
        &self.filters
    }

    pub fn results(&self) -> &ResultStream<Player> {
        &self.results
    }

    pub fn set_page(&self, page: u32) -> bool {
        self.filters.apply_now(FilterEdit::Page(page))
    }

    /// Move one page forward if the last result has one.
    ///
    /// A pending filter edit is committed instead, since the listing on
    /// screen does not reflect it yet.
    pub fn next_page(&self) -> bool {
        if self.filters.has_pending() {
            return self.filters.flush();
        }
        let current = self.filters.current().page;
        match self.results.latest() {
            Some(page) if page.page == current && page.has_next() => self.set_page(current + 1),
            _ => false,
        }
    }

    pub fn prev_page(&self) -> bool {
        let current = self.filters.current().page;
        current > 0 && self.set_page(current - 1)
    }

    /// Change the page size; goes back to the first page.
    pub fn set_page_size(&self, size: u32) -> Result<bool, FilterInputError> {
        if size == 0 {
            return Err(FilterInputError::ZeroPageSize);
        }
        Ok(self.filters.apply_now(FilterEdit::PageSize(size)))
    }

    pub fn set_sort(&self, by: SortBy, direction: SortDirection) -> bool {
        self.filters.apply_now(FilterEdit::Sort(by, direction))
    }

    pub fn reset(&self) -> bool {
        self.filters.reset()
    }

    /// Fetch the committed criteria again and wait for the outcome.
    pub async fn refresh(&self) -> LoadState<Player> {
        let criteria = self.filters.committed();
        let ticket = self.results.begin();
        self.clone_parts().load(ticket, &criteria).await;
        self.results.settled().await
    }

    pub async fn get(&self, id: i64) -> FetchResult<Player> {
        let result = self.api.get_player(id).await;
        self.report(&result, None);
        result
    }

    pub async fn create(&self, player: &Player) -> FetchResult<Player> {
        let result = self.api.create_player(player).await;
        self.after_mutation(&result, PLAYER_CREATED.to_string()).await;
        result
    }

    pub async fn update(&self, id: i64, update: &UpdatePlayer) -> FetchResult<Player> {
        let result = self.api.update_player(id, update).await;
        self.after_mutation(&result, PLAYER_UPDATED.to_string()).await;
        result
    }

    pub async fn delete(&self, id: i64) -> FetchResult<()> {
        let result = self.api.delete_player(id).await;
        self.after_mutation(&result, PLAYER_DELETED.to_string()).await;
        result
    }

    pub async fn upload_csv(&self, file_name: &str, contents: Vec<u8>) -> FetchResult<CsvUploadReport> {
        let result = self.api.bulk_upload(file_name, contents).await;
        let summary = result.as_ref().map(CsvUploadReport::summary).unwrap_or_default();
        self.after_mutation(&result, summary).await;
        result
    }

    async fn after_mutation<T>(&self, result: &FetchResult<T>, success: String) {
        self.report(result, Some(success));
        if result.is_ok() {
            self.refresh().await;
        }
    }

    fn report<T>(&self, result: &FetchResult<T>, success: Option<String>) {
        match result {
            Ok(_) => {
                if let Some(message) = success {
                    self.notices.push(Notice::success(message));
                }
            }
            Err(e) => self.notices.push(Notice::error(e.to_string())),
        }
    }

    fn clone_parts(&self) -> Loader {
        Loader {
            api: self.api.clone(),
            results: self.results.clone(),
            notices: self.notices.clone(),
        }
    }
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

/// The parts a background listing request needs. Holding these instead of
/// the controller keeps the filter manager out of its own observer.
#[derive(Clone)]
struct Loader {
    api: Arc<dyn PlayerApi>,
    results: ResultStream<Player>,
    notices: NoticeSender,
}

impl Loader {
    async fn load(&self, ticket: RequestTicket, criteria: &FilterCriteria) {
        let outcome: FetchResult<PageResult<Player>> = self.api.fetch_page(criteria).await;
        let message = outcome.as_ref().err().map(ToString::to_string);
        if self.results.complete(ticket, outcome)
            && let Some(message) = message
        {
            self.notices.push(Notice::error(message));
        }
    }
}
