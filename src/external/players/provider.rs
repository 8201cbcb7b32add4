use async_trait::async_trait;

use super::error::FetchResult;
use super::types::CsvUploadReport;
use crate::filters::FilterCriteria;
use crate::models::{Player, UpdatePlayer};
use crate::pagination::PageResult;

/// Operations offered by the player service.
///
/// Implementations do not deduplicate or cancel calls; callers that issue
/// overlapping `fetch_page` calls decide which result to keep.
#[async_trait]
pub trait PlayerApi: Send + Sync {
    /// Fetch one page of players matching `criteria`.
    async fn fetch_page(&self, criteria: &FilterCriteria) -> FetchResult<PageResult<Player>>;

    async fn get_player(&self, id: i64) -> FetchResult<Player>;

    async fn create_player(&self, player: &Player) -> FetchResult<Player>;

    async fn update_player(&self, id: i64, update: &UpdatePlayer) -> FetchResult<Player>;

    async fn delete_player(&self, id: i64) -> FetchResult<()>;

    /// Upload a CSV file for bulk creation. Rows are validated server-side.
    async fn bulk_upload(&self, file_name: &str, contents: Vec<u8>) -> FetchResult<CsvUploadReport>;
}
