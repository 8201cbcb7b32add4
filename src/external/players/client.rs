use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

use super::error::{FetchError, FetchResult};
use super::provider::PlayerApi;
use super::query::listing_url;
use super::types::{CsvUploadReport, PageResponse};
use crate::config::settings::ApiConfig;
use crate::error::AppResult;
use crate::external::client::build_http_client;
use crate::filters::FilterCriteria;
use crate::models::{Player, UpdatePlayer};
use crate::pagination::PageResult;

const FETCH_FAILED: &str = "Failed to fetch players.";
const GET_FAILED: &str = "Failed to retrieve player.";
const SUBMIT_FAILED: &str = "Failed to submit player.";
const DELETE_FAILED: &str = "Failed to delete player.";
const UPLOAD_FAILED: &str = "Failed to upload CSV.";

const UPLOAD_SEGMENT: &str = "bulk-upload";

/// HTTP implementation of [`PlayerApi`].
///
/// `base_url` is the player collection, e.g.
/// `http://localhost:8081/api/players`; single players live below it at
/// `{base}/{id}` and bulk import at `{base}/bulk-upload`.
#[derive(Debug, Clone)]
pub struct PlayerServiceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PlayerServiceClient {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn from_config(config: &ApiConfig) -> AppResult<Self> {
        let base_url = config.base_url()?;
        let http = build_http_client(config)?;
        Ok(Self::new(http, base_url))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{segment}`, regardless of a trailing slash on the base.
    fn endpoint(&self, segment: &str) -> FetchResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::InvalidRequest(format!("{} cannot be used as a base URL", self.base_url))
            })?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    /// Send `request`; transport failures and non-success statuses become
    /// a [`FetchError`] carrying `fallback` when the body has nothing better.
    async fn execute(request: RequestBuilder, fallback: &str) -> FetchResult<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Player service unreachable");
            FetchError::transport(fallback, &e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let error = FetchError::from_response(status, &body, fallback);
        tracing::warn!(status = status.as_u16(), error = %error, "Player service rejected request");
        Err(error)
    }

    async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> FetchResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(fallback, &e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(error = %e, "Unreadable response body from player service");
            FetchError::decode(fallback, e)
        })
    }
}

#[async_trait]
impl PlayerApi for PlayerServiceClient {
    async fn fetch_page(&self, criteria: &FilterCriteria) -> FetchResult<PageResult<Player>> {
        if criteria.page_size == 0 {
            return Err(FetchError::InvalidRequest(
                "page size must be greater than 0".to_string(),
            ));
        }

        let url = listing_url(&self.base_url, criteria);
        tracing::debug!(%url, "Fetching players");

        let response = Self::execute(self.http.get(url), FETCH_FAILED).await?;
        let body: PageResponse<Player> = Self::read_json(response, FETCH_FAILED).await?;
        let page = body.into_page(criteria.page, criteria.page_size);

        tracing::debug!(
            items = page.items.len(),
            total = page.total_count,
            page = page.page,
            "Fetched players"
        );
        Ok(page)
    }

    async fn get_player(&self, id: i64) -> FetchResult<Player> {
        let url = self.endpoint(&id.to_string())?;
        let response = Self::execute(self.http.get(url), GET_FAILED).await?;
        Self::read_json(response, GET_FAILED).await
    }

    async fn create_player(&self, player: &Player) -> FetchResult<Player> {
        let request = self.http.post(self.base_url.clone()).json(player);
        let response = Self::execute(request, SUBMIT_FAILED).await?;
        let created: Player = Self::read_json(response, SUBMIT_FAILED).await?;
        tracing::info!(id = ?created.id, name = %created.full_name(), "Player created");
        Ok(created)
    }

    async fn update_player(&self, id: i64, update: &UpdatePlayer) -> FetchResult<Player> {
        let url = self.endpoint(&id.to_string())?;
        let response = Self::execute(self.http.put(url).json(update), SUBMIT_FAILED).await?;
        let updated: Player = Self::read_json(response, SUBMIT_FAILED).await?;
        tracing::info!(id, "Player updated");
        Ok(updated)
    }

    async fn delete_player(&self, id: i64) -> FetchResult<()> {
        let url = self.endpoint(&id.to_string())?;
        Self::execute(self.http.delete(url), DELETE_FAILED).await?;
        tracing::info!(id, "Player deleted");
        Ok(())
    }

    async fn bulk_upload(&self, file_name: &str, contents: Vec<u8>) -> FetchResult<CsvUploadReport> {
        let url = self.endpoint(UPLOAD_SEGMENT)?;
        let size = contents.len();
        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("text/csv")
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("file", part);

        tracing::debug!(file = file_name, bytes = size, "Uploading CSV");
        let response = Self::execute(self.http.post(url).multipart(form), UPLOAD_FAILED).await?;
        let report: CsvUploadReport = Self::read_json(response, UPLOAD_FAILED).await?;
        tracing::info!(
            created = report.successfully_created.len(),
            failed = report.failed_to_create.len(),
            "CSV uploaded"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::players::test_support::MockService;
    use crate::filters::FilterEdit;
    use crate::models::Position;
    use axum::http::StatusCode;
    use jiff::civil::date;
    use std::collections::BTreeSet;

    const PAGE_BODY: &str = r#"{
        "content": [
            {"id": 1, "firstName": "Bukayo", "lastName": "Saka", "nationalities": ["GB"],
             "dateOfBirth": "2001-09-05", "positions": ["RW", "RM"], "height": 1.78},
            {"id": 2, "firstName": "Declan", "lastName": "Rice", "nationalities": ["GB", "IE"],
             "dateOfBirth": "1999-01-14", "positions": ["CDM"], "height": 1.85}
        ],
        "totalElements": 25,
        "totalPages": 3,
        "number": 1
    }"#;

    fn client_for(service: &MockService) -> PlayerServiceClient {
        PlayerServiceClient::new(reqwest::Client::new(), service.base_url())
    }

    fn sample_player() -> Player {
        Player {
            id: None,
            first_name: "Martin".to_string(),
            last_name: "Odegaard".to_string(),
            nationalities: vec!["NO".to_string()],
            date_of_birth: date(1998, 12, 17),
            positions: vec![Position::Cam],
            height: 1.78,
            creation_date: None,
            last_modified_date: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_page_sends_repeated_nationalities() {
        let service = MockService::start(StatusCode::OK, PAGE_BODY).await;
        let client = client_for(&service);

        let nationalities: BTreeSet<String> = ["FR", "BR"].iter().map(|s| s.to_string()).collect();
        let criteria = FilterCriteria::default()
            .with_edit(FilterEdit::Nationalities(nationalities))
            .with_edit(FilterEdit::MaxHeight(Some(1.9)))
            .with_edit(FilterEdit::Page(1));

        client.fetch_page(&criteria).await.unwrap();

        let request = service.last_request();
        assert_eq!(request.method, "GET");
        assert_eq!(request.path, "/api/players");
        let query = request.query.unwrap();
        assert!(query.contains("nationalities=BR&nationalities=FR"));
        assert!(query.contains("maxHeight=1.9"));
        assert!(!query.contains("minHeight"));
        assert!(query.ends_with("page=1&size=10"));
    }

    #[tokio::test]
    async fn test_fetch_page_normalizes_response() {
        let service = MockService::start(StatusCode::OK, PAGE_BODY).await;
        let client = client_for(&service);

        let criteria = FilterCriteria::default().with_edit(FilterEdit::Page(1));
        let page = client.fetch_page(&criteria).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.items[1].positions, vec![Position::Cdm]);
    }

    #[tokio::test]
    async fn test_fetch_page_truncates_oversized_pages() {
        let service = MockService::start(StatusCode::OK, PAGE_BODY).await;
        let client = client_for(&service);

        let criteria = FilterCriteria::with_page_size(1);
        let page = client.fetch_page(&criteria).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].last_name, "Saka");
    }

    #[tokio::test]
    async fn test_zero_page_size_is_rejected_without_io() {
        let service = MockService::start(StatusCode::OK, PAGE_BODY).await;
        let client = client_for(&service);

        let mut criteria = FilterCriteria::default();
        criteria.page_size = 0;
        let err = client.fetch_page(&criteria).await.unwrap_err();

        assert!(matches!(err, FetchError::InvalidRequest(_)));
        assert_eq!(service.request_count(), 0);
    }

    #[tokio::test]
    async fn test_server_error_without_body_uses_fallback() {
        let service = MockService::start(StatusCode::INTERNAL_SERVER_ERROR, "").await;
        let client = client_for(&service);

        let err = client.fetch_page(&FilterCriteria::default()).await.unwrap_err();
        assert_eq!(err, FetchError::server(Some(500), FETCH_FAILED));
    }

    #[tokio::test]
    async fn test_garbled_success_body_is_decode_error() {
        let service = MockService::start(StatusCode::OK, "{not json").await;
        let client = client_for(&service);

        let err = client.fetch_page(&FilterCriteria::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
        assert_eq!(err.to_string(), FETCH_FAILED);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{}/api/players", addr)).unwrap();
        let client = PlayerServiceClient::new(reqwest::Client::new(), base);

        let err = client.fetch_page(&FilterCriteria::default()).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert_eq!(err.to_string(), FETCH_FAILED);
    }

    #[tokio::test]
    async fn test_create_validation_error_keeps_fields() {
        let service = MockService::start(
            StatusCode::BAD_REQUEST,
            r#"{"height":"The player is too tall to play"}"#,
        )
        .await;
        let client = client_for(&service);

        let err = client.create_player(&sample_player()).await.unwrap_err();
        assert_eq!(
            err.field_errors().unwrap()["height"],
            "The player is too tall to play"
        );

        let request = service.last_request();
        assert_eq!(request.method, "POST");
        let sent: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(sent["firstName"], "Martin");
        assert_eq!(sent["dateOfBirth"], "1998-12-17");
        assert!(sent.get("id").is_none());
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let mut updated = sample_player();
        updated.id = Some(8);
        updated.height = 1.79;
        let body = serde_json::to_string(&updated).unwrap();
        let service = MockService::start(StatusCode::OK, &body).await;
        let client = client_for(&service);

        let update = UpdatePlayer {
            height: Some(1.79),
            ..Default::default()
        };
        let player = client.update_player(8, &update).await.unwrap();
        assert_eq!(player.height, 1.79);

        let request = service.last_request();
        assert_eq!(request.method, "PUT");
        assert_eq!(request.path, "/api/players/8");
        assert_eq!(request.body, br#"{"height":1.79}"#.to_vec());
    }

    #[tokio::test]
    async fn test_get_missing_player_reports_server_message() {
        let service = MockService::start(StatusCode::NOT_FOUND, "Player not found").await;
        let client = client_for(&service);

        let err = client.get_player(99).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Player not found");
        assert_eq!(service.last_request().path, "/api/players/99");
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_body() {
        let service = MockService::start(StatusCode::NO_CONTENT, "").await;
        let client = client_for(&service);

        client.delete_player(3).await.unwrap();
        let request = service.last_request();
        assert_eq!(request.method, "DELETE");
        assert_eq!(request.path, "/api/players/3");
    }

    #[tokio::test]
    async fn test_delete_failure_messages() {
        let service = MockService::start(StatusCode::NOT_FOUND, "Player not found").await;
        let err = client_for(&service).delete_player(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Player not found");

        let service = MockService::start(StatusCode::INTERNAL_SERVER_ERROR, "").await;
        let err = client_for(&service).delete_player(3).await.unwrap_err();
        assert_eq!(err.to_string(), DELETE_FAILED);
    }

    #[tokio::test]
    async fn test_bulk_upload_posts_multipart_file() {
        let service = MockService::start(
            StatusCode::OK,
            r#"{"successfully_created":[2,3],"failed_to_create":[4]}"#,
        )
        .await;
        let client = client_for(&service);

        let csv = b"firstName,lastName\nBukayo,Saka\n".to_vec();
        let report = client.bulk_upload("players.csv", csv).await.unwrap();
        assert_eq!(report.successfully_created, vec![2, 3]);

        let request = service.last_request();
        assert_eq!(request.path, "/api/players/bulk-upload");
        assert!(request
            .content_type
            .unwrap()
            .starts_with("multipart/form-data"));
        let body = String::from_utf8_lossy(&request.body);
        assert!(body.contains(r#"name="file""#));
        assert!(body.contains(r#"filename="players.csv""#));
        assert!(body.contains("Bukayo,Saka"));
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        let base = Url::parse("http://localhost:8081/api/players/").unwrap();
        let client = PlayerServiceClient::new(reqwest::Client::new(), base);
        assert_eq!(
            client.endpoint("7").unwrap().as_str(),
            "http://localhost:8081/api/players/7"
        );
    }
}
