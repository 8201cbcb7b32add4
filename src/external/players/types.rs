use serde::{Deserialize, Serialize};

use crate::pagination::PageResult;

/// Listing response body as produced by the service's pagination.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u64,
    /// Zero-based page index
    #[serde(default)]
    pub number: u32,
}

impl<T> PageResponse<T> {
    /// Normalize into a [`PageResult`] for the requested page.
    ///
    /// A server that returns more than `page_size` items is cut back to
    /// `page_size`.
    pub fn into_page(self, page: u32, page_size: u32) -> PageResult<T> {
        let mut items = self.content;
        let limit = page_size as usize;
        if items.len() > limit {
            tracing::warn!(
                received = items.len(),
                page_size,
                "Server returned more items than requested, truncating"
            );
            items.truncate(limit);
        }
        PageResult::new(items, self.total_elements, page, page_size)
    }
}

/// Result of a bulk CSV upload; row numbers count the header as row 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CsvUploadReport {
    #[serde(default)]
    pub successfully_created: Vec<u32>,
    #[serde(default)]
    pub failed_to_create: Vec<u32>,
}

impl CsvUploadReport {
    pub fn summary(&self) -> String {
        format!(
            "Successfully created: {} rows. Failed to create: {} rows.",
            self.successfully_created.len(),
            self.failed_to_create.len()
        )
    }
}
