//! Response envelopes shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Every successful response is wrapped in this envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<u64>,
}

impl<T> ApiResponse<T> {
    /// Pagination for this page, or a single empty page when the backend
    /// sent none.
    pub fn page_meta(&self, page: u32, limit: u32) -> PaginationMeta {
        self.meta
            .clone()
            .unwrap_or_else(|| PaginationMeta::fallback(page, limit))
    }
}

/// Envelope for endpoints whose `data` is null or irrelevant.
pub type Ack = ApiResponse<Option<serde_json::Value>>;

/// Pagination details for list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    /// Meta used when a list response carries none.
    pub fn fallback(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            total: 0,
            total_pages: 1,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Body of a non-success response.
///
/// Everything is optional: error bodies from proxies or crashed handlers
/// rarely follow the envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, alias = "errorCode")]
    pub code: Option<String>,
}
