#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Detection;
use super::UploadFile;

/// Body of `POST /upload`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detections: Option<Vec<Detection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzedImage {
    pub image_data: String,
    pub detections: Vec<Detection>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UploadOutcome {
    Analyzed(AnalyzedImage),
    /// Backend reported failure, or the request itself failed.
    Failed(String),
}

impl From<UploadResponse> for UploadOutcome {
    fn from(res: UploadResponse) -> Self {
        if !res.success {
            return UploadOutcome::Failed(res.error.unwrap_or_else(|| {
                return "Unknown error".to_string();
            }));
        }

        match res.image_data {
            Some(image_data) => {
                return UploadOutcome::Analyzed(AnalyzedImage {
                    image_data,
                    detections: res.detections.unwrap_or_default(),
                });
            }
            None => {
                return UploadOutcome::Failed(
                    "The server did not return the analyzed image".to_string(),
                );
            }
        }
    }
}

/// Body sent to `POST /query`. `image_data` is empty when no image is
/// attached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub image_data: String,
}

impl QueryRequest {
    pub fn new(query: &str, image: &Option<String>) -> QueryRequest {
        return QueryRequest {
            query: query.to_string(),
            image_data: image.clone().unwrap_or_default(),
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryOutcome {
    Response(String),
    BackendError(String),
    TransportError(String),
}

impl From<QueryResponse> for QueryOutcome {
    fn from(res: QueryResponse) -> Self {
        if let Some(error) = res.error {
            return QueryOutcome::BackendError(error);
        }

        return QueryOutcome::Response(res.response.unwrap_or_else(|| {
            return "No response received".to_string();
        }));
    }
}

impl QueryOutcome {
    /// Text appended to the transcript once the response arrives.
    pub fn text(&self) -> String {
        match self {
            QueryOutcome::Response(text) => return text.to_string(),
            QueryOutcome::BackendError(err) => return format!("❌ Error: {err}"),
            QueryOutcome::TransportError(err) => {
                return format!("⚠️ Sorry, I encountered an error: {err}");
            }
        }
    }

    pub fn is_error(&self) -> bool {
        return !matches!(self, QueryOutcome::Response(_));
    }
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the analysis server is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Submits an image for analysis. Transport failures and non-2xx
    /// statuses are returned as errors, logical failures come back in the
    /// response body.
    async fn upload(&self, file: &UploadFile) -> Result<UploadResponse>;

    /// Asks a question, optionally about the current image.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
