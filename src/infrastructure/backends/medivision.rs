#[cfg(test)]
#[path = "medivision_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use tokio::fs;

use crate::domain::models::Backend;
use crate::domain::models::QueryRequest;
use crate::domain::models::QueryResponse;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadResponse;

/// Client for the MediVision analysis server.
pub struct MediVision {
    url: String,
    timeout: String,
}

impl MediVision {
    pub fn new(url: &str, timeout: &str) -> MediVision {
        return MediVision {
            url: url.trim_end_matches('/').to_string(),
            timeout: timeout.to_string(),
        };
    }
}

fn check_status(res: &reqwest::Response, message: &str) -> Result<()> {
    let status = res.status();
    if !status.is_success() {
        tracing::error!(status = status.as_u16(), "{message}");
        bail!("HTTP error! status: {}", status.as_u16());
    }

    return Ok(());
}

#[async_trait]
impl Backend for MediVision {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "MediVision server is not reachable");
                bail!("MediVision server is not reachable");
            }
        };

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "MediVision health check failed");
            bail!("MediVision health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn upload(&self, file: &UploadFile) -> Result<UploadResponse> {
        let bytes = fs::read(&file.path).await?;
        let part = multipart::Part::bytes(bytes)
            .file_name(file.file_name.to_string())
            .mime_str(&file.mime)?;
        let form = multipart::Form::new().part("file", part);

        let res = reqwest::Client::new()
            .post(format!("{url}/upload", url = self.url))
            .multipart(form)
            .send()
            .await?;

        check_status(&res, "Failed to upload image to MediVision")?;

        let body = res.json::<UploadResponse>().await?;
        tracing::debug!(
            success = body.success,
            filename = ?body.filename,
            detections = ?body.detections.as_ref().map(|e| return e.len()),
            error = ?body.error,
            "Upload response"
        );

        return Ok(body);
    }

    #[allow(clippy::implicit_return)]
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let res = reqwest::Client::new()
            .post(format!("{url}/query", url = self.url))
            .json(request)
            .send()
            .await?;

        check_status(&res, "Failed to make query request to MediVision")?;

        let body = res.json::<QueryResponse>().await?;
        tracing::debug!(body = ?body, "Query response");

        return Ok(body);
    }
}
