use std::fs;

use anyhow::Result;
use mockito::Matcher;
use test_utils::upload_response_fixture;

use super::MediVision;
use crate::domain::models::Backend;
use crate::domain::models::QueryRequest;
use crate::domain::models::QueryResponse;
use crate::domain::models::UploadFile;

fn scan_file(dir: &tempfile::TempDir) -> Result<UploadFile> {
    let path = dir.path().join("scan.png");
    fs::write(&path, "not really a png")?;
    return UploadFile::inspect(&path);
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(204)
        .create_async()
        .await;

    let backend = MediVision::new(&server.url(), "200");
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(500)
        .create_async()
        .await;

    let backend = MediVision::new(&server.url(), "200");
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_with_a_bad_timeout() {
    let backend = MediVision::new("http://localhost:1", "soon");
    assert!(backend.health_check().await.is_err());
}

#[tokio::test]
async fn it_uploads_the_file_as_multipart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file = scan_file(&dir)?;

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="scan.png""#.to_string()),
            Matcher::Regex("(?i)content-type: image/png".to_string()),
            Matcher::Regex("not really a png".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(upload_response_fixture(3))
        .create_async()
        .await;

    let backend = MediVision::new(&server.url(), "200");
    let res = backend.upload(&file).await?;

    mock.assert_async().await;
    assert!(res.success);
    assert_eq!(res.filename, Some("scan.png".to_string()));
    assert_eq!(res.image_data, Some(test_utils::image_fixture().to_string()));

    let detections = res.detections.unwrap_or_default();
    assert_eq!(detections.len(), 3);
    assert_eq!(detections[0].class, "nodule");
    assert_eq!(detections[0].confidence_percent(), "87.3%");
    assert_eq!(detections[2].class, "fracture");

    return Ok(());
}

#[tokio::test]
async fn it_returns_backend_upload_failures() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file = scan_file(&dir)?;

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .with_status(200)
        .with_body(r#"{"success": false, "error": "Invalid image"}"#)
        .create_async()
        .await;

    let backend = MediVision::new(&server.url(), "200");
    let res = backend.upload(&file).await?;

    mock.assert_async().await;
    assert!(!res.success);
    assert_eq!(res.error, Some("Invalid image".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_fails_uploads_on_http_errors() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file = scan_file(&dir)?;

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .with_status(413)
        .create_async()
        .await;

    let backend = MediVision::new(&server.url(), "200");
    let res = backend.upload(&file).await;

    mock.assert_async().await;
    assert_eq!(res.unwrap_err().to_string(), "HTTP error! status: 413");

    return Ok(());
}

#[tokio::test]
async fn it_fails_uploads_on_unparsable_bodies() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let file = scan_file(&dir)?;

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/upload")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let backend = MediVision::new(&server.url(), "200");
    let res = backend.upload(&file).await;

    mock.assert_async().await;
    assert!(res.is_err());

    return Ok(());
}

#[tokio::test]
async fn it_sends_queries_as_json() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .match_body(Matcher::Json(serde_json::json!({
            "query": "what is this?",
            "image_data": "aGVsbG8=",
        })))
        .with_status(200)
        .with_body(r#"{"response": "This shows X."}"#)
        .create_async()
        .await;

    let backend = MediVision::new(&format!("{}/", server.url()), "200");
    let res = backend
        .query(&QueryRequest::new(
            "what is this?",
            &Some("aGVsbG8=".to_string()),
        ))
        .await?;

    mock.assert_async().await;
    assert_eq!(
        res,
        QueryResponse {
            response: Some("This shows X.".to_string()),
            error: None,
        }
    );

    return Ok(());
}

#[tokio::test]
async fn it_sends_an_empty_image_without_an_upload() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .match_body(Matcher::Json(serde_json::json!({
            "query": "hello",
            "image_data": "",
        })))
        .with_status(200)
        .with_body(r#"{"error": "model offline"}"#)
        .create_async()
        .await;

    let backend = MediVision::new(&server.url(), "200");
    let res = backend.query(&QueryRequest::new("hello", &None)).await?;

    mock.assert_async().await;
    assert_eq!(res.error, Some("model offline".to_string()));
    assert_eq!(res.response, None);

    return Ok(());
}

#[tokio::test]
async fn it_fails_queries_on_http_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/query")
        .with_status(500)
        .with_body(r#"{"error": "boom"}"#)
        .create_async()
        .await;

    let backend = MediVision::new(&server.url(), "200");
    let res = backend.query(&QueryRequest::new("hello", &None)).await;

    mock.assert_async().await;
    assert_eq!(res.unwrap_err().to_string(), "HTTP error! status: 500");

    return Ok(());
}
