use anyhow::Result;

use super::AnalyzedImage;
use super::QueryOutcome;
use super::QueryRequest;
use super::QueryResponse;
use super::UploadOutcome;
use super::UploadResponse;
use crate::domain::models::Detection;

#[test]
fn it_converts_successful_uploads() -> Result<()> {
    let res: UploadResponse = serde_json::from_str(&test_utils::upload_response_fixture(3))?;
    match UploadOutcome::from(res) {
        UploadOutcome::Analyzed(image) => {
            assert_eq!(image.image_data, test_utils::image_fixture());
            assert_eq!(image.detections.len(), 3);
            assert_eq!(image.detections[0].class, "nodule");
        }
        UploadOutcome::Failed(err) => panic!("unexpected failure: {err}"),
    }

    return Ok(());
}

#[test]
fn it_defaults_missing_detections_to_empty() {
    let res = UploadResponse {
        success: true,
        image_data: Some("abc".to_string()),
        ..UploadResponse::default()
    };

    assert_eq!(
        UploadOutcome::from(res),
        UploadOutcome::Analyzed(AnalyzedImage {
            image_data: "abc".to_string(),
            detections: Vec::<Detection>::new(),
        })
    );
}

#[test]
fn it_converts_backend_failures() -> Result<()> {
    // The server omits `success` entirely when it fails.
    let res: UploadResponse = serde_json::from_str(r#"{"error": "Invalid file type"}"#)?;
    assert_eq!(
        UploadOutcome::from(res),
        UploadOutcome::Failed("Invalid file type".to_string())
    );

    return Ok(());
}

#[test]
fn it_converts_failures_without_a_reason() {
    assert_eq!(
        UploadOutcome::from(UploadResponse::default()),
        UploadOutcome::Failed("Unknown error".to_string())
    );
}

#[test]
fn it_fails_successful_uploads_without_image_data() {
    let res = UploadResponse {
        success: true,
        ..UploadResponse::default()
    };
    assert!(matches!(UploadOutcome::from(res), UploadOutcome::Failed(_)));
}

#[test]
fn it_sends_an_empty_image_without_an_upload() -> Result<()> {
    let req = QueryRequest::new("hello", &None);
    insta::assert_snapshot!(serde_json::to_string(&req)?, @r###"{"query":"hello","image_data":""}"###);

    let req = QueryRequest::new("hello", &Some("abc".to_string()));
    assert_eq!(req.image_data, "abc");

    return Ok(());
}

#[test]
fn it_converts_query_responses() {
    let outcome = QueryOutcome::from(QueryResponse {
        response: Some("This shows X.".to_string()),
        error: None,
    });
    assert_eq!(outcome, QueryOutcome::Response("This shows X.".to_string()));
    assert_eq!(outcome.text(), "This shows X.");
    assert!(!outcome.is_error());
}

#[test]
fn it_prefers_query_errors_over_responses() {
    let outcome = QueryOutcome::from(QueryResponse {
        response: Some("ignored".to_string()),
        error: Some("No query provided".to_string()),
    });
    assert_eq!(outcome.text(), "❌ Error: No query provided");
    assert!(outcome.is_error());
}

#[test]
fn it_falls_back_when_no_response_is_received() {
    let outcome = QueryOutcome::from(QueryResponse::default());
    assert_eq!(outcome.text(), "No response received");
}

#[test]
fn it_formats_transport_errors() {
    let outcome = QueryOutcome::TransportError("HTTP error! status: 502".to_string());
    insta::assert_snapshot!(outcome.text(), @"⚠️ Sorry, I encountered an error: HTTP error! status: 502");
}
