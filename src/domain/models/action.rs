use super::QueryRequest;
use super::UploadFile;

/// Work requested by the UI, executed by the actions service.
#[derive(Debug, PartialEq)]
pub enum Action {
    HealthCheck(),
    Query(QueryRequest),
    RecordStart(),
    RecordStop(),
    Speak(String),
    SpeechCancel(),
    Upload(UploadFile),
}
