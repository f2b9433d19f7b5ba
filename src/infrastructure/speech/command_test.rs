use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;
use std::process::Output;

use anyhow::Result;

use super::classify;
use super::CommandRecognizer;
use crate::domain::models::Recognition;
use crate::domain::models::RecognitionError;
use crate::domain::models::SpeechRecognizer;

fn output(code: i32, stdout: &str) -> Output {
    return Output {
        // Wait statuses keep the exit code in the second byte.
        status: ExitStatus::from_raw(code << 8),
        stdout: stdout.as_bytes().to_vec(),
        stderr: vec![],
    };
}

#[test]
fn it_returns_the_trimmed_transcript() {
    assert_eq!(
        classify(&output(0, "  what is this?\n")),
        Recognition::Transcript("what is this?".to_string())
    );
}

#[test]
fn it_reports_no_speech_for_empty_output() {
    assert_eq!(
        classify(&output(0, " \n")),
        Recognition::Error(RecognitionError::NoSpeech)
    );
}

#[test]
fn it_reports_permission_denied_exits() {
    assert_eq!(
        classify(&output(77, "")),
        Recognition::Error(RecognitionError::PermissionDenied)
    );
}

#[test]
fn it_reports_other_exits_as_generic_errors() {
    assert_eq!(
        classify(&output(1, "partial")),
        Recognition::Error(RecognitionError::Generic)
    );
}

#[tokio::test]
async fn it_passes_the_locale_to_the_command() -> Result<()> {
    let recognizer = CommandRecognizer::new("echo".to_string(), vec!["heard".to_string()]);
    let res = recognizer.listen("en-US").await?;

    assert_eq!(res, Recognition::Transcript("heard en-US".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_start_a_missing_command() {
    let recognizer = CommandRecognizer::new("medivision-no-such-recognizer".to_string(), vec![]);
    assert!(recognizer.listen("en-US").await.is_err());
}
