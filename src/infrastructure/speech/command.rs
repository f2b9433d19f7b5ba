#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::io;
use std::process::Output;
use std::process::Stdio;

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::models::Recognition;
use crate::domain::models::RecognitionError;
use crate::domain::models::SpeechRecognizer;

/// Exit code a recognizer uses to report that microphone access was refused.
pub const EXIT_PERMISSION_DENIED: i32 = 77;

/// Turns a finished recognizer process into a recognition result.
pub fn classify(output: &Output) -> Recognition {
    if !output.status.success() {
        if output.status.code() == Some(EXIT_PERMISSION_DENIED) {
            return Recognition::Error(RecognitionError::PermissionDenied);
        }
        return Recognition::Error(RecognitionError::Generic);
    }

    let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if transcript.is_empty() {
        return Recognition::Error(RecognitionError::NoSpeech);
    }

    return Recognition::Transcript(transcript);
}

/// Runs an external program that listens for one utterance and prints the
/// transcript to stdout. The locale is passed as the last argument.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: String, args: Vec<String>) -> CommandRecognizer {
        return CommandRecognizer { program, args };
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    fn name(&self) -> String {
        return self.program.to_string();
    }

    #[allow(clippy::implicit_return)]
    async fn listen(&self, locale: &str) -> Result<Recognition> {
        let res = Command::new(&self.program)
            .args(&self.args)
            .arg(locale)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        let output = match res {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::PermissionDenied => {
                tracing::warn!(program = %self.program, error = ?err, "Recognizer was not permitted to run");
                return Ok(Recognition::Error(RecognitionError::PermissionDenied));
            }
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(program = %self.program, status = ?output.status.code(), "Recognizer finished");
        return Ok(classify(&output));
    }
}
