#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::BackendBox;
use crate::domain::models::Capability;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::QueryOutcome;
use crate::domain::models::QueryRequest;
use crate::domain::models::Recognition;
use crate::domain::models::RecognizerArc;
use crate::domain::models::SpeechProfile;
use crate::domain::models::SynthesizerArc;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadOutcome;

/// Pause between a transcript landing in the prompt and it being submitted.
pub const VOICE_SUBMIT_DELAY: time::Duration = time::Duration::from_millis(100);

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /upload (/u) [PATH] - Uploads a medical image for analysis. PNG, JPG, JPEG, GIF and BMP files up to 16MB are accepted.
- /clear (/c) - Removes the current image and its findings. You can keep chatting without an image.
- /voice (/v) - Turns spoken responses on or off.
- /record (/r) - Starts or stops listening for a spoken question.
- /quit /exit (/q) - Exit MediVision.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+R - Start or stop voice input.
- CTRL+T - Turn voice responses on or off.
- CTRL+C - Exit.

Questions asked while an image is uploaded are sent along with the image, so you can ask about the findings directly.
        "#;

    return text.trim().to_string();
}

async fn health_check(backend: Arc<BackendBox>, tx: mpsc::UnboundedSender<Event>) -> Result<()> {
    if let Err(err) = backend.health_check().await {
        let url = Config::get(ConfigKey::ServerURL);
        tracing::warn!(url = %url, error = ?err, "Health check failed");

        tx.send(Event::ServiceMessage(Message::new_with_type(
            Author::Assistant,
            MessageType::Error,
            &format!("Unable to reach the analysis server at {url}: {err}"),
        )))?;
    }

    return Ok(());
}

async fn upload(
    backend: Arc<BackendBox>,
    file: UploadFile,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let outcome = match backend.upload(&file).await {
        Ok(res) => UploadOutcome::from(res),
        Err(err) => {
            tracing::error!(file = ?file.path, error = ?err, "Upload request failed");
            UploadOutcome::Failed(err.to_string())
        }
    };

    tx.send(Event::UploadFinished(outcome))?;
    return Ok(());
}

async fn query(
    backend: Arc<BackendBox>,
    request: QueryRequest,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let outcome = match backend.query(&request).await {
        Ok(res) => QueryOutcome::from(res),
        Err(err) => {
            tracing::error!(error = ?err, "Query request failed");
            QueryOutcome::TransportError(err.to_string())
        }
    };

    tx.send(Event::QueryFinished(outcome))?;
    return Ok(());
}

async fn speak(synthesizer: SynthesizerArc, text: String) -> Result<()> {
    if let Err(err) = synthesizer.speak(&text, &SpeechProfile::default()).await {
        tracing::error!(synthesizer = %synthesizer.name(), error = ?err, "Speech failed");
    }

    return Ok(());
}

async fn recognize(
    recognizer: RecognizerArc,
    locale: String,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match recognizer.listen(&locale).await {
        Ok(Recognition::Transcript(transcript)) => {
            let should_submit = !transcript.trim().is_empty();
            tx.send(Event::RecognitionTranscript(transcript))?;
            tx.send(Event::RecognitionEnded())?;

            if should_submit {
                time::sleep(VOICE_SUBMIT_DELAY).await;
                tx.send(Event::VoiceSubmit())?;
            }
        }
        Ok(Recognition::Error(err)) => {
            tracing::debug!(error = ?err, "Recognition finished with an error");
            tx.send(Event::RecognitionError(err))?;
            tx.send(Event::RecognitionEnded())?;
        }
        Err(err) => {
            tracing::error!(recognizer = %recognizer.name(), error = ?err, "Recognition failed to start");
            tx.send(Event::RecognitionFailedToStart())?;
        }
    }

    return Ok(());
}

fn idle_worker() -> JoinHandle<Result<()>> {
    return tokio::spawn(async {
        return Ok(());
    });
}

/// Runs the work the UI asks for. Requests run on their own tasks and report
/// back as events. Speech and recognition each keep a single worker, so
/// starting one aborts whatever was running before.
pub struct ActionsService {
    backend: Arc<BackendBox>,
    synthesizer: Capability<SynthesizerArc>,
    recognizer: Capability<RecognizerArc>,
    locale: String,
    tx: mpsc::UnboundedSender<Event>,
    speech_worker: JoinHandle<Result<()>>,
    recognition_worker: JoinHandle<Result<()>>,
}

impl ActionsService {
    pub fn new(
        backend: BackendBox,
        synthesizer: Capability<SynthesizerArc>,
        recognizer: Capability<RecognizerArc>,
        locale: &str,
        tx: mpsc::UnboundedSender<Event>,
    ) -> ActionsService {
        return ActionsService {
            backend: Arc::new(backend),
            synthesizer,
            recognizer,
            locale: locale.to_string(),
            tx,
            speech_worker: idle_worker(),
            recognition_worker: idle_worker(),
        };
    }

    pub async fn start(mut self, rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<()> {
        while let Some(action) = rx.recv().await {
            self.handle(action)?;
        }

        self.speech_worker.abort();
        self.recognition_worker.abort();

        return Ok(());
    }

    pub fn handle(&mut self, action: Action) -> Result<()> {
        let worker_tx = self.tx.clone();
        let backend = self.backend.clone();

        match action {
            Action::HealthCheck() => {
                tokio::spawn(health_check(backend, worker_tx));
            }
            Action::Upload(file) => {
                tokio::spawn(upload(backend, file, worker_tx));
            }
            Action::Query(request) => {
                tokio::spawn(query(backend, request, worker_tx));
            }
            Action::Speak(text) => {
                if let Capability::Available(synthesizer) = &self.synthesizer {
                    self.speech_worker.abort();
                    self.speech_worker = tokio::spawn(speak(synthesizer.clone(), text));
                }
            }
            Action::SpeechCancel() => {
                self.speech_worker.abort();
            }
            Action::RecordStart() => match &self.recognizer {
                Capability::Available(recognizer) => {
                    self.recognition_worker.abort();
                    self.recognition_worker = tokio::spawn(recognize(
                        recognizer.clone(),
                        self.locale.to_string(),
                        worker_tx,
                    ));
                }
                Capability::Unavailable => {
                    self.tx.send(Event::RecognitionFailedToStart())?;
                }
            },
            Action::RecordStop() => {
                self.recognition_worker.abort();
                self.tx.send(Event::RecognitionEnded())?;
            }
        }

        return Ok(());
    }
}
