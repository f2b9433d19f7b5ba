#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::voice::speakable_text;
use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Capability;
use crate::domain::models::Detection;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::QueryOutcome;
use crate::domain::models::QueryRequest;
use crate::domain::models::RecognitionError;
use crate::domain::models::SessionState;
use crate::domain::models::SlashCommand;
use crate::domain::models::SpeechName;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadOutcome;

pub const GREETING: &str =
    "Hello! Upload a medical image with /upload PATH, or ask me anything.";
pub const RECOGNITION_UNAVAILABLE: &str =
    "Voice recognition is not available. Configure a speech recognition command to enable it.";

pub fn analyzed_summary(count: usize) -> String {
    return format!("I've analyzed your medical image and identified {count} findings using AI diagnostic algorithms. What would you like to know about the results?");
}

pub struct AppState {
    pub bubble_list: BubbleList,
    /// `None` until an image has been analyzed, and again after clearing.
    pub detections: Option<Vec<Detection>>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub recognition: Capability<String>,
    pub scroll: Scroll,
    pub session: SessionState,
    pub synthesis: Capability<SpeechName>,
    pub uploading: bool,
    prompt_replacement: Option<String>,
}

impl AppState {
    pub fn new(
        session: SessionState,
        synthesis: Capability<SpeechName>,
        recognition: Capability<String>,
    ) -> AppState {
        return AppState {
            bubble_list: BubbleList::default(),
            detections: None,
            last_known_height: 0,
            last_known_width: 0,
            messages: vec![Message::new(Author::Assistant, GREETING)],
            recognition,
            scroll: Scroll::default(),
            session,
            synthesis,
            uploading: false,
            prompt_replacement: None,
        };
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    /// Appends an assistant message and hands it to voice output.
    pub fn add_assistant_message(
        &mut self,
        mtype: MessageType,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.add_message(Message::new_with_type(Author::Assistant, mtype, text));
        return self.speak(text, tx);
    }

    fn speak(&self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if !self.session.voice_enabled {
            return Ok(());
        }

        if let Capability::Available(_) = self.synthesis {
            if let Some(cleaned) = speakable_text(text) {
                tx.send(Action::Speak(cleaned))?;
            }
        }

        return Ok(());
    }

    pub fn prompt_title(&self) -> &'static str {
        if self.session.current_image.is_some() {
            return "Ask about the medical findings...";
        }

        return "Ask me anything...";
    }

    pub fn detection_count(&self) -> usize {
        return self
            .detections
            .as_ref()
            .map(|detections| return detections.len())
            .unwrap_or(0);
    }

    /// Text a voice transcript put in the prompt box, taken once by the UI.
    pub fn take_prompt_replacement(&mut self) -> Option<String> {
        return self.prompt_replacement.take();
    }

    /// Handles a line submitted from the prompt box. Returns true when the
    /// user asked to quit.
    pub fn submit_prompt(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        let (should_break, should_continue) = self.handle_slash_commands(input, tx)?;
        if should_break {
            return Ok(true);
        }
        if should_continue {
            return Ok(false);
        }

        self.submit_query(input, tx)?;
        return Ok(false);
    }

    pub fn handle_slash_commands(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let mut should_break = false;
        let mut should_continue = false;

        if let Some(command) = SlashCommand::parse(input) {
            should_continue = true;

            if command.is_quit() {
                should_break = true;
            } else if command.is_upload() {
                let path = command.arg_text();
                if path.is_empty() {
                    self.add_assistant_message(
                        MessageType::Error,
                        "You must specify a file with `/upload PATH`. Run `/help` for more details.",
                        tx,
                    )?;
                } else {
                    self.upload(path::Path::new(&path), tx)?;
                }
            } else if command.is_clear() {
                self.clear_image();
            } else if command.is_voice() {
                self.toggle_voice_output(tx)?;
            } else if command.is_record() {
                self.toggle_recording(tx)?;
            } else if command.is_help() {
                self.add_assistant_message(MessageType::Normal, &help_text(), tx)?;
            }
        }

        return Ok((should_break, should_continue));
    }

    /// Validates the file locally and, when it passes, asks for it to be
    /// uploaded. Nothing is sent for files that fail validation.
    pub fn upload(&mut self, path: &path::Path, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let file = match UploadFile::inspect(path) {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(path = ?path, error = ?err, "Unable to read upload");
                return self.add_assistant_message(
                    MessageType::Error,
                    &format!("Upload failed: {err}"),
                    tx,
                );
            }
        };

        return self.upload_file(file, tx);
    }

    pub fn upload_file(&mut self, file: UploadFile, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if let Err(rejection) = file.validate() {
            tracing::debug!(rejection = ?rejection, file = ?file.path, "Upload rejected");
            return self.add_assistant_message(MessageType::Error, &rejection.message(), tx);
        }

        self.uploading = true;
        tx.send(Action::Upload(file))?;

        return Ok(());
    }

    /// Session state only changes when the image was analyzed.
    pub fn handle_upload_finished(
        &mut self,
        outcome: UploadOutcome,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.uploading = false;

        match outcome {
            UploadOutcome::Analyzed(image) => {
                let count = image.detections.len();
                self.session.current_image = Some(image.image_data);
                self.detections = Some(image.detections);

                return self.add_assistant_message(
                    MessageType::Normal,
                    &analyzed_summary(count),
                    tx,
                );
            }
            UploadOutcome::Failed(err) => {
                return self.add_assistant_message(
                    MessageType::Error,
                    &format!("Upload failed: {err}"),
                    tx,
                );
            }
        }
    }

    pub fn submit_query(&mut self, input: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let query = input.trim();
        if query.is_empty() {
            return Ok(());
        }

        let image = self.session.current_image.clone();
        self.add_message(Message::new(Author::User, query).with_image(image.clone()));
        self.add_message(Message::thinking());

        tx.send(Action::Query(QueryRequest::new(query, &image)))?;

        return Ok(());
    }

    /// Responses are not correlated with their requests. With overlapping
    /// queries the oldest placeholder goes first, whichever query answered.
    pub fn handle_query_finished(
        &mut self,
        outcome: QueryOutcome,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.remove_thinking_placeholder();

        let mut mtype = MessageType::Normal;
        if outcome.is_error() {
            mtype = MessageType::Error;
        }

        return self.add_assistant_message(mtype, &outcome.text(), tx);
    }

    pub fn remove_thinking_placeholder(&mut self) -> bool {
        if let Some(idx) = self.messages.iter().position(|m| return m.is_thinking()) {
            self.messages.remove(idx);
            self.bubble_list.clear();
            self.sync_dependants();
            return true;
        }

        return false;
    }

    /// Chat stays available after clearing, just without an image attached.
    pub fn clear_image(&mut self) {
        self.session.current_image = None;
        self.detections = None;
    }

    pub fn toggle_recording(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        match self.recognition {
            Capability::Unavailable => {
                return self.add_assistant_message(
                    MessageType::Normal,
                    RECOGNITION_UNAVAILABLE,
                    tx,
                );
            }
            Capability::Available(_) => {
                if self.session.is_recording {
                    tx.send(Action::RecordStop())?;
                    return Ok(());
                }

                self.session.is_recording = true;
                tx.send(Action::RecordStart())?;
                return self.add_assistant_message(
                    MessageType::Normal,
                    "🎤 Listening... Speak now!",
                    tx,
                );
            }
        }
    }

    pub fn handle_recognition_transcript(&mut self, transcript: &str) {
        self.session.is_recording = false;
        self.prompt_replacement = Some(transcript.to_string());
    }

    pub fn handle_recognition_error(
        &mut self,
        err: RecognitionError,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.session.is_recording = false;
        return self.add_assistant_message(MessageType::Error, err.message(), tx);
    }

    pub fn handle_recognition_failed_to_start(
        &mut self,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.session.is_recording = false;
        return self.add_assistant_message(
            MessageType::Error,
            "Failed to start voice recognition.",
            tx,
        );
    }

    pub fn handle_recognition_ended(&mut self) {
        self.session.is_recording = false;
    }

    pub fn toggle_voice_output(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        self.session.voice_enabled = !self.session.voice_enabled;

        if self.session.voice_enabled {
            return self.add_assistant_message(
                MessageType::Normal,
                "🔊 Voice responses enabled",
                tx,
            );
        }

        tx.send(Action::SpeechCancel())?;
        return self.add_assistant_message(
            MessageType::Normal,
            "🔇 Voice responses disabled",
            tx,
        );
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_messages(&self.messages, self.last_known_width as usize);

        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);
    }
}
