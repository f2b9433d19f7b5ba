use tui_textarea::Input;

use super::Message;
use super::QueryOutcome;
use super::RecognitionError;
use super::UploadOutcome;

pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLR(),
    KeyboardCTRLT(),
    KeyboardEnter(),
    KeyboardPaste(String),
    QueryFinished(QueryOutcome),
    RecognitionEnded(),
    RecognitionError(RecognitionError),
    RecognitionFailedToStart(),
    RecognitionTranscript(String),
    ServiceMessage(Message),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
    UploadFinished(UploadOutcome),
    VoiceSubmit(),
}
