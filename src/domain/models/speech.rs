#[cfg(test)]
#[path = "speech_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// An optional platform capability. Callers match on this instead of probing
/// the platform themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        return matches!(self, Capability::Available(_));
    }

    pub fn as_ref(&self) -> Capability<&T> {
        match self {
            Capability::Available(val) => return Capability::Available(val),
            Capability::Unavailable => return Capability::Unavailable,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Capability<U> {
        match self {
            Capability::Available(val) => return Capability::Available(f(val)),
            Capability::Unavailable => return Capability::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(val: Option<T>) -> Self {
        match val {
            Some(val) => return Capability::Available(val),
            None => return Capability::Unavailable,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SpeechName {
    Espeak,
    None,
}

impl SpeechName {
    pub fn parse(text: String) -> Option<SpeechName> {
        return SpeechName::iter().find(|e| return e.to_string() == text);
    }
}

/// Voice settings used for every utterance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeechProfile {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechProfile {
    fn default() -> SpeechProfile {
        return SpeechProfile {
            rate: 0.9,
            pitch: 1.0,
            volume: 0.8,
        };
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecognitionError {
    NoSpeech,
    PermissionDenied,
    Generic,
}

impl RecognitionError {
    pub fn message(&self) -> &'static str {
        match self {
            RecognitionError::NoSpeech => return "No speech detected. Please try again.",
            RecognitionError::PermissionDenied => {
                return "Microphone access denied. Please allow microphone access.";
            }
            RecognitionError::Generic => return "Voice recognition error. Please try again.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recognition {
    Transcript(String),
    Error(RecognitionError),
}

#[async_trait]
pub trait SpeechSynthesizer {
    fn name(&self) -> SpeechName;

    /// Speaks the text and resolves once the utterance has finished.
    /// Dropping the future stops the utterance.
    async fn speak(&self, text: &str, profile: &SpeechProfile) -> Result<()>;
}

#[async_trait]
pub trait SpeechRecognizer {
    /// Name of the underlying engine, shown in the status bar.
    fn name(&self) -> String;

    /// Listens for a single utterance in the given locale. Errors are only
    /// returned when the session could not be started at all. Dropping the
    /// future ends the session.
    async fn listen(&self, locale: &str) -> Result<Recognition>;
}

pub type SynthesizerArc = Arc<dyn SpeechSynthesizer + Send + Sync>;
pub type RecognizerArc = Arc<dyn SpeechRecognizer + Send + Sync>;
