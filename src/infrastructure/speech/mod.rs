#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod command;
pub mod espeak;

use std::sync::Arc;

use crate::domain::models::Capability;
use crate::domain::models::RecognizerArc;
use crate::domain::models::SpeechName;
use crate::domain::models::SynthesizerArc;

/// Splits a configured command line into the program and its leading
/// arguments.
pub fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command
        .split_whitespace()
        .map(|e| return e.to_string())
        .collect::<Vec<String>>();

    if parts.is_empty() {
        return None;
    }

    let program = parts.remove(0);
    return Some((program, parts));
}

pub struct SpeechManager {}

impl SpeechManager {
    pub fn synthesizer(name: SpeechName, command_line: &str) -> Capability<SynthesizerArc> {
        if name == SpeechName::None {
            return Capability::Unavailable;
        }

        let synthesizer = split_command(command_line).map(|(program, args)| {
            let synthesizer: SynthesizerArc = Arc::new(espeak::Espeak::new(program, args));
            return synthesizer;
        });

        return Capability::from(synthesizer);
    }

    pub fn recognizer(command_line: &str) -> Capability<RecognizerArc> {
        let recognizer = split_command(command_line).map(|(program, args)| {
            let recognizer: RecognizerArc = Arc::new(command::CommandRecognizer::new(program, args));
            return recognizer;
        });

        return Capability::from(recognizer);
    }
}
