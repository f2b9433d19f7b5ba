#[cfg(test)]
#[path = "espeak_test.rs"]
mod tests;

use std::process::Stdio;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::models::SpeechName;
use crate::domain::models::SpeechProfile;
use crate::domain::models::SpeechSynthesizer;

const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;
const BASE_AMPLITUDE: f32 = 100.0;

/// Maps a relative voice profile onto espeak's absolute flags.
pub fn espeak_args(profile: &SpeechProfile, text: &str) -> Vec<String> {
    return vec![
        "-s".to_string(),
        format!("{}", (BASE_WORDS_PER_MINUTE * profile.rate).round()),
        "-p".to_string(),
        format!("{}", (BASE_PITCH * profile.pitch).round()),
        "-a".to_string(),
        format!("{}", (BASE_AMPLITUDE * profile.volume).round()),
        "--".to_string(),
        text.to_string(),
    ];
}

pub struct Espeak {
    program: String,
    args: Vec<String>,
}

impl Espeak {
    pub fn new(program: String, args: Vec<String>) -> Espeak {
        return Espeak { program, args };
    }
}

#[async_trait]
impl SpeechSynthesizer for Espeak {
    fn name(&self) -> SpeechName {
        return SpeechName::Espeak;
    }

    #[allow(clippy::implicit_return)]
    async fn speak(&self, text: &str, profile: &SpeechProfile) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .args(espeak_args(profile, text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await?;

        if !status.success() {
            tracing::error!(program = %self.program, status = ?status.code(), "Speech synthesizer failed");
            bail!("{} exited with {status}", self.program);
        }

        return Ok(());
    }
}
