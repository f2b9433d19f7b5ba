/// In-memory state for a single chat session. Nothing here outlives the
/// process.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Base64 encoded image returned by the last successful upload.
    pub current_image: Option<String>,
    pub is_recording: bool,
    pub voice_enabled: bool,
}

impl SessionState {
    pub fn with_voice(voice_enabled: bool) -> SessionState {
        return SessionState {
            voice_enabled,
            ..SessionState::default()
        };
    }
}
