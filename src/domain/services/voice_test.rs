use super::speakable_text;

#[test]
fn it_passes_plain_text_through() {
    assert_eq!(
        speakable_text("This shows X."),
        Some("This shows X.".to_string())
    );
}

#[test]
fn it_strips_decorative_symbols() {
    assert_eq!(
        speakable_text("🔊 Voice responses enabled"),
        Some("Voice responses enabled".to_string())
    );
    assert_eq!(
        speakable_text("🎤 Listening... Speak now!"),
        Some("Listening... Speak now!".to_string())
    );
    assert_eq!(
        speakable_text("⚠️ Sorry, I encountered an error: timeout"),
        Some("Sorry, I encountered an error: timeout".to_string())
    );
}

#[test]
fn it_skips_upload_failures() {
    assert_eq!(speakable_text("Upload failed: HTTP error! status: 500"), None);
}

#[test]
fn it_skips_errors_once_symbols_are_stripped() {
    assert_eq!(speakable_text("❌ Error: No query provided"), None);
}

#[test]
fn it_skips_messages_that_are_only_symbols() {
    assert_eq!(speakable_text("🔇 "), None);
    assert_eq!(speakable_text(""), None);
}
