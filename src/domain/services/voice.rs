#[cfg(test)]
#[path = "voice_test.rs"]
mod tests;

const DECORATIVE_SYMBOLS: [char; 6] = ['❌', '⚠', '\u{FE0F}', '🎤', '🔊', '🔇'];
const SILENT_PREFIXES: [&str; 2] = ["Upload failed", "Error"];

/// Cleans an assistant message for speech. Returns `None` when nothing should
/// be spoken.
pub fn speakable_text(text: &str) -> Option<String> {
    let cleaned = text
        .chars()
        .filter(|c| return !DECORATIVE_SYMBOLS.contains(c))
        .collect::<String>()
        .trim()
        .to_string();

    if cleaned.is_empty() {
        return None;
    }

    if SILENT_PREFIXES
        .iter()
        .any(|prefix| return cleaned.starts_with(prefix))
    {
        return None;
    }

    return Some(cleaned);
}
