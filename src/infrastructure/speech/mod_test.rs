use super::split_command;
use super::SpeechManager;
use crate::domain::models::SpeechName;

#[test]
fn it_splits_commands() {
    assert_eq!(
        split_command("  listen --model base "),
        Some((
            "listen".to_string(),
            vec!["--model".to_string(), "base".to_string()]
        ))
    );
    assert_eq!(split_command("   "), None);
}

#[test]
fn it_disables_synthesis_when_none() {
    assert!(!SpeechManager::synthesizer(SpeechName::None, "espeak").is_available());
    assert!(!SpeechManager::synthesizer(SpeechName::Espeak, "").is_available());
    assert!(SpeechManager::synthesizer(SpeechName::Espeak, "espeak-ng").is_available());
}

#[test]
fn it_disables_recognition_without_a_command() {
    assert!(!SpeechManager::recognizer("").is_available());
    assert!(SpeechManager::recognizer("listen --model base").is_available());
}
