use anyhow::Result;

use super::espeak_args;
use super::Espeak;
use crate::domain::models::SpeechProfile;
use crate::domain::models::SpeechSynthesizer;

#[test]
fn it_scales_the_default_profile() {
    let args = espeak_args(&SpeechProfile::default(), "This shows X.");
    assert_eq!(
        args,
        vec!["-s", "158", "-p", "50", "-a", "80", "--", "This shows X."]
    );
}

#[test]
fn it_rounds_custom_profiles() {
    let profile = SpeechProfile {
        rate: 1.5,
        pitch: 0.5,
        volume: 1.0,
    };
    let args = espeak_args(&profile, "hi");
    assert_eq!(args, vec!["-s", "263", "-p", "25", "-a", "100", "--", "hi"]);
}

#[test]
fn it_keeps_leading_dashes_out_of_option_parsing() {
    let args = espeak_args(&SpeechProfile::default(), "- Nodule in the left lobe");
    let split = args.iter().position(|e| return e == "--").unwrap();
    assert_eq!(args[split + 1..], ["- Nodule in the left lobe".to_string()]);
}

#[tokio::test]
async fn it_speaks_text_that_looks_like_an_option() -> Result<()> {
    // sh -c treats the words after the script as positional args, so the
    // script only succeeds when `--` reaches it ahead of the text.
    let synthesizer = Espeak::new(
        "sh".to_string(),
        vec![
            "-c".to_string(),
            r#"while [ "$1" != "--" ]; do shift; done; [ "$2" = "- Nodule" ]"#.to_string(),
            "espeak".to_string(),
        ],
    );
    synthesizer.speak("- Nodule", &SpeechProfile::default()).await?;
    return Ok(());
}

#[tokio::test]
async fn it_speaks_through_the_command() -> Result<()> {
    let synthesizer = Espeak::new("true".to_string(), vec![]);
    synthesizer.speak("hello", &SpeechProfile::default()).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_when_the_command_fails() {
    let synthesizer = Espeak::new("false".to_string(), vec![]);
    let res = synthesizer.speak("hello", &SpeechProfile::default()).await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_fails_when_the_command_is_missing() {
    let synthesizer = Espeak::new("medivision-no-such-synthesizer".to_string(), vec![]);
    let res = synthesizer.speak("hello", &SpeechProfile::default()).await;
    assert!(res.is_err());
}
