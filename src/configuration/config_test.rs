use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # Time to wait in milliseconds before timing out when health checking the server at startup.
    health-check-timeout = 1000

    # URL of the MediVision analysis server.
    server-url = "http://localhost:5000"

    # Locale passed to the speech recognizer.
    speech-locale = "en-US"

    # Command that listens for a single utterance and prints the transcript to stdout. The locale is passed as the last argument. Voice input is disabled when empty.
    # speech-recognition-command = ""

    # Speech synthesizer used for voice responses. [possible values: espeak, none]
    speech-synthesizer = "none"

    # Command used to run the espeak speech synthesizer.
    speech-synthesizer-command = "espeak"

    # Your user name displayed in all chat bubbles.
    # username = "You"

    # Speak assistant responses from the start of the session. Requires a speech synthesizer. [possible values: true, false]
    voice-output = false
    "###);
}

#[test]
fn it_names_keys_in_kebab_case() {
    assert_eq!(ConfigKey::ServerURL.to_string(), "server-url");
    assert_eq!(
        ConfigKey::SpeechRecognitionCommand.to_string(),
        "speech-recognition-command"
    );
}

#[test]
fn it_rejects_invalid_cli_values() {
    let res = cli::build().try_get_matches_from(vec!["medivision", "--voice-output", "maybe"]);
    assert!(res.is_err());

    let res =
        cli::build().try_get_matches_from(vec!["medivision", "--speech-synthesizer", "say"]);
    assert!(res.is_err());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec!["chat", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["chat", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}
