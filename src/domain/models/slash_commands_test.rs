use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}

#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse(" ").is_none());
}

#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    assert!(SlashCommand::parse("!q").is_none());
}

#[test]
fn it_parse_plain_questions() {
    assert!(SlashCommand::parse("what is this?").is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let cmd = SlashCommand::parse("/q");
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    for text in ["/q", "/quit", "/exit"] {
        assert!(SlashCommand::parse(text).unwrap().is_quit());
    }
}

#[test]
fn it_is_upload_with_path() {
    let cmd = SlashCommand::parse("/upload /tmp/chest xray.png").unwrap();
    assert!(cmd.is_upload());
    assert_eq!(cmd.arg_text(), "/tmp/chest xray.png");
}

#[test]
fn it_is_short_upload() {
    assert!(SlashCommand::parse("/u scan.png").unwrap().is_upload());
}

#[test]
fn it_is_clear() {
    assert!(SlashCommand::parse("/c").unwrap().is_clear());
    assert!(SlashCommand::parse("/clear").unwrap().is_clear());
}

#[test]
fn it_is_voice() {
    assert!(SlashCommand::parse("/v").unwrap().is_voice());
    assert!(SlashCommand::parse("/voice").unwrap().is_voice());
}

#[test]
fn it_is_record() {
    assert!(SlashCommand::parse("/r").unwrap().is_record());
    assert!(SlashCommand::parse("/record").unwrap().is_record());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}
