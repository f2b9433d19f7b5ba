use std::env;
use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::cache_dir;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::QueryOutcome;
use crate::domain::models::QueryRequest;
use crate::domain::models::SpeechName;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadOutcome;
use crate::domain::services::actions::help_text;
use crate::domain::services::analyzed_summary;
use crate::infrastructure::backends::BackendManager;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn log_dir() -> path::PathBuf {
    if let Ok(dir) = env::var("MEDIVISION_LOG_DIR") {
        return path::PathBuf::from(dir);
    }

    return cache_dir();
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!(
        "Created default config file at {}",
        config_file_path.to_string_lossy()
    );
    return Ok(());
}

/// Uploads a file and returns the analyzed image, failing on anything else.
async fn upload_image(file_path: &str) -> Result<(String, usize)> {
    let file = UploadFile::inspect(path::Path::new(file_path))?;
    if let Err(rejection) = file.validate() {
        bail!(rejection.message());
    }

    let res = BackendManager::get().upload(&file).await?;
    match UploadOutcome::from(res) {
        UploadOutcome::Analyzed(image) => {
            println!("{}\n", analyzed_summary(image.detections.len()));
            if image.detections.is_empty() {
                println!("No objects detected");
            }
            for detection in image.detections.iter() {
                println!(
                    "- {}: {}",
                    detection.class,
                    detection.confidence_percent()
                );
            }

            return Ok((image.image_data, image.detections.len()));
        }
        UploadOutcome::Failed(err) => {
            bail!(format!("Upload failed: {err}"));
        }
    }
}

async fn run_query(text: &str, file_path: Option<&String>) -> Result<()> {
    let mut image = None;
    if let Some(file_path) = file_path {
        let (image_data, _count) = upload_image(file_path).await?;
        image = Some(image_data);
        println!();
    }

    let outcome = match BackendManager::get()
        .query(&QueryRequest::new(text, &image))
        .await
    {
        Ok(res) => QueryOutcome::from(res),
        Err(err) => QueryOutcome::TransportError(err.to_string()),
    };

    if outcome.is_error() {
        bail!(outcome.text());
    }

    println!("{}", outcome.text());
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for MediVision")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running MediVision with environment variable RUST_LOG=medivision")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_upload() -> Command {
    return Command::new("upload")
        .about("Uploads a medical image for analysis and prints the findings.")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Path to a PNG, JPG, JPEG, GIF or BMP image up to 16MB.")
                .num_args(1)
                .required(true),
        );
}

fn subcommand_query() -> Command {
    return Command::new("query")
        .about("Asks a single question and prints the response.")
        .arg(
            Arg::new("text")
                .short('t')
                .long("text")
                .help("The question to ask.")
                .num_args(1)
                .required(true),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Uploads this image first and asks about it.")
                .num_args(1),
        );
}

fn arg_server_url() -> Arg {
    return Arg::new(ConfigKey::ServerURL.to_string())
        .long(ConfigKey::ServerURL.to_string())
        .env("MEDIVISION_SERVER_URL")
        .num_args(1)
        .help(format!(
            "URL of the MediVision analysis server. [default: {}]",
            Config::default(ConfigKey::ServerURL)
        ))
        .global(true);
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("MEDIVISION_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when health checking the server at startup. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ))
        .global(true);
}

fn arg_voice_output() -> Arg {
    return Arg::new(ConfigKey::VoiceOutput.to_string())
        .long(ConfigKey::VoiceOutput.to_string())
        .env("MEDIVISION_VOICE_OUTPUT")
        .num_args(1)
        .help(format!(
            "Speak assistant responses from the start of the session. Requires a speech synthesizer. [default: {}]",
            Config::default(ConfigKey::VoiceOutput)
        ))
        .value_parser(PossibleValuesParser::new(["true", "false"]))
        .global(true);
}

fn arg_speech_synthesizer() -> Arg {
    return Arg::new(ConfigKey::SpeechSynthesizer.to_string())
        .long(ConfigKey::SpeechSynthesizer.to_string())
        .env("MEDIVISION_SPEECH_SYNTHESIZER")
        .num_args(1)
        .help(format!(
            "Speech synthesizer used for voice responses. [default: {}]",
            Config::default(ConfigKey::SpeechSynthesizer)
        ))
        .value_parser(PossibleValuesParser::new(SpeechName::VARIANTS))
        .global(true);
}

fn arg_speech_synthesizer_command() -> Arg {
    return Arg::new(ConfigKey::SpeechSynthesizerCommand.to_string())
        .long(ConfigKey::SpeechSynthesizerCommand.to_string())
        .env("MEDIVISION_SPEECH_SYNTHESIZER_COMMAND")
        .num_args(1)
        .help(format!(
            "Command used to run the espeak speech synthesizer. [default: {}]",
            Config::default(ConfigKey::SpeechSynthesizerCommand)
        ))
        .global(true);
}

fn arg_speech_recognition_command() -> Arg {
    return Arg::new(ConfigKey::SpeechRecognitionCommand.to_string())
        .long(ConfigKey::SpeechRecognitionCommand.to_string())
        .env("MEDIVISION_SPEECH_RECOGNITION_COMMAND")
        .num_args(1)
        .help("Command that listens for a single utterance and prints the transcript to stdout. The locale is passed as the last argument. Voice input is disabled when empty.")
        .global(true);
}

fn arg_speech_locale() -> Arg {
    return Arg::new(ConfigKey::SpeechLocale.to_string())
        .long(ConfigKey::SpeechLocale.to_string())
        .env("MEDIVISION_SPEECH_LOCALE")
        .num_args(1)
        .help(format!(
            "Locale passed to the speech recognizer. [default: {}]",
            Config::default(ConfigKey::SpeechLocale)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("medivision")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start a new chat session."))
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(Command::new("manpages").about("Generates manpages and outputs to stdout."))
        .subcommand(subcommand_query())
        .subcommand(subcommand_upload())
        .arg(arg_server_url())
        .arg(arg_health_check_timeout())
        .arg(arg_voice_output())
        .arg(arg_speech_synthesizer())
        .arg(arg_speech_synthesizer_command())
        .arg(arg_speech_recognition_command())
        .arg(arg_speech_locale())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("MEDIVISION_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

/// Returns true when the chat UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_dir().join("debug.log").to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("manpages", _)) => {
            clap_mangen::Man::new(build()).render(&mut io::stdout())?;
            return Ok(false);
        }
        Some(("upload", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            if let Some(file_path) = subcmd_matches.get_one::<String>("file") {
                upload_image(file_path).await?;
            }
            return Ok(false);
        }
        Some(("query", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            if let Some(text) = subcmd_matches.get_one::<String>("text") {
                run_query(text, subcmd_matches.get_one::<String>("file")).await?;
            }
            return Ok(false);
        }
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
