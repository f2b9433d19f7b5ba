#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use domain::models::Action;
use domain::models::Event;
use domain::models::SpeechName;
use infrastructure::backends::BackendManager;
use infrastructure::speech::SpeechManager;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::ActionsService;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! MediVision has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let file_appender = tracing_appender::rolling::never(cli::log_dir(), "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("medivision")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let should_start_ui = match cli::parse().await {
        Ok(should_start_ui) => should_start_ui,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    if !should_start_ui {
        process::exit(0);
    }

    let synthesizer_name = SpeechName::parse(Config::get(ConfigKey::SpeechSynthesizer))
        .unwrap_or(SpeechName::None);
    let synthesizer = SpeechManager::synthesizer(
        synthesizer_name,
        &Config::get(ConfigKey::SpeechSynthesizerCommand),
    );
    let recognizer = SpeechManager::recognizer(&Config::get(ConfigKey::SpeechRecognitionCommand));
    tracing::debug!(
        synthesizer = synthesizer.is_available(),
        recognizer = recognizer.is_available(),
        "speech capabilities"
    );

    let synthesis = synthesizer.as_ref().map(|e| return e.name());
    let recognition = recognizer.as_ref().map(|e| return e.name());

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::new(
            BackendManager::get(),
            synthesizer,
            recognizer,
            &Config::get(ConfigKey::SpeechLocale),
            event_tx,
        )
        .start(&mut action_rx)
        .await;
    });

    let ui_future = ui::start(action_tx, event_rx, synthesis, recognition);

    let res = tokio::select!(
        res = background_futures.join_next() => match res {
            Some(Ok(res)) => res,
            Some(Err(err)) => Err(err.into()),
            None => Ok(()),
        },
        res = ui_future => res,
    );

    if let Err(err) = res {
        ui::destruct_terminal_for_panic();
        handle_error(err);
    }

    process::exit(0);
}
