use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Capability;
use crate::domain::models::Event;
use crate::domain::models::SessionState;
use crate::domain::models::SpeechName;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::FindingsPanel;

const SIDE_PANEL_WIDTH: u16 = 34;

fn status_line(app_state: &AppState) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);

    let voice = match &app_state.synthesis {
        Capability::Available(name) if app_state.session.voice_enabled => {
            Span::styled(format!("🔊 Voice on ({name})"), Style::default().fg(Color::Green))
        }
        Capability::Available(_) => Span::styled("🔇 Voice off", dim),
        Capability::Unavailable => Span::styled("🔇 Voice unavailable", dim),
    };

    let mic = match &app_state.recognition {
        Capability::Available(_) if app_state.session.is_recording => Span::styled(
            "🎤 Listening...",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Capability::Available(name) => Span::styled(format!("🎤 Mic ready ({name})"), dim),
        Capability::Unavailable => Span::styled("🎤 Mic unavailable", dim),
    };

    return Line::from(vec![
        voice,
        Span::styled(" · ", dim),
        mic,
        Span::styled(" · ", dim),
        Span::styled(Config::get(ConfigKey::ServerURL), dim),
    ]);
}

fn paste(textarea: &mut tui_textarea::TextArea, text: &str) {
    for char in text.chars() {
        let key = match char {
            '\n' => Key::Enter,
            '\r' => continue,
            _ => Key::Char(char),
        };

        textarea.input(Input {
            key,
            ctrl: false,
            alt: false,
        });
    }
}

/// Sends whatever is in the prompt box. Returns true when the user asked to
/// quit.
fn submit(
    textarea: &mut tui_textarea::TextArea,
    app_state: &mut AppState,
    tx: &mpsc::UnboundedSender<Action>,
) -> Result<bool> {
    let input_str = textarea.lines().join("\n");
    if input_str.trim().is_empty() {
        return Ok(false);
    }

    *textarea = TextArea::default();
    return app_state.submit_prompt(&input_str, tx);
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut events = EventsService::new(rx);

    tx.send(Action::HealthCheck())?;

    loop {
        if let Some(transcript) = app_state.take_prompt_replacement() {
            textarea = TextArea::with_text(&transcript);
        }
        textarea.set_block(TextArea::block(app_state.prompt_title()));

        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            let main = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Min(1), Constraint::Length(SIDE_PANEL_WIDTH)])
                .split(layout[0]);

            let side = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Length(6), Constraint::Min(3)])
                .split(main[1]);

            if main[0].width != app_state.last_known_width
                || main[0].height != app_state.last_known_height
            {
                app_state.set_rect(main[0]);
            }

            app_state
                .bubble_list
                .render(frame, main[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                main[0].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            let panel = FindingsPanel::new(&app_state.session.current_image, &app_state.detections)
                .analyzing(app_state.uploading);
            panel.render_image(frame, side[0]);
            panel.render_findings(frame, side[1]);

            frame.render_widget(Paragraph::new(status_line(app_state)), layout[1]);
            frame.render_widget(textarea.widget(), layout[2]);
        })?;

        match events.next().await? {
            Event::KeyboardCharInput(input) => {
                textarea.input(input);
            }
            Event::KeyboardPaste(text) => {
                paste(&mut textarea, &text);
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLR() => {
                app_state.toggle_recording(&tx)?;
            }
            Event::KeyboardCTRLT() => {
                app_state.toggle_voice_output(&tx)?;
            }
            Event::KeyboardEnter() | Event::VoiceSubmit() => {
                if submit(&mut textarea, app_state, &tx)? {
                    break;
                }
            }
            Event::QueryFinished(outcome) => {
                app_state.handle_query_finished(outcome, &tx)?;
            }
            Event::RecognitionEnded() => {
                app_state.handle_recognition_ended();
            }
            Event::RecognitionError(err) => {
                app_state.handle_recognition_error(err, &tx)?;
            }
            Event::RecognitionFailedToStart() => {
                app_state.handle_recognition_failed_to_start(&tx)?;
            }
            Event::RecognitionTranscript(transcript) => {
                app_state.handle_recognition_transcript(&transcript);
            }
            Event::ServiceMessage(message) => {
                app_state.add_assistant_message(message.message_type(), &message.text, &tx)?;
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {}
            Event::UploadFinished(outcome) => {
                app_state.handle_upload_finished(outcome, &tx)?;
            }
        }
    }

    tx.send(Action::SpeechCancel())?;
    tx.send(Action::RecordStop())?;

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    synthesis: Capability<SpeechName>,
    recognition: Capability<String>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(
        SessionState::with_voice(Config::get_bool(ConfigKey::VoiceOutput)),
        synthesis,
        recognition,
    );

    start_loop(&mut terminal, &mut app_state, tx, rx).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
