#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Event;

const TICK_INTERVAL: time::Duration = time::Duration::from_millis(500);

/// Keys handled by the chat screen instead of the prompt box. The flag marks
/// bindings that need Ctrl held. Anything not listed is typed into the prompt.
const HOTKEYS: [(Key, bool, fn() -> Event); 12] = [
    (Key::Enter, false, Event::KeyboardEnter),
    (Key::Char('c'), true, Event::KeyboardCTRLC),
    (Key::Char('r'), true, Event::KeyboardCTRLR),
    (Key::Char('t'), true, Event::KeyboardCTRLT),
    (Key::Up, false, Event::UIScrollUp),
    (Key::Down, false, Event::UIScrollDown),
    (Key::MouseScrollUp, false, Event::UIScrollUp),
    (Key::MouseScrollDown, false, Event::UIScrollDown),
    (Key::PageUp, false, Event::UIScrollPageUp),
    (Key::PageDown, false, Event::UIScrollPageDown),
    (Key::Char('u'), true, Event::UIScrollPageUp),
    (Key::Char('d'), true, Event::UIScrollPageDown),
];

pub fn event_for_input(input: Input) -> Event {
    let hotkey = HOTKEYS
        .iter()
        // `Key` has no `PartialEq` in tui-textarea 0.2.4; its derived `Debug` is structural.
        .find(|(key, ctrl, _)| {
            return format!("{key:?}") == format!("{:?}", input.key) && (!ctrl || input.ctrl);
        });

    match hotkey {
        Some((_, _, event)) => return event(),
        None => return Event::KeyboardCharInput(input),
    }
}

/// Maps a terminal event onto the chat screen's events. Returns `None` for
/// anything the screen ignores.
pub fn event_for_terminal(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) => return Some(event_for_input(key.into())),
        CrosstermEvent::Paste(text) => return Some(Event::KeyboardPaste(text)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        // Redraw straight away rather than waiting for the next tick.
        CrosstermEvent::Resize(_, _) => return Some(Event::UITick()),
        _ => return None,
    }
}

/// Merges terminal input, worker events and a redraw tick into one stream.
pub struct EventsService {
    terminal_events: EventStream,
    worker_events: mpsc::UnboundedReceiver<Event>,
}

impl EventsService {
    pub fn new(worker_events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            terminal_events: EventStream::new(),
            worker_events,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let event = tokio::select! {
                event = self.worker_events.recv() => event,
                event = self.terminal_events.next() => match event {
                    Some(Ok(event)) => event_for_terminal(event),
                    Some(Err(err)) => {
                        tracing::error!(error = %err, "Failed to read terminal event");
                        None
                    }
                    None => None,
                },
                _ = time::sleep(TICK_INTERVAL) => Some(Event::UITick()),
            };

            if let Some(event) = event {
                return Ok(event);
            }
        }
    }
}
