use crossterm::event::Event as CrosstermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;
use tui_textarea::Input;
use tui_textarea::Key;

use super::event_for_input;
use super::event_for_terminal;
use crate::domain::models::Event;

fn input(key: Key, ctrl: bool) -> Input {
    return Input {
        key,
        ctrl,
        alt: false,
    };
}

fn key_press(code: KeyCode, modifiers: KeyModifiers) -> CrosstermEvent {
    return CrosstermEvent::Key(KeyEvent::new(code, modifiers));
}

fn mouse(kind: MouseEventKind) -> CrosstermEvent {
    return CrosstermEvent::Mouse(MouseEvent {
        kind,
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    });
}

#[test]
fn it_maps_the_voice_hotkeys() {
    assert!(matches!(
        event_for_input(input(Key::Char('r'), true)),
        Event::KeyboardCTRLR()
    ));
    assert!(matches!(
        event_for_input(input(Key::Char('t'), true)),
        Event::KeyboardCTRLT()
    ));
}

#[test]
fn it_types_hotkey_letters_without_ctrl() {
    for letter in ['c', 'r', 't', 'u', 'd'] {
        match event_for_input(input(Key::Char(letter), false)) {
            Event::KeyboardCharInput(typed) => assert_eq!(typed.key, Key::Char(letter)),
            _ => panic!("{letter} should be typed into the prompt"),
        }
    }
}

#[test]
fn it_maps_quit_and_submit() {
    assert!(matches!(
        event_for_input(input(Key::Char('c'), true)),
        Event::KeyboardCTRLC()
    ));
    assert!(matches!(
        event_for_input(input(Key::Enter, false)),
        Event::KeyboardEnter()
    ));
}

#[test]
fn it_maps_scrolling_keys() {
    assert!(matches!(
        event_for_input(input(Key::Up, false)),
        Event::UIScrollUp()
    ));
    assert!(matches!(
        event_for_input(input(Key::Down, false)),
        Event::UIScrollDown()
    ));
    assert!(matches!(
        event_for_input(input(Key::PageUp, false)),
        Event::UIScrollPageUp()
    ));
    assert!(matches!(
        event_for_input(input(Key::Char('d'), true)),
        Event::UIScrollPageDown()
    ));
}

#[test]
fn it_passes_other_keys_to_the_prompt() {
    assert!(matches!(
        event_for_input(input(Key::Backspace, false)),
        Event::KeyboardCharInput(_)
    ));
}

#[test]
fn it_maps_terminal_key_presses() {
    assert!(matches!(
        event_for_terminal(key_press(KeyCode::Char('t'), KeyModifiers::CONTROL)),
        Some(Event::KeyboardCTRLT())
    ));
    assert!(matches!(
        event_for_terminal(key_press(KeyCode::Enter, KeyModifiers::NONE)),
        Some(Event::KeyboardEnter())
    ));
}

#[test]
fn it_maps_pasted_text() {
    match event_for_terminal(CrosstermEvent::Paste("/upload scan.png".to_string())) {
        Some(Event::KeyboardPaste(text)) => assert_eq!(text, "/upload scan.png"),
        _ => panic!("paste should be forwarded"),
    }
}

#[test]
fn it_maps_the_mouse_wheel() {
    assert!(matches!(
        event_for_terminal(mouse(MouseEventKind::ScrollUp)),
        Some(Event::UIScrollUp())
    ));
    assert!(matches!(
        event_for_terminal(mouse(MouseEventKind::ScrollDown)),
        Some(Event::UIScrollDown())
    ));
    assert!(event_for_terminal(mouse(MouseEventKind::Moved)).is_none());
}

#[test]
fn it_redraws_on_resize() {
    assert!(matches!(
        event_for_terminal(CrosstermEvent::Resize(80, 24)),
        Some(Event::UITick())
    ));
}

#[test]
fn it_ignores_focus_changes() {
    assert!(event_for_terminal(CrosstermEvent::FocusGained).is_none());
}
