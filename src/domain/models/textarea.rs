use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn block(title: &str) -> Block<'a> {
        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .title(title.to_string())
            .padding(Padding::new(1, 1, 0, 0));
    }

    pub fn default() -> tui_textarea::TextArea<'a> {
        return TextArea::with_text("");
    }

    /// Prompt box pre-filled with text, used when a voice transcript lands in
    /// the input.
    pub fn with_text(text: &str) -> tui_textarea::TextArea<'a> {
        let mut lines = text
            .lines()
            .map(|line| return line.to_string())
            .collect::<Vec<String>>();
        if lines.is_empty() {
            lines.push("".to_string());
        }

        let mut textarea = tui_textarea::TextArea::new(lines);
        textarea.set_block(TextArea::block("Ask me anything..."));
        textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        textarea.move_cursor(tui_textarea::CursorMove::End);

        return textarea;
    }
}
